use tabled::{settings::Style, Table, Tabled};
use tokio_util::sync::CancellationToken;

use crate::client::JiraClient;
use crate::error::Result;
use crate::filters::list_all;
use crate::types::Filter;

#[derive(Tabled)]
struct FilterRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<&Filter> for FilterRow {
    fn from(filter: &Filter) -> Self {
        Self {
            id: filter.id,
            name: filter.name.clone(),
        }
    }
}

pub async fn list(client: &JiraClient, cancel: &CancellationToken) -> Result<()> {
    let filters = list_all(client, cancel).await?;

    if filters.is_empty() {
        println!("No filters found.");
        return Ok(());
    }

    println!("{}", filters_table(&filters));
    Ok(())
}

fn filters_table(filters: &[Filter]) -> String {
    let rows: Vec<FilterRow> = filters.iter().map(FilterRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_table_lists_every_filter() {
        let filters = vec![
            Filter {
                id: 10042,
                name: "Team Sprint".to_string(),
                ..Filter::default()
            },
            Filter {
                id: 0,
                name: "Broken".to_string(),
                ..Filter::default()
            },
        ];
        let table = filters_table(&filters);
        assert!(table.contains("ID"));
        assert!(table.contains("NAME"));
        assert!(table.contains("10042"));
        assert!(table.contains("Team Sprint"));
        assert!(table.contains("Broken"));
    }
}
