//! Wire types for the Jira REST endpoints the report touches.

use serde::Deserialize;
use serde_json::Value;

use crate::normalize::resolved_display;
use crate::types::{Filter, Issue};

/// One page of `/filter/search`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct FilterSearchPage {
    pub values: Vec<FilterPayload>,
    #[serde(rename = "startAt")]
    pub start_at: u64,
    #[serde(rename = "maxResults")]
    pub max_results: u64,
    pub total: u64,
    #[serde(rename = "isLast")]
    pub is_last: bool,
}

/// A filter as returned by both `/filter/search` and `/filter/{id}`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct FilterPayload {
    pub id: Option<Value>,
    pub name: String,
    pub jql: String,
    #[serde(rename = "searchUrl")]
    pub search_url: String,
}

impl FilterPayload {
    fn parsed_id(&self) -> i64 {
        match &self.id {
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<FilterPayload> for Filter {
    fn from(payload: FilterPayload) -> Self {
        Self {
            id: payload.parsed_id(),
            name: payload.name,
            jql: payload.jql,
            search_url: payload.search_url,
        }
    }
}

/// Result of executing a filter's `searchUrl`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SearchResults {
    pub issues: Vec<IssueRef>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct IssueRef {
    pub id: String,
}

/// `/issue/{id}` restricted to the fields the report needs.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct IssuePayload {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub status: Option<Named>,
    pub resolution: Option<Named>,
    pub resolutiondate: Option<String>,
    pub parent: Option<ParentRef>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Named {
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ParentRef {
    pub key: String,
}

impl IssuePayload {
    /// Build the report view. `url` is left empty; the aggregator fills it in.
    pub fn into_issue(self) -> Issue {
        let fields = self.fields;
        let resolution_name = fields.resolution.map(|r| r.name).unwrap_or_default();
        let resolution_date = fields.resolutiondate.unwrap_or_default();

        Issue {
            key: self.key.trim().to_string(),
            summary: fields.summary.unwrap_or_default().trim().to_string(),
            status: fields
                .status
                .map(|s| s.name.trim().to_string())
                .unwrap_or_default(),
            parent: fields
                .parent
                .map(|p| p.key.trim().to_string())
                .unwrap_or_default(),
            resolved: resolved_display(&resolution_date, &resolution_name),
            url: String::new(),
        }
    }
}
