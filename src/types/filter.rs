/// A saved Jira search, as resolved from the filter endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Zero when the server sent an id that could not be parsed.
    pub id: i64,
    pub name: String,
    pub jql: String,
    pub search_url: String,
}

impl Filter {
    /// Whether the filter carries what the issue aggregator needs to run it.
    pub fn is_executable(&self) -> bool {
        self.id > 0 && !self.search_url.trim().is_empty()
    }
}
