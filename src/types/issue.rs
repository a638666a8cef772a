/// Condensed view of a Jira issue, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    /// Empty when the issue has no parent.
    pub parent: String,
    /// Display form of the resolution date, or the resolution name.
    pub resolved: String,
    /// Browse link; empty exactly when `key` is empty.
    pub url: String,
}
