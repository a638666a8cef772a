//! Executes a saved filter and hydrates each hit with its report fields.

use tokio_util::sync::CancellationToken;

use crate::client::JiraClient;
use crate::error::{ReportError, Result};
use crate::filters::fetch_by_id;
use crate::responses::{IssuePayload, SearchResults};
use crate::types::{Filter, Issue};

const ISSUE_FIELDS: &str = "summary,status,resolution,resolutiondate,parent";

/// Fetch every issue matched by `filter`, in server order.
///
/// The filter is re-read by id first so the freshest `searchUrl` is used.
/// Issues are fetched one at a time and the first failure aborts the run.
pub async fn fetch_by_filter(
    client: &JiraClient,
    filter: &Filter,
    cancel: &CancellationToken,
) -> Result<Vec<Issue>> {
    if filter.id <= 0 {
        return Err(ReportError::InvalidFilter {
            name: filter.name.clone(),
        });
    }

    let details = fetch_by_id(client, filter.id, cancel)
        .await
        .map_err(|e| ReportError::FilterFetch {
            id: filter.id,
            source: Box::new(e),
        })?;

    let search_url = details.search_url.trim();
    if search_url.is_empty() {
        return Err(ReportError::MissingSearchUrl { name: details.name });
    }

    let results: SearchResults = client.get_json(search_url, &[], cancel).await?;

    let mut issues = Vec::with_capacity(results.issues.len());
    for reference in &results.issues {
        let issue_id = reference.id.trim();
        if issue_id.is_empty() {
            continue;
        }
        let issue = fetch_issue(client, issue_id, cancel)
            .await
            .map_err(|e| ReportError::IssueFetch {
                id: issue_id.to_string(),
                source: Box::new(e),
            })?;
        issues.push(issue);
    }

    Ok(issues)
}

async fn fetch_issue(client: &JiraClient, issue_id: &str, cancel: &CancellationToken) -> Result<Issue> {
    let endpoint = format!("/rest/api/3/issue/{issue_id}");
    let payload: IssuePayload = client
        .get_json(&endpoint, &[("fields", ISSUE_FIELDS.to_string())], cancel)
        .await?;

    let mut issue = payload.into_issue();
    if !issue.key.is_empty() {
        issue.url = format!("{}/browse/{}", client.base_url(), issue.key);
    }
    Ok(issue)
}
