//! Saved-filter lookups: resolve a user identifier, fetch by id, list the catalog.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::{decode, JiraClient};
use crate::error::{ReportError, Result};
use crate::responses::{FilterPayload, FilterSearchPage};
use crate::types::Filter;

const FILTER_SEARCH_ENDPOINT: &str = "/rest/api/3/filter/search";
const CATALOG_PAGE_SIZE: u64 = 100;
const NAME_SEARCH_LIMIT: u64 = 50;

/// Outcome of the name-based lookup step.
#[derive(Debug)]
enum NameLookup {
    Match(Filter),
    NoMatch,
}

/// Resolve `identifier` (a filter name or numeric id) to an executable filter.
///
/// Name lookup is tried first; a 404 or an empty result there falls through to
/// id lookup. Any other failure is returned immediately.
pub async fn resolve(
    client: &JiraClient,
    identifier: &str,
    cancel: &CancellationToken,
) -> Result<Filter> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(ReportError::EmptyIdentifier);
    }

    let filter = match lookup_by_name(client, identifier, cancel).await? {
        NameLookup::Match(filter) => hydrate(client, filter, cancel).await?,
        NameLookup::NoMatch => match identifier.parse::<i64>() {
            Ok(id) => match fetch_by_id(client, id, cancel).await {
                Ok(filter) => filter,
                Err(e) if e.is_not_found() => {
                    return Err(ReportError::FilterNotFound(identifier.to_string()))
                }
                Err(e) => return Err(e),
            },
            Err(_) => return Err(ReportError::FilterNotFound(identifier.to_string())),
        },
    };

    ensure_executable(filter)
}

/// Fetch a single filter by id. Non-positive ids are reported as 404s without
/// touching the network.
pub async fn fetch_by_id(client: &JiraClient, id: i64, cancel: &CancellationToken) -> Result<Filter> {
    let endpoint = format!("/rest/api/3/filter/{id}");
    if id <= 0 {
        return Err(ReportError::ApiError {
            endpoint,
            status: 404,
            message: format!("invalid filter id {id}"),
        });
    }

    let body = client.get_bytes(&endpoint, &[], cancel).await?;
    if client.debug() {
        debug!(filter = id, body = %String::from_utf8_lossy(&body), "jira filter response");
    }

    let payload: FilterPayload = decode(&endpoint, &body)?;
    Ok(payload.into())
}

/// Page through every filter visible to the caller.
///
/// Entries whose id cannot be parsed are kept with id 0.
pub async fn list_all(client: &JiraClient, cancel: &CancellationToken) -> Result<Vec<Filter>> {
    let mut filters = Vec::new();
    let mut start_at: u64 = 0;

    loop {
        let query = [
            ("startAt", start_at.to_string()),
            ("maxResults", CATALOG_PAGE_SIZE.to_string()),
            ("expand", "jql".to_string()),
        ];
        let page: FilterSearchPage = client
            .get_json(FILTER_SEARCH_ENDPOINT, &query, cancel)
            .await?;
        debug!(
            start_at = page.start_at,
            max_results = page.max_results,
            total = page.total,
            is_last = page.is_last,
            "filter page"
        );

        let received = page.values.len() as u64;
        filters.extend(page.values.into_iter().map(Filter::from));

        if page.is_last || received == 0 {
            break;
        }

        start_at += received;
        if page.total > 0 && filters.len() as u64 >= page.total {
            break;
        }
    }

    Ok(filters)
}

async fn lookup_by_name(
    client: &JiraClient,
    name: &str,
    cancel: &CancellationToken,
) -> Result<NameLookup> {
    let query = [
        ("filterName", name.to_string()),
        ("maxResults", NAME_SEARCH_LIMIT.to_string()),
        ("expand", "jql".to_string()),
    ];

    let page = match client
        .get_json::<FilterSearchPage>(FILTER_SEARCH_ENDPOINT, &query, cancel)
        .await
    {
        Ok(page) => page,
        Err(e) if e.is_not_found() => return Ok(NameLookup::NoMatch),
        Err(e) => return Err(e),
    };

    Ok(pick_by_name(page.values, name))
}

/// Prefer a case-insensitive exact match, else the server's first result.
fn pick_by_name(values: Vec<FilterPayload>, name: &str) -> NameLookup {
    let wanted = name.to_lowercase();
    let mut candidates: Vec<Filter> = values.into_iter().map(Filter::from).collect();

    if let Some(pos) = candidates.iter().position(|f| f.name.to_lowercase() == wanted) {
        return NameLookup::Match(candidates.swap_remove(pos));
    }

    if candidates.is_empty() {
        NameLookup::NoMatch
    } else {
        NameLookup::Match(candidates.swap_remove(0))
    }
}

/// Search results may omit `searchUrl`; fill it in from the detail endpoint.
async fn hydrate(client: &JiraClient, filter: Filter, cancel: &CancellationToken) -> Result<Filter> {
    if filter.id > 0 && filter.search_url.trim().is_empty() {
        return fetch_by_id(client, filter.id, cancel)
            .await
            .map_err(|e| ReportError::FilterFetch {
                id: filter.id,
                source: Box::new(e),
            });
    }
    Ok(filter)
}

fn ensure_executable(filter: Filter) -> Result<Filter> {
    if filter.is_executable() {
        Ok(filter)
    } else if filter.id <= 0 {
        Err(ReportError::InvalidFilter { name: filter.name })
    } else {
        Err(ReportError::MissingSearchUrl { name: filter.name })
    }
}
