//! Natural-language candidate search.

use serde_json::from_value;

use super::types::{SearchOutcome, SearchQuery};
use super::{ApiClient, ApiError};

/// Run a free-text search via `POST /search/agent`.
///
/// The backend interprets the query into structured filters and returns
/// both the matching candidates and its interpretation, so callers can
/// show users what was actually searched for.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn agent(client: &ApiClient, query: &str, token: Option<&str>) -> Result<SearchOutcome, ApiError> {
    let request = SearchQuery { query: query.to_owned() };
    let body = client.post_json("/search/agent", &request, token).await?;
    Ok(from_value(body)?)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
