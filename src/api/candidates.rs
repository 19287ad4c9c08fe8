//! Candidate pool endpoints.

use reqwest::multipart::{Form, Part};
use serde_json::from_value;
use uuid::Uuid;

use super::types::{Candidate, CandidateList, CandidateUpdate, ImportOutcome, NewCandidate};
use super::{ApiClient, ApiError};

fn candidate_path(id: Uuid) -> String {
    format!("/candidates/{id}")
}

/// Filters for `GET /candidates/`. Unset fields are left out of the query
/// string entirely so backend defaults apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// 1-based page number; backend default is 1.
    pub page: Option<i64>,
    /// Page size; backend default is 20, maximum 100.
    pub per_page: Option<i64>,
    /// Case-insensitive substring match against name or email.
    pub search: Option<String>,
    /// Exact match against `current_status`.
    pub status: Option<String>,
    /// Candidates whose skill list contains this entry.
    pub skill: Option<String>,
}

impl CandidateFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(skill) = &self.skill {
            query.push(("skill", skill.clone()));
        }
        query
    }
}

/// Create a candidate via `POST /candidates/`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn create(
    client: &ApiClient,
    candidate: &NewCandidate,
    token: Option<&str>,
) -> Result<Candidate, ApiError> {
    let body = client.post_json("/candidates/", candidate, token).await?;
    Ok(from_value(body)?)
}

/// Bulk-import candidates from a spreadsheet via `POST /candidates/import`.
///
/// The file travels as a multipart part named `file`. The backend accepts
/// CSV and XLSX.
///
/// # Errors
///
/// Returns `ApiError::Backend` when the declared media type is not
/// supported, and the usual transport/decode errors otherwise.
pub async fn import(
    client: &ApiClient,
    file_name: &str,
    media_type: &str,
    contents: Vec<u8>,
    token: Option<&str>,
) -> Result<ImportOutcome, ApiError> {
    let part = Part::bytes(contents).file_name(file_name.to_owned()).mime_str(media_type)?;
    let form = Form::new().part("file", part);
    let body = client.post_multipart("/candidates/import", &[], form, token).await?;
    Ok(from_value(body)?)
}

/// Page through the candidate pool via `GET /candidates/`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn list(
    client: &ApiClient,
    filter: &CandidateFilter,
    token: Option<&str>,
) -> Result<CandidateList, ApiError> {
    let body = client.get_query("/candidates/", &filter.to_query(), token).await?;
    Ok(from_value(body)?)
}

/// Fetch a single candidate via `GET /candidates/{id}`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn get(client: &ApiClient, id: Uuid, token: Option<&str>) -> Result<Candidate, ApiError> {
    let body = client.get(&candidate_path(id), token).await?;
    Ok(from_value(body)?)
}

/// Apply a partial update via `PUT /candidates/{id}`.
///
/// Only fields set on `update` are sent, so everything else keeps its
/// stored value.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn update(
    client: &ApiClient,
    id: Uuid,
    update: &CandidateUpdate,
    token: Option<&str>,
) -> Result<Candidate, ApiError> {
    let body = client.put_json(&candidate_path(id), update, token).await?;
    Ok(from_value(body)?)
}

/// Delete a candidate via `DELETE /candidates/{id}`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure or backend rejection.
pub async fn delete(client: &ApiClient, id: Uuid, token: Option<&str>) -> Result<(), ApiError> {
    client.delete(&candidate_path(id), token).await?;
    Ok(())
}

#[cfg(test)]
#[path = "candidates_test.rs"]
mod tests;
