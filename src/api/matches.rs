//! Match computation and results endpoints.

use serde_json::from_value;
use uuid::Uuid;

use super::types::{MatchComputation, MatchList};
use super::{ApiClient, ApiError};

fn compute_path(job_id: Uuid) -> String {
    format!("/matches/compute/{job_id}")
}

fn results_path(job_id: Uuid) -> String {
    format!("/matches/{job_id}/results")
}

/// Score the whole candidate pool against a job via
/// `POST /matches/compute/{job_id}`.
///
/// # Errors
///
/// Returns `ApiError::Backend` when the job has not been parsed yet or no
/// candidates exist, and the usual transport/decode errors otherwise.
pub async fn compute(client: &ApiClient, job_id: Uuid, token: Option<&str>) -> Result<MatchComputation, ApiError> {
    let body = client.post_empty(&compute_path(job_id), token).await?;
    Ok(from_value(body)?)
}

/// Fetch ranked match results via `GET /matches/{job_id}/results`.
///
/// Results embed candidate profiles and any rediscovery signals attached
/// during computation.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn results(client: &ApiClient, job_id: Uuid, token: Option<&str>) -> Result<MatchList, ApiError> {
    let body = client.get(&results_path(job_id), token).await?;
    Ok(from_value(body)?)
}

#[cfg(test)]
#[path = "matches_test.rs"]
mod tests;
