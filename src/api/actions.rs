//! Recruiter action (interaction) endpoints.

use serde_json::from_value;
use uuid::Uuid;

use super::types::{Interaction, NewInteraction};
use super::{ApiClient, ApiError};

fn history_path(candidate_id: Uuid) -> String {
    format!("/actions/candidate/{candidate_id}")
}

/// Record an action against a candidate via `POST /actions/`.
///
/// Recording also refreshes the candidate's `last_interaction` timestamp,
/// which feeds recency scoring on later match runs.
///
/// # Errors
///
/// Returns `ApiError::Backend` when the action name is not one the
/// backend accepts, and the usual transport/decode errors otherwise.
pub async fn record(
    client: &ApiClient,
    interaction: &NewInteraction,
    token: Option<&str>,
) -> Result<Interaction, ApiError> {
    let body = client.post_json("/actions/", interaction, token).await?;
    Ok(from_value(body)?)
}

/// Fetch a candidate's action history via `GET /actions/candidate/{id}`,
/// most recent first.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn history(
    client: &ApiClient,
    candidate_id: Uuid,
    token: Option<&str>,
) -> Result<Vec<Interaction>, ApiError> {
    let body = client.get(&history_path(candidate_id), token).await?;
    Ok(from_value(body)?)
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
