//! Job description endpoints.

use reqwest::multipart::{Form, Part};
use serde_json::from_value;
use uuid::Uuid;

use super::types::{JobDescription, JobList, NewJob, ParsedJob};
use super::{ApiClient, ApiError};

fn job_path(id: Uuid) -> String {
    format!("/jobs/{id}")
}

fn parse_path(id: Uuid) -> String {
    format!("/jobs/{id}/parse")
}

/// Create a job description from raw text via `POST /jobs/`.
///
/// The backend parses the text into structured requirements as part of
/// creation; the response carries them in `parsed_data`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn create(client: &ApiClient, job: &NewJob, token: Option<&str>) -> Result<JobDescription, ApiError> {
    let body = client.post_json("/jobs/", job, token).await?;
    Ok(from_value(body)?)
}

/// Upload a job description file via `POST /jobs/upload`.
///
/// The title travels as a query parameter and the file as a multipart
/// part named `file`. The backend accepts PDF, DOCX, and plain text.
///
/// # Errors
///
/// Returns `ApiError::Backend` when the declared media type is not
/// supported, and the usual transport/decode errors otherwise.
pub async fn upload(
    client: &ApiClient,
    title: &str,
    file_name: &str,
    media_type: &str,
    contents: Vec<u8>,
    token: Option<&str>,
) -> Result<JobDescription, ApiError> {
    let part = Part::bytes(contents).file_name(file_name.to_owned()).mime_str(media_type)?;
    let form = Form::new().part("file", part);
    let body = client
        .post_multipart("/jobs/upload", &[("title", title.to_owned())], form, token)
        .await?;
    Ok(from_value(body)?)
}

/// List this company's job descriptions via `GET /jobs/`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn list(client: &ApiClient, token: Option<&str>) -> Result<JobList, ApiError> {
    let body = client.get("/jobs/", token).await?;
    Ok(from_value(body)?)
}

/// Fetch a single job description via `GET /jobs/{id}`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn get(client: &ApiClient, id: Uuid, token: Option<&str>) -> Result<JobDescription, ApiError> {
    let body = client.get(&job_path(id), token).await?;
    Ok(from_value(body)?)
}

/// Re-run requirement extraction via `POST /jobs/{id}/parse`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn parse(client: &ApiClient, id: Uuid, token: Option<&str>) -> Result<ParsedJob, ApiError> {
    let body = client.post_empty(&parse_path(id), token).await?;
    Ok(from_value(body)?)
}

/// Delete a job description via `DELETE /jobs/{id}`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure or backend rejection.
pub async fn delete(client: &ApiClient, id: Uuid, token: Option<&str>) -> Result<(), ApiError> {
    client.delete(&job_path(id), token).await?;
    Ok(())
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;
