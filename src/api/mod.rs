//! HTTP transport for the `TalentHunt` backend.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` owns a shared `reqwest::Client`, the resolved base URL, and
//! a handle to durable token storage. The endpoint modules (`auth`,
//! `jobs`, `candidates`, ...) are thin typed wrappers over the transport
//! methods here: they decide paths and payload shapes, the transport
//! decides headers, auth injection, and how failures become `ApiError`.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx response becomes `ApiError::Backend` carrying a
//! human-readable message: the backend's `detail` field when present,
//! `HTTP <status>` when the body is JSON without one, and a fixed fallback
//! when the body is not JSON at all. Transport failures and body decode
//! failures keep their source errors.

pub mod actions;
pub mod analytics;
pub mod auth;
pub mod candidates;
pub mod jobs;
pub mod matches;
pub mod search;
pub mod types;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::session::token_store::TokenStore;

/// Message used when an error response carries no parseable JSON body.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connect failure,
    /// TLS failure, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status. `message` is already
    /// suitable for display.
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// A 2xx response body did not decode as the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Shared HTTP client for all `TalentHunt` endpoints.
///
/// Cloning is cheap: the underlying connection pool and token store are
/// shared between clones.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client from resolved configuration and a token store.
    #[must_use]
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            tokens,
        }
    }

    /// The API base URL this client targets, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle to the token store this client reads bearer tokens from.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// `GET` a path and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        finish(self.begin(Method::GET, path, &[], token)).await
    }

    /// `GET` a path with query parameters and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        finish(self.begin(Method::GET, path, query, token)).await
    }

    /// `POST` a JSON payload and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn post_json<B>(&self, path: &str, body: &B, token: Option<&str>) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        finish(self.begin(Method::POST, path, &[], token).json(body)).await
    }

    /// `POST` with no body and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        finish(self.begin(Method::POST, path, &[], token)).await
    }

    /// `POST` a multipart form and return the decoded JSON body.
    ///
    /// The form's boundary-derived `Content-Type` is left untouched so
    /// uploads arrive exactly as the form encodes them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn post_multipart(
        &self,
        path: &str,
        query: &[(&str, String)],
        form: Form,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        finish(self.begin(Method::POST, path, query, token).multipart(form)).await
    }

    /// `PUT` a JSON payload and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn put_json<B>(&self, path: &str, body: &B, token: Option<&str>) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        finish(self.begin(Method::PUT, path, &[], token).json(body)).await
    }

    /// `DELETE` a path. `204 No Content` decodes to an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a body
    /// that is not valid JSON.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        finish(self.begin(Method::DELETE, path, &[], token)).await
    }

    fn begin(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.resolve_token(token) {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        request
    }

    /// An explicit token wins; otherwise fall back to whatever is
    /// persisted right now, so a token saved after this client was built
    /// is still picked up.
    fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        match explicit {
            Some(token) => Some(token.to_owned()),
            None => self.tokens.load(),
        }
    }
}

async fn finish(request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Object(Map::new()));
    }
    let body = response.bytes().await?;
    if status.is_success() {
        if body.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        return Ok(serde_json::from_slice(&body)?);
    }
    Err(ApiError::Backend {
        status: status.as_u16(),
        message: backend_error_message(status.as_u16(), &body),
    })
}

/// Derive the display message for a non-2xx response body.
fn backend_error_message(status: u16, body: &[u8]) -> String {
    let Ok(envelope) = serde_json::from_slice::<Value>(body) else {
        return FALLBACK_ERROR_MESSAGE.to_owned();
    };
    envelope
        .get("detail")
        .and_then(Value::as_str)
        .map_or_else(|| format!("HTTP {status}"), ToOwned::to_owned)
}

/// Best-effort media type for an upload, from the file extension.
///
/// The backend validates uploads by declared media type, so callers map
/// the formats it accepts here and handle everything else themselves.
#[must_use]
pub fn media_type_for(file_name: &str) -> Option<&'static str> {
    let extension = std::path::Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "xlsx" => Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
