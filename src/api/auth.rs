//! Authentication endpoints.

use serde_json::from_value;

use super::types::{LoginRequest, RegisterRequest, TokenResponse, User};
use super::{ApiClient, ApiError};

/// Create a company and its first (admin) user via `POST /auth/register`.
///
/// # Errors
///
/// Returns `ApiError::Backend` when the email is already registered, and
/// the usual transport/decode errors otherwise.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
    let body = client.post_json("/auth/register", request, None).await?;
    Ok(from_value(body)?)
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// # Errors
///
/// Returns `ApiError::Backend` with the backend's own message (for bad
/// credentials: `Invalid email or password`), and the usual
/// transport/decode errors otherwise.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
    let body = client.post_json("/auth/login", request, None).await?;
    Ok(from_value(body)?)
}

/// Fetch the user a token belongs to via `GET /auth/me`.
///
/// # Errors
///
/// Returns `ApiError::Backend` with status 401 when the token is missing,
/// expired, or revoked.
pub async fn me(client: &ApiClient, token: Option<&str>) -> Result<User, ApiError> {
    let body = client.get("/auth/me", token).await?;
    Ok(from_value(body)?)
}
