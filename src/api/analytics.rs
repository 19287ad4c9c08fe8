//! Pool analytics endpoints.

use serde_json::from_value;

use super::types::{AnalyticsOverview, RediscoveryAnalytics};
use super::{ApiClient, ApiError};

/// Fetch pool-wide counts and top skills via `GET /analytics/overview`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn overview(client: &ApiClient, token: Option<&str>) -> Result<AnalyticsOverview, ApiError> {
    let body = client.get("/analytics/overview", token).await?;
    Ok(from_value(body)?)
}

/// Fetch rediscovery statistics via `GET /analytics/rediscovery`.
///
/// # Errors
///
/// Returns `ApiError` on transport failure, backend rejection, or an
/// unexpected response shape.
pub async fn rediscovery(client: &ApiClient, token: Option<&str>) -> Result<RediscoveryAnalytics, ApiError> {
    let body = client.get("/analytics/rediscovery", token).await?;
    Ok(from_value(body)?)
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
