//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Resolved client configuration: where the backend lives and where the
/// session token is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL including the API prefix, without a trailing slash.
    pub base_url: String,
    /// File the session token is read from and written to.
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Build client config from environment variables.
    ///
    /// Optional:
    /// - `TALENTHUNT_BASE_URL`: default `http://127.0.0.1:8000/api/v1`
    /// - `TALENTHUNT_TOKEN_FILE`: default `<config dir>/talenthunt/token`
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("TALENTHUNT_BASE_URL").ok(),
            std::env::var("TALENTHUNT_TOKEN_FILE").ok().map(PathBuf::from),
        )
    }

    /// Apply defaults to whichever settings are absent.
    #[must_use]
    pub fn resolve(base_url: Option<String>, token_path: Option<PathBuf>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        Self { base_url, token_path: token_path.unwrap_or_else(default_token_path) }
    }
}

/// Default location for the persisted session token.
///
/// Falls back to the current directory when the platform config directory
/// cannot be determined (some containerized environments).
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("talenthunt")
        .join("token")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
