//! # talenthunt
//!
//! Rust client for the `TalentHunt` recruiting backend: a typed HTTP API
//! surface, a persistent login session layer, and helpers that turn match
//! results into interview briefing content.
//!
//! ARCHITECTURE
//! ============
//! - `api` owns the HTTP transport: URL shaping, bearer-token injection,
//!   multipart uploads, and translation of backend error envelopes into
//!   `ApiError`. Endpoint modules under it are thin typed wrappers.
//! - `session` owns authentication state: an explicit `SessionStore` state
//!   machine hydrated once from a persisted token and mutated only by
//!   login, register, and logout.
//! - `briefing` derives talking points and risk indicators from match
//!   results, entirely client-side.
//! - `config` resolves the base URL and token path from the environment.

pub mod api;
pub mod briefing;
pub mod config;
pub mod session;

#[cfg(test)]
pub(crate) mod test_backend;
