//! Wire-format DTOs for the `TalentHunt` HTTP API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's response and request schemas field for
//! field so serde can decode responses without translation layers. Fields
//! the backend defaults (`skills`, `metadata`, ...) carry `serde(default)`
//! so sparse payloads from older server builds still decode.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================
// Auth
// =============================================================

/// Payload for `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Company to create alongside the first user account.
    pub company_name: String,
    /// Display name of the new user.
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login or registration: a bearer token plus the user it
/// belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token for subsequent requests.
    pub access_token: String,
    /// Token scheme; the backend always issues `"bearer"`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Snapshot of the authenticated user.
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// An authenticated user as returned by `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Company this user belongs to; all data access is scoped to it.
    pub company_id: Uuid,
    pub email: String,
    /// Display name.
    pub name: String,
    /// Access role (`"admin"`, `"recruiter"`, or `"viewer"`).
    pub role: String,
    pub created_at: NaiveDateTime,
}

// =============================================================
// Job descriptions
// =============================================================

/// Payload for `POST /jobs/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    /// Full job description text to be parsed server-side.
    pub raw_text: String,
}

/// A stored job description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: Uuid,
    pub company_id: Uuid,
    /// User who created the job.
    pub created_by: Uuid,
    pub title: String,
    /// Original description text as submitted or extracted from an upload.
    pub raw_text: String,
    /// Server-side parse output, if parsing has run.
    #[serde(default)]
    pub parsed_data: Option<Value>,
    /// Lifecycle state (e.g. `"active"`).
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Response shape of `GET /jobs/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    pub jobs: Vec<JobDescription>,
    pub total: i64,
}

/// Structured requirements extracted from a job description by
/// `POST /jobs/{id}/parse`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedJob {
    /// Skill lists keyed by `"mandatory"` and `"optional"`.
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
    pub seniority: Option<String>,
    /// Year bounds keyed by `"min"` and `"max"`, when stated.
    #[serde(default)]
    pub experience_range: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub tools: Vec<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    /// Salary bounds and currency, when stated.
    #[serde(default)]
    pub salary_band: Option<Value>,
    pub domain: Option<String>,
}

// =============================================================
// Candidates
// =============================================================

/// Payload for `POST /candidates/`.
///
/// Optional fields are omitted from the JSON entirely so backend defaults
/// (`current_status = "available"`, `salary_currency = "USD"`, ...) apply
/// instead of being overwritten with nulls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_expectation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// String-typed flag (`"true"` / `"false"`), matching the backend
    /// schema rather than a boolean.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_to_remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Payload for `PUT /candidates/{id}`.
///
/// Every field is optional; the backend only applies fields that are
/// present, so `None` here means "leave unchanged", not "clear".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_expectation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_to_remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// A stored candidate profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: f64,
    /// Pipeline state (e.g. `"available"`, `"employed"`, `"unavailable"`).
    pub current_status: String,
    /// Most recent recorded interaction with this candidate, if any.
    pub last_interaction: Option<NaiveDateTime>,
    /// Prior submission records, open-ended per source system.
    #[serde(default)]
    pub previous_submissions: Vec<Value>,
    /// Start-date readiness (e.g. `"immediate"`, `"two_weeks"`).
    pub availability: String,
    pub salary_expectation: Option<f64>,
    pub salary_currency: String,
    pub location: Option<String>,
    /// String-typed flag (`"true"` / `"false"`), matching the backend
    /// schema rather than a boolean.
    pub open_to_remote: String,
    pub notes: Option<String>,
    pub seniority: Option<String>,
    pub industry: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Response shape of `GET /candidates/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateList {
    pub candidates: Vec<Candidate>,
    /// Total matching rows, not just this page.
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Response shape of `POST /candidates/import`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Number of candidate rows created.
    pub imported: i64,
    pub message: String,
}

// =============================================================
// Matches and rediscovery
// =============================================================

/// A scored job/candidate pairing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    /// Blended score on a 0-100 scale.
    pub overall_score: f64,
    /// How much profile data backed the scoring, 0-100.
    pub confidence: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub seniority_score: f64,
    pub location_score: f64,
    pub compensation_score: f64,
    pub recency_score: f64,
    pub domain_score: f64,
    pub availability_score: f64,
    /// Short human-readable positives from the scoring engine.
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Short human-readable concerns from the scoring engine.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Per-dimension scoring breakdown, open-ended.
    #[serde(default)]
    pub explanation: Value,
    /// Reasons this candidate resurfaced from the existing pool.
    #[serde(default)]
    pub rediscovery_signals: Vec<RediscoverySignal>,
    /// Embedded candidate profile, when the endpoint includes it.
    #[serde(default)]
    pub candidate: Option<Candidate>,
    pub created_at: NaiveDateTime,
}

/// Response shape of `GET /matches/{job_id}/results`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchList {
    pub matches: Vec<Match>,
    pub total: i64,
    pub job_title: String,
}

/// Response shape of `POST /matches/compute/{job_id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchComputation {
    pub message: String,
    pub total_matches: i64,
    pub job_id: Uuid,
}

/// A reason a dormant candidate was resurfaced for a job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RediscoverySignal {
    pub id: Uuid,
    /// Signal kind (e.g. `"now_available"`, `"near_miss"`,
    /// `"skills_now_trending"`).
    pub signal_type: String,
    /// Human-readable explanation shown to recruiters.
    pub reason: String,
    /// Points this signal added to the overall match score.
    pub score_boost: f64,
    /// Open-ended signal context from the rediscovery engine.
    #[serde(default)]
    pub metadata: Value,
    pub created_at: NaiveDateTime,
}

// =============================================================
// Interactions
// =============================================================

/// Payload for `POST /actions/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInteraction {
    pub candidate_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// One of `"contacted"`, `"pipelined"`, `"rejected"`, `"saved"`,
    /// `"exported"`, `"noted"`; the backend rejects anything else.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A recorded recruiter action on a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Uuid,
    pub candidate_id: Uuid,
    /// User who performed the action.
    pub user_id: Uuid,
    pub job_id: Option<Uuid>,
    pub action: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

// =============================================================
// Search and analytics
// =============================================================

/// Payload for `POST /search/agent`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query interpreted server-side into structured filters.
    pub query: String,
}

/// Response shape of `POST /search/agent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub candidates: Vec<Candidate>,
    /// How the backend understood the query.
    pub interpretation: String,
    /// Structured filters the backend derived and applied.
    #[serde(default)]
    pub filters_applied: Value,
}

/// Response shape of `GET /analytics/overview`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_candidates: i64,
    pub total_jobs: i64,
    pub total_matches: i64,
    pub rediscovery_signals_count: i64,
    pub avg_match_score: f64,
    /// Skill frequency entries, open-ended.
    #[serde(default)]
    pub top_skills: Vec<Value>,
    /// Recent interaction entries, open-ended.
    #[serde(default)]
    pub recent_activity: Vec<Value>,
}

/// Response shape of `GET /analytics/rediscovery`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RediscoveryAnalytics {
    pub total_signals: i64,
    #[serde(default)]
    pub signals_by_type: BTreeMap<String, i64>,
    /// Candidate summaries with signal counts, open-ended.
    #[serde(default)]
    pub top_rediscovered_candidates: Vec<Value>,
    /// Share of matches that carried at least one rediscovery signal.
    pub rediscovery_rate: f64,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
