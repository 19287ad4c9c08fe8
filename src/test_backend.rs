//! In-process `TalentHunt` backend stub for client tests.
//!
//! DESIGN
//! ======
//! The client's interesting behavior (bearer injection, multipart
//! encoding, error envelope translation) only shows up across a real
//! HTTP boundary, so tests talk to this stub over a loopback socket
//! instead of faking responses in memory. The stub serves the routes the
//! tests exercise, issues real-looking tokens, and records requests for
//! assertions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::token_store::MemoryTokenStore;

/// Email of the stub's one seeded user.
pub const EMAIL: &str = "recruiter@acme.test";
/// Password the stub accepts for [`EMAIL`].
pub const PASSWORD: &str = "correct horse battery";

/// A multipart part as the stub received it.
#[derive(Clone, Debug)]
pub struct UploadRecord {
    pub part_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Shared stub state, inspectable from tests.
pub struct Backend {
    pub user_id: Uuid,
    pub company_id: Uuid,
    tokens: Mutex<HashMap<String, String>>,
    next_token: AtomicUsize,
    me_calls: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
    last_query: Mutex<Option<HashMap<String, String>>>,
    last_upload: Mutex<Option<UploadRecord>>,
}

impl Backend {
    fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            tokens: Mutex::new(HashMap::new()),
            next_token: AtomicUsize::new(1),
            me_calls: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
            last_query: Mutex::new(None),
            last_upload: Mutex::new(None),
        }
    }

    /// Mint a token the stub will accept, as login would.
    pub fn issue_token(&self, email: &str) -> String {
        let token = format!("token-{}", self.next_token.fetch_add(1, Ordering::SeqCst));
        self.tokens.lock().unwrap().insert(token.clone(), email.to_owned());
        token
    }

    pub fn me_call_count(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn last_upload(&self) -> Option<UploadRecord> {
        self.last_upload.lock().unwrap().clone()
    }

    /// Record the auth header and resolve it to the email it was issued
    /// for, if the token is one the stub handed out.
    fn authenticated(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        *self.last_authorization.lock().unwrap() = raw.clone();
        let token = raw?.strip_prefix("Bearer ")?.to_owned();
        self.tokens.lock().unwrap().get(&token).cloned()
    }

    fn user_json(&self, email: &str) -> Value {
        json!({
            "id": self.user_id.to_string(),
            "company_id": self.company_id.to_string(),
            "email": email,
            "name": "Avery Recruiter",
            "role": "admin",
            "created_at": "2026-01-10T09:00:00"
        })
    }

    fn token_response(&self, email: &str) -> Value {
        let token = self.issue_token(email);
        json!({
            "access_token": token,
            "token_type": "bearer",
            "user": self.user_json(email)
        })
    }

    fn job_json(&self, id: Uuid, title: &str, raw_text: &str) -> Value {
        json!({
            "id": id.to_string(),
            "company_id": self.company_id.to_string(),
            "created_by": self.user_id.to_string(),
            "title": title,
            "raw_text": raw_text,
            "parsed_data": {"skills": {"mandatory": ["rust"], "optional": []}},
            "status": "active",
            "created_at": "2026-01-12T08:30:00",
            "updated_at": "2026-01-12T08:30:00"
        })
    }

    fn candidate_json(&self, name: &str) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "company_id": self.company_id.to_string(),
            "name": name,
            "email": "candidate@example.test",
            "phone": null,
            "skills": ["rust", "postgres"],
            "experience_years": 6.0,
            "current_status": "available",
            "last_interaction": null,
            "previous_submissions": [],
            "availability": "immediate",
            "salary_expectation": null,
            "salary_currency": "USD",
            "location": "Berlin",
            "open_to_remote": "true",
            "notes": null,
            "seniority": "senior",
            "industry": "fintech",
            "created_at": "2025-12-01T10:00:00",
            "updated_at": "2026-02-01T10:00:00"
        })
    }

    fn match_json(&self) -> Value {
        json!({
            "id": Uuid::new_v4().to_string(),
            "job_id": Uuid::new_v4().to_string(),
            "candidate_id": Uuid::new_v4().to_string(),
            "overall_score": 91.0,
            "confidence": 88.0,
            "skill_score": 95.0,
            "experience_score": 90.0,
            "seniority_score": 85.0,
            "location_score": 100.0,
            "compensation_score": 75.0,
            "recency_score": 80.0,
            "domain_score": 92.0,
            "availability_score": 100.0,
            "strengths": ["Covers all mandatory skills"],
            "weaknesses": [],
            "explanation": {},
            "rediscovery_signals": [],
            "candidate": self.candidate_json("Dana Velasquez"),
            "created_at": "2026-02-15T12:00:00"
        })
    }
}

/// A running stub: its base URL (including the API prefix) and shared
/// state for assertions.
pub struct TestBackend {
    pub base_url: String,
    pub state: Arc<Backend>,
}

/// Bind an ephemeral loopback port and serve the stub on it.
pub async fn spawn() -> TestBackend {
    let state = Arc::new(Backend::new());
    let app = router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestBackend { base_url: format!("http://{addr}/api/v1"), state }
}

/// An `ApiClient` against `base_url` backed by a fresh in-memory token
/// store, returned alongside the store for seeding and inspection.
pub fn test_client(base_url: &str) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::default());
    let config = ClientConfig {
        base_url: base_url.to_owned(),
        token_path: std::env::temp_dir().join("talenthunt-test-unused"),
    };
    let client = ApiClient::new(&config, store.clone());
    (client, store)
}

fn router(state: Arc<Backend>) -> Router {
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/jobs/", get(list_jobs).post(create_job))
        .route("/jobs/upload", post(upload_job))
        .route("/jobs/{id}", get(get_job).delete(delete_job))
        .route("/jobs/{id}/parse", post(parse_job))
        .route("/candidates/", get(list_candidates).post(create_candidate))
        .route("/candidates/import", post(import_candidates))
        .route("/candidates/{id}", get(get_candidate).put(update_candidate).delete(delete_candidate))
        .route("/matches/compute/{job_id}", post(compute_matches))
        .route("/matches/{job_id}/results", get(match_results))
        .route("/actions/", post(record_action))
        .route("/actions/candidate/{id}", get(candidate_actions))
        .route("/search/agent", post(agent_search))
        .route("/analytics/overview", get(analytics_overview))
        .route("/analytics/rediscovery", get(analytics_rediscovery))
        .route("/broken/plain", get(broken_plain))
        .route("/broken/bare", get(broken_bare))
        .route("/broken/detail", get(broken_detail));
    Router::new().nest("/api/v1", api).with_state(state)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, axum::Json(json!({"detail": "Invalid or expired token"}))).into_response()
}

async fn register(State(state): State<Arc<Backend>>, axum::Json(body): axum::Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or(EMAIL).to_owned();
    (StatusCode::CREATED, axum::Json(state.token_response(&email))).into_response()
}

async fn login(State(state): State<Arc<Backend>>, axum::Json(body): axum::Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        axum::Json(state.token_response(EMAIL)).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, axum::Json(json!({"detail": "Invalid email or password"}))).into_response()
    }
}

async fn me(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    match state.authenticated(&headers) {
        Some(email) => axum::Json(state.user_json(&email)).into_response(),
        None => unauthorized(),
    }
}

async fn list_jobs(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let job = state.job_json(Uuid::new_v4(), "Backend Engineer", "We need a Rust engineer.");
    axum::Json(json!({"jobs": [job], "total": 1})).into_response()
}

async fn create_job(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let title = body["title"].as_str().unwrap_or_default();
    let raw_text = body["raw_text"].as_str().unwrap_or_default();
    (StatusCode::CREATED, axum::Json(state.job_json(Uuid::new_v4(), title, raw_text))).into_response()
}

async fn get_job(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(state.job_json(id, "Backend Engineer", "We need a Rust engineer.")).into_response()
}

async fn upload_job(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    multipart: Multipart,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let record = read_first_part(multipart).await;
    let raw_text = String::from_utf8_lossy(&record.bytes).into_owned();
    *state.last_upload.lock().unwrap() = Some(record);
    let title = params.get("title").cloned().unwrap_or_default();
    (StatusCode::CREATED, axum::Json(state.job_json(Uuid::new_v4(), &title, &raw_text))).into_response()
}

async fn parse_job(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "skills": {"mandatory": ["rust", "sql"], "optional": ["kubernetes"]},
        "seniority": "senior",
        "experience_range": {"min": 5.0, "max": 10.0},
        "tools": ["git"],
        "industry": "fintech",
        "location": "Berlin",
        "salary_band": {"min": 120000, "max": 160000, "currency": "EUR"},
        "domain": "backend"
    }))
    .into_response()
}

async fn delete_job(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_candidates(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let page = params.get("page").and_then(|raw| raw.parse::<i64>().ok()).unwrap_or(1);
    let per_page = params.get("per_page").and_then(|raw| raw.parse::<i64>().ok()).unwrap_or(20);
    *state.last_query.lock().unwrap() = Some(params);
    axum::Json(json!({
        "candidates": [state.candidate_json("Dana Velasquez")],
        "total": 1,
        "page": page,
        "per_page": per_page
    }))
    .into_response()
}

async fn create_candidate(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let name = body["name"].as_str().unwrap_or_default();
    (StatusCode::CREATED, axum::Json(state.candidate_json(name))).into_response()
}

async fn import_candidates(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let record = read_first_part(multipart).await;
    *state.last_upload.lock().unwrap() = Some(record);
    (
        StatusCode::CREATED,
        axum::Json(json!({"imported": 2, "message": "Successfully imported 2 candidates"})),
    )
        .into_response()
}

async fn get_candidate(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(state.candidate_json("Dana Velasquez")).into_response()
}

async fn update_candidate(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(_id): Path<Uuid>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    let name = body["name"].as_str().unwrap_or("Dana Velasquez");
    axum::Json(state.candidate_json(name)).into_response()
}

async fn delete_candidate(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn compute_matches(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(job_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "message": "Computed 1 matches",
        "total_matches": 1,
        "job_id": job_id.to_string()
    }))
    .into_response()
}

async fn match_results(State(state): State<Arc<Backend>>, headers: HeaderMap, Path(_job_id): Path<Uuid>) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "matches": [state.match_json()],
        "total": 1,
        "job_title": "Backend Engineer"
    }))
    .into_response()
}

async fn record_action(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    (
        StatusCode::CREATED,
        axum::Json(json!({
            "id": Uuid::new_v4().to_string(),
            "candidate_id": body["candidate_id"],
            "user_id": state.user_id.to_string(),
            "job_id": body.get("job_id").cloned().unwrap_or(Value::Null),
            "action": body["action"],
            "notes": body.get("notes").cloned().unwrap_or(Value::Null),
            "created_at": "2026-03-02T11:00:00"
        })),
    )
        .into_response()
}

async fn candidate_actions(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(candidate_id): Path<Uuid>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!([{
        "id": Uuid::new_v4().to_string(),
        "candidate_id": candidate_id.to_string(),
        "user_id": state.user_id.to_string(),
        "job_id": null,
        "action": "contacted",
        "notes": "Reached out on Tuesday",
        "created_at": "2026-03-02T11:00:00"
    }]))
    .into_response()
}

async fn agent_search(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    axum::Json(_body): axum::Json<Value>,
) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "candidates": [state.candidate_json("Dana Velasquez")],
        "interpretation": "Senior Rust engineers in Berlin",
        "filters_applied": {"skills": ["rust"], "location": "Berlin"}
    }))
    .into_response()
}

async fn analytics_overview(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "total_candidates": 128,
        "total_jobs": 7,
        "total_matches": 54,
        "rediscovery_signals_count": 12,
        "avg_match_score": 71.4,
        "top_skills": [{"skill": "rust", "count": 34}],
        "recent_activity": []
    }))
    .into_response()
}

async fn analytics_rediscovery(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if state.authenticated(&headers).is_none() {
        return unauthorized();
    }
    axum::Json(json!({
        "total_signals": 12,
        "signals_by_type": {"now_available": 5, "near_miss": 7},
        "top_rediscovered_candidates": [],
        "rediscovery_rate": 0.22
    }))
    .into_response()
}

async fn broken_plain() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}

async fn broken_bare() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(json!({"error": "overloaded"}))).into_response()
}

async fn broken_detail() -> Response {
    (StatusCode::CONFLICT, axum::Json(json!({"detail": "Candidate already exists"}))).into_response()
}

async fn read_first_part(mut multipart: Multipart) -> UploadRecord {
    let field = multipart.next_field().await.unwrap().unwrap();
    let part_name = field.name().unwrap_or_default().to_owned();
    let file_name = field.file_name().map(ToOwned::to_owned);
    let content_type = field.content_type().map(ToOwned::to_owned);
    let bytes = field.bytes().await.unwrap().to_vec();
    UploadRecord { part_name, file_name, content_type, bytes }
}
