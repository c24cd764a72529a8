use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::contact::ContactViolations;
use super::domain::ContactForm;
use super::repository::LeadRepository;
use super::service::LeadCaptureService;
use crate::funnel::quiz::{
    AnswerSheet, QuizCatalog, QuizSession, ResultTier, SaveState, SessionError, SessionId,
    SessionStore, StepIndex,
};
use crate::funnel::results::{case_study_for_persona, content_for};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId::new(format!("session-{id:06}"))
}

/// Shared state behind every funnel endpoint.
pub struct FunnelState<S, R> {
    catalog: QuizCatalog,
    sessions: Arc<S>,
    leads: LeadCaptureService<R>,
}

impl<S, R> FunnelState<S, R>
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    pub fn new(sessions: Arc<S>, repository: Arc<R>) -> Self {
        Self {
            catalog: QuizCatalog::standard(),
            sessions,
            leads: LeadCaptureService::new(repository),
        }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    fn open(&self, id: SessionId) -> QuizSession<S> {
        QuizSession::resume_or_start(self.sessions.clone(), id)
    }
}

/// Router builder exposing the quiz funnel endpoints.
pub fn funnel_router<S, R>(state: Arc<FunnelState<S, R>>) -> Router
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/v1/quiz/questions", get(catalog_handler::<S, R>))
        .route("/api/v1/quiz/sessions", post(open_session_handler::<S, R>))
        .route(
            "/api/v1/quiz/sessions/:session_id",
            get(session_handler::<S, R>).delete(reset_handler::<S, R>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/answers/:step",
            put(set_answer_handler::<S, R>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/step",
            put(set_step_handler::<S, R>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/result",
            get(session_result_handler::<S, R>),
        )
        .route(
            "/api/v1/quiz/sessions/:session_id/submission",
            post(submission_handler::<S, R>),
        )
        .route(
            "/api/v1/quiz/results/:tier",
            get(result_content_handler::<S, R>),
        )
        .route("/api/v1/leads", get(recent_leads_handler::<S, R>))
        .route("/api/v1/leads/export", get(export_handler::<S, R>))
        .with_state(state)
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct OpenSessionRequest {
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerBody {
    value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StepBody {
    step: StepIndex,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    20
}

fn session_view<S: SessionStore>(
    status: StatusCode,
    session: &QuizSession<S>,
    saved: Option<&SaveState>,
) -> Response {
    let mut payload = json!({
        "session_id": session.id().as_str(),
        "current_step": session.current_step(),
        "answers": session.answers(),
    });
    if let Some(saved) = saved {
        payload["durable"] = json!(saved.is_durable());
    }
    (status, axum::Json(payload)).into_response()
}

fn invalid_step_response(err: SessionError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

pub(crate) async fn catalog_handler<S, R>(State(state): State<Arc<FunnelState<S, R>>>) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let payload = json!({
        "total_steps": state.catalog.total_steps(),
        "questions": state.catalog.questions(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn open_session_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    body: Option<axum::Json<OpenSessionRequest>>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let requested = body.and_then(|axum::Json(request)| request.session_id);
    let id = match requested {
        Some(raw) if !raw.trim().is_empty() => SessionId::new(raw.trim().to_string()),
        _ => next_session_id(),
    };

    let session = state.open(id);
    session_view(StatusCode::CREATED, &session, None)
}

pub(crate) async fn session_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let session = state.open(SessionId::new(session_id));
    session_view(StatusCode::OK, &session, None)
}

pub(crate) async fn set_answer_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path((session_id, step)): Path<(String, StepIndex)>,
    axum::Json(body): axum::Json<AnswerBody>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let mut session = state.open(SessionId::new(session_id));
    match session.set_answer(step, body.value) {
        Ok(saved) => session_view(StatusCode::OK, &session, Some(&saved)),
        Err(err) => invalid_step_response(err),
    }
}

pub(crate) async fn set_step_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path(session_id): Path<String>,
    axum::Json(body): axum::Json<StepBody>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let mut session = state.open(SessionId::new(session_id));
    match session.set_current_step(body.step) {
        Ok(saved) => session_view(StatusCode::OK, &session, Some(&saved)),
        Err(err) => invalid_step_response(err),
    }
}

pub(crate) async fn reset_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let mut session = state.open(SessionId::new(session_id));
    let saved = session.reset();
    session_view(StatusCode::OK, &session, Some(&saved))
}

pub(crate) async fn session_result_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let session = state.open(SessionId::new(session_id));
    let classification = session.classification();
    let case_study = AnswerSheet::new(session.answers())
        .persona()
        .and_then(case_study_for_persona);

    let payload = json!({
        "session_id": session.id().as_str(),
        "tier": classification.tier,
        "rule": classification.rule,
        "rule_detail": classification.rule.describe(),
        "case_study": case_study,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submission_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Path(session_id): Path<String>,
    axum::Json(form): axum::Json<ContactForm>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    let session = state.open(SessionId::new(session_id));
    match state.leads.submit(session.id(), session.answers(), &form) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(violations) => violations_response(violations),
    }
}

fn violations_response(violations: ContactViolations) -> Response {
    let fields: Vec<_> = violations
        .0
        .iter()
        .map(|violation| {
            json!({
                "field": violation.field(),
                "message": violation.message(),
            })
        })
        .collect();
    let payload = json!({
        "error": "contact validation failed",
        "violations": fields,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

pub(crate) async fn result_content_handler<S, R>(
    State(_state): State<Arc<FunnelState<S, R>>>,
    Path(tier): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    match ResultTier::from_label(&tier) {
        Some(tier) => (StatusCode::OK, axum::Json(content_for(tier))).into_response(),
        None => {
            let payload = json!({ "error": format!("unknown result tier: {tier}") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recent_leads_handler<S, R>(
    State(state): State<Arc<FunnelState<S, R>>>,
    Query(query): Query<RecentQuery>,
) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    match state.leads.recent_leads(query.limit) {
        Ok(leads) => (StatusCode::OK, axum::Json(leads)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_handler<S, R>(State(state): State<Arc<FunnelState<S, R>>>) -> Response
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    match state.leads.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            csv,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
