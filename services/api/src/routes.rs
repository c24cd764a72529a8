use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use candidacy_funnel::funnel::leads::{funnel_router, FunnelState, LeadRepository};
use candidacy_funnel::funnel::quiz::{
    classify_with_trace, AnswerMap, ResultTier, RuleMatch, SessionStore,
};
use candidacy_funnel::funnel::results::{content_for, ResultContent};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    pub(crate) answers: AnswerMap,
    #[serde(default)]
    pub(crate) include_content: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) tier: ResultTier,
    pub(crate) rule: RuleMatch,
    pub(crate) rule_detail: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) content: Option<ResultContent>,
}

pub(crate) fn with_funnel_routes<S, R>(state: Arc<FunnelState<S, R>>) -> axum::Router
where
    S: SessionStore + 'static,
    R: LeadRepository + 'static,
{
    funnel_router(state)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/classify", axum::routing::post(classify_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless classification preview. Integrations embedding the quiz
/// elsewhere can score an answer sheet without opening a session.
pub(crate) async fn classify_endpoint(
    Json(payload): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let ClassifyRequest {
        answers,
        include_content,
    } = payload;

    let classification = classify_with_trace(&answers);
    let content = include_content.then(|| content_for(classification.tier));

    Json(ClassifyResponse {
        tier: classification.tier,
        rule: classification.rule,
        rule_detail: classification.rule.describe(),
        content,
    })
}
