//! REST endpoints driving one onboarding wizard session.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use super::keys::KeyChord;
use super::manager::OnboardingManager;
use super::model::CandidateDraft;
use super::state::StepChange;
use crate::error::{Error, WizardError};

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<OnboardingManager>,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/onboarding/status
async fn get_status(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    Json(state.manager.status().await)
}

/// PUT /api/onboarding/draft
///
/// Replaces the draft wholesale; the step does not change.
async fn put_draft(
    State(state): State<OnboardingRouteState>,
    Json(draft): Json<CandidateDraft>,
) -> impl IntoResponse {
    state.manager.replace_draft(draft).await;
    Json(state.manager.status().await)
}

/// Map a navigation result to a response carrying the fresh status.
async fn navigation_response(state: &OnboardingRouteState, change: StepChange) -> Response {
    let status = state.manager.status().await;
    let code = match change {
        StepChange::Blocked { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StepChange::Moved { .. } | StepChange::Unchanged => StatusCode::OK,
    };
    (
        code,
        Json(serde_json::json!({ "change": change, "status": status })),
    )
        .into_response()
}

/// POST /api/onboarding/advance
async fn advance(State(state): State<OnboardingRouteState>) -> Response {
    let change = state.manager.advance().await;
    navigation_response(&state, change).await
}

/// POST /api/onboarding/retreat
async fn retreat(State(state): State<OnboardingRouteState>) -> Response {
    let change = state.manager.retreat().await;
    navigation_response(&state, change).await
}

/// POST /api/onboarding/key
///
/// Keyboard shortcut forwarding; unbound chords are a no-op.
async fn key(
    State(state): State<OnboardingRouteState>,
    Json(chord): Json<KeyChord>,
) -> Response {
    let change = state
        .manager
        .handle_key(chord)
        .await
        .unwrap_or(StepChange::Unchanged);
    navigation_response(&state, change).await
}

/// POST /api/onboarding/reset
async fn reset(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    state.manager.reset().await;
    Json(state.manager.status().await)
}

/// GET /api/onboarding/review
async fn review(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    Json(state.manager.review().await)
}

/// POST /api/onboarding/submit
async fn submit(State(state): State<OnboardingRouteState>) -> Response {
    match state.manager.submit().await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::json!({"status": "submitted", "message": created.message})),
        )
            .into_response(),
        Err(e) => {
            let code = match &e {
                Error::Wizard(
                    WizardError::AlreadySubmitting | WizardError::NotAtReview { .. },
                ) => StatusCode::CONFLICT,
                Error::Wizard(WizardError::LocalValidation { .. }) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                Error::Submission(_) => StatusCode::BAD_GATEWAY,
                Error::Config(_) | Error::Api(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = match e {
                Error::Wizard(inner) => inner.to_string(),
                Error::Submission(inner) => inner.message,
                other => other.to_string(),
            };
            (code, Json(serde_json::json!({"error": message}))).into_response()
        }
    }
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/draft", put(put_draft))
        .route("/api/onboarding/advance", post(advance))
        .route("/api/onboarding/retreat", post(retreat))
        .route("/api/onboarding/key", post(key))
        .route("/api/onboarding/reset", post(reset))
        .route("/api/onboarding/review", get(review))
        .route("/api/onboarding/submit", post(submit))
        .with_state(state)
}
