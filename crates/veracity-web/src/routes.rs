//! Web routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use veracity_facts::{FactPresenter, PresentedFact};
use veracity_store::{DEFAULT_LEADERBOARD_LIMIT, LeaderboardRow, StoreClient, StreakUpdate};

use crate::WebError;

/// Shared state for the web server.
pub struct AppState {
    pub presenter: FactPresenter,
    pub store: StoreClient,
}

/// Create the web router.
pub fn create_router(presenter: FactPresenter, store: StoreClient) -> Router {
    let state = Arc::new(AppState { presenter, store });

    Router::new()
        .route("/api/get-fact", get(get_fact))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/answer", post(submit_answer))
        .route("/api/username", post(set_username))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, WebError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(WebError::MissingToken)
}

async fn get_fact(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PresentedFact>, WebError> {
    let presented = state.presenter.present().await?;
    Ok(Json(presented))
}

async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardRow>>, WebError> {
    let rows = state.store.top_streaks(DEFAULT_LEADERBOARD_LIMIT).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    correct: bool,
}

async fn submit_answer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<StreakUpdate>, WebError> {
    let token = bearer_token(&headers)?;
    let user = state.store.resolve_user(token).await?;

    // Prior values come from the profile row; a missing row means this is the
    // player's first recorded answer.
    let (prior_current, prior_highest) = state
        .store
        .fetch_profile(user.id)
        .await?
        .map(|p| (p.current_streak, p.highest_streak))
        .unwrap_or((0, 0));

    let update = state
        .store
        .update_streak(user.id, request.correct, prior_current, prior_highest)
        .await?;

    info!(
        user_id = %user.id,
        correct = request.correct,
        current = update.current_streak,
        "recorded answer"
    );
    Ok(Json(update))
}

#[derive(Debug, Deserialize)]
struct UsernameRequest {
    username: String,
}

#[derive(Debug, Serialize)]
struct UsernameResponse {
    username: String,
}

async fn set_username(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<UsernameResponse>, WebError> {
    let token = bearer_token(&headers)?;
    let user = state.store.resolve_user(token).await?;

    let username = state.store.set_username(user.id, &request.username).await?;
    Ok(Json(UsernameResponse { username }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
