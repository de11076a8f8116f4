//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::handler::{TurnEvent, TurnResponse};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/turn", post(handle_turn))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Handle one normalized conversational turn.
///
/// The handler never fails: every error becomes a spoken response, so
/// this endpoint always answers 200 with a `TurnResponse`.
async fn handle_turn(
    State(state): State<AppState>,
    Json(event): Json<TurnEvent>,
) -> Json<TurnResponse> {
    Json(state.handler.handle(event).await)
}
