//! Route configuration for the consultant endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    generate_reply, health, improve_ai, improve_ai_manually, load_training_data,
    parse_conversations,
};
use crate::adapters::http::state::AppState;

/// Creates the consultant router for single-request endpoints.
///
/// Routes:
/// - `GET /health`
/// - `POST /generate-reply`
/// - `POST /improve-ai`
/// - `POST /improve-ai-manually`
/// - `POST /parse-conversations`
pub fn consultant_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/generate-reply", post(generate_reply))
        .route("/improve-ai", post(improve_ai))
        .route("/improve-ai-manually", post(improve_ai_manually))
        .route("/parse-conversations", post(parse_conversations))
}

/// Creates the router for batch training.
///
/// Routes:
/// - `POST /load-training-data`
///
/// A batch makes two model calls per example, so its run time grows with
/// the input. Each call is still bounded by the provider timeout.
pub fn training_router() -> Router<AppState> {
    Router::new().route("/load-training-data", post(load_training_data))
}
