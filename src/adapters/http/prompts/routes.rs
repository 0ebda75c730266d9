//! Route configuration for prompt version endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_prompt_history, rollback_prompt};
use crate::adapters::http::state::AppState;

/// Creates the prompts router.
///
/// Routes:
/// - `GET /prompts/:slot?limit=N` - Version history
/// - `POST /prompts/:slot/rollback` - Restore a version
pub fn prompts_router() -> Router<AppState> {
    Router::new()
        .route("/prompts/:slot", get(get_prompt_history))
        .route("/prompts/:slot/rollback", post(rollback_prompt))
}
