//! HTTP adapters - REST API implementations.
//!
//! `consultant` serves reply generation and training, `prompts` exposes
//! version history. Both share [`AppState`].

pub mod consultant;
pub mod error;
pub mod prompts;
pub mod state;

pub use consultant::{consultant_router, training_router};
pub use error::{ApiError, ErrorResponse};
pub use prompts::prompts_router;
pub use state::AppState;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the full application router with tracing, CORS, and timeout layers.
///
/// The request timeout covers every route except `/load-training-data`,
/// whose run time scales with the batch.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let bounded = Router::new()
        .merge(consultant_router())
        .merge(prompts_router())
        .layer(TimeoutLayer::new(server.request_timeout()));

    Router::new()
        .merge(bounded)
        .merge(training_router())
        .with_state(state)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}
