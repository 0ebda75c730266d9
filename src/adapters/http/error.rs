//! Error responses shared by every route.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::application::AgentError;
use crate::domain::conversation::SegmentError;
use crate::domain::foundation::ErrorCode;
use crate::ports::{AIError, StoreError};

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error returned from route handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }

    /// Maps an application error to a status and body.
    ///
    /// Collaborator failures are logged in full; their text reaches the
    /// client only when `verbose` is set.
    pub fn from_agent(err: AgentError, verbose: bool) -> Self {
        let code = err.code();
        let message = err.to_string();

        let (status, body) = match &err {
            AgentError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(code, message),
            ),
            AgentError::Segmentation(SegmentError::MalformedMessage {
                conversation,
                index,
                field,
            }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(code, message).with_details(json!({
                    "conversation": conversation,
                    "index": index,
                    "field": field,
                })),
            ),
            AgentError::Segmentation(SegmentError::MalformedTranscript { conversation }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(code, message)
                    .with_details(json!({ "conversation": conversation })),
            ),
            AgentError::PromptNotFound(_) | AgentError::VersionNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(code, message))
            }
            AgentError::PromptConflict { slot } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(code, message).with_details(json!({ "slot": slot })),
            ),
            AgentError::Generation {
                source: AIError::RateLimited { retry_after_secs },
                ..
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(code, "The AI provider is rate limiting requests")
                    .with_details(json!({ "retryAfterSecs": retry_after_secs })),
            ),
            AgentError::Generation { model, .. } => {
                tracing::error!(error = %err, %model, "AI provider failure");
                let body = if verbose {
                    ErrorResponse::new(code, message)
                } else {
                    ErrorResponse::new(code, "The AI provider request failed")
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            AgentError::Store(store) => {
                tracing::error!(error = %err, "prompt store failure");
                let status = match store {
                    StoreError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::SERVICE_UNAVAILABLE,
                };
                let body = if verbose {
                    ErrorResponse::new(code, message)
                } else {
                    ErrorResponse::new(code, "Storage is unavailable")
                };
                (status, body)
            }
        };

        Self { status, body }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            body: ErrorResponse::new(ErrorCode::ValidationFailed, rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(ErrorCode::ValidationFailed, rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::domain::prompt::PromptSlot;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from_agent(ValidationError::required("clientSequence").into(), false);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().code, "VALIDATION_FAILED");
        assert_eq!(err.body().message, "clientSequence is required");
    }

    #[test]
    fn segmentation_carries_location_details() {
        let err = ApiError::from_agent(
            SegmentError::MalformedMessage {
                conversation: "c-9".into(),
                index: 3,
                field: "text",
            }
            .into(),
            false,
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.body().details,
            Some(json!({"conversation": "c-9", "index": 3, "field": "text"}))
        );
    }

    #[test]
    fn flat_transcript_names_conversation() {
        let err = ApiError::from_agent(
            SegmentError::MalformedTranscript {
                conversation: "c-4".into(),
            }
            .into(),
            false,
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body().code, "MALFORMED_MESSAGE");
        assert_eq!(err.body().details, Some(json!({"conversation": "c-4"})));
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ApiError::from_agent(
            AgentError::PromptConflict {
                slot: PromptSlot::System,
            },
            false,
        );
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.body().code, "PROMPT_CONFLICT");
    }

    #[test]
    fn rate_limit_maps_to_429_with_retry_hint() {
        let err = ApiError::from_agent(
            AgentError::generation("gemini-2.5-flash", AIError::rate_limited(12)),
            false,
        );
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body().details, Some(json!({"retryAfterSecs": 12})));
    }

    #[test]
    fn provider_failure_hides_detail_unless_verbose() {
        let build = |verbose| {
            ApiError::from_agent(
                AgentError::generation("gpt-4o-mini", AIError::unavailable("upstream 503")),
                verbose,
            )
        };

        let quiet = build(false);
        assert_eq!(quiet.status(), StatusCode::BAD_GATEWAY);
        assert!(!quiet.body().message.contains("upstream 503"));

        let verbose = build(true);
        assert!(verbose.body().message.contains("upstream 503"));
    }

    #[test]
    fn store_errors_map_by_kind() {
        let unavailable =
            ApiError::from_agent(StoreError::unavailable("connection refused").into(), false);
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let corrupt = ApiError::from_agent(StoreError::corrupt("bad slot").into(), false);
        assert_eq!(corrupt.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(corrupt.body().code, "INTERNAL_ERROR");
    }
}
