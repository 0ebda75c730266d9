//! Request and response bodies for the consultant endpoints.
//!
//! Request keys are camelCase. Training examples keep the snake_case shape
//! the conversation exports already use.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ExampleOutcome, LoadTrainingDataResult};
use crate::domain::conversation::{ContextMessage, Conversation, SegmentFailure, SegmentedBatch, TrainingExample};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyRequest {
    #[serde(default)]
    pub client_sequence: Vec<String>,
    #[serde(default)]
    pub chat_history: Vec<ContextMessage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveAiRequest {
    #[serde(default)]
    pub client_sequence: Vec<String>,
    #[serde(default)]
    pub chat_history: Vec<ContextMessage>,
    #[serde(default)]
    pub consultant_reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImproveManuallyRequest {
    #[serde(default)]
    pub instructions: String,
}

/// Body of `/parse-conversations` and `/load-training-data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsRequest {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: "visa-consultant-ai",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReplyResponse {
    pub ai_reply: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveAiResponse {
    pub predicted_reply: String,
    pub updated_prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveManuallyResponse {
    pub updated_prompt: String,
}

/// A conversation that could not be segmented.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseErrorResponse {
    /// Position of the conversation in the request.
    pub position: usize,
    pub contact_id: Option<String>,
    pub message: String,
}

impl From<&SegmentFailure> for ParseErrorResponse {
    fn from(failure: &SegmentFailure) -> Self {
        Self {
            position: failure.position,
            contact_id: failure.contact_id.clone(),
            message: failure.error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseConversationsResponse {
    pub training_examples: Vec<TrainingExample>,
    pub count: usize,
    pub errors: Vec<ParseErrorResponse>,
}

impl From<SegmentedBatch> for ParseConversationsResponse {
    fn from(batch: SegmentedBatch) -> Self {
        Self {
            count: batch.examples.len(),
            errors: batch.failures.iter().map(ParseErrorResponse::from).collect(),
            training_examples: batch.examples,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTrainingDataResponse {
    pub processed: usize,
    pub results: Vec<ExampleOutcome>,
    pub parse_errors: Vec<ParseErrorResponse>,
}

impl From<LoadTrainingDataResult> for LoadTrainingDataResponse {
    fn from(result: LoadTrainingDataResult) -> Self {
        Self {
            processed: result.processed,
            parse_errors: result
                .parse_errors
                .iter()
                .map(ParseErrorResponse::from)
                .collect(),
            results: result.results,
        }
    }
}
