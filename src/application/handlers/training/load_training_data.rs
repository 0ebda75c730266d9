//! LoadTrainingDataHandler - Segments transcripts, then feeds every example
//! through feedback-driven prompt improvement, one at a time.
//!
//! Examples are processed sequentially so each improvement starts from the
//! prompt produced by the previous one. A failing example is recorded and
//! the batch continues.

use std::sync::Arc;

use serde::Serialize;

use super::parse_conversations::{ParseConversationsHandler, ParseConversationsQuery};
use crate::application::handlers::prompt::{ImproveFromFeedbackCommand, ImproveFromFeedbackHandler};
use crate::application::AgentError;
use crate::domain::conversation::{Conversation, SegmentFailure};

#[derive(Debug, Clone)]
pub struct LoadTrainingDataCommand {
    pub conversations: Vec<Conversation>,
}

/// Outcome for one training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleOutcome {
    pub contact_id: Option<String>,
    pub status: ExampleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadTrainingDataResult {
    /// Number of examples attempted.
    pub processed: usize,
    pub results: Vec<ExampleOutcome>,
    /// Conversations that could not be segmented.
    pub parse_errors: Vec<SegmentFailure>,
}

impl LoadTrainingDataResult {
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == ExampleStatus::Success)
            .count()
    }
}

pub struct LoadTrainingDataHandler {
    parser: ParseConversationsHandler,
    improver: Arc<ImproveFromFeedbackHandler>,
}

impl LoadTrainingDataHandler {
    pub fn new(improver: Arc<ImproveFromFeedbackHandler>) -> Self {
        Self {
            parser: ParseConversationsHandler::new(),
            improver,
        }
    }

    pub async fn handle(
        &self,
        cmd: LoadTrainingDataCommand,
    ) -> Result<LoadTrainingDataResult, AgentError> {
        let batch = self.parser.handle(&ParseConversationsQuery {
            conversations: cmd.conversations,
        })?;

        let mut results = Vec::with_capacity(batch.examples.len());
        for example in &batch.examples {
            let contact_id = example.contact_id().map(str::to_string);
            let improve = ImproveFromFeedbackCommand::new(
                example.client_turn().to_vec(),
                example.context().to_vec(),
                example.consultant_reply(),
            )
            .with_origin(example.scenario().map(str::to_string), contact_id.clone());

            let outcome = match self.improver.handle(improve).await {
                Ok(_) => ExampleOutcome {
                    contact_id,
                    status: ExampleStatus::Success,
                    error: None,
                },
                Err(err) => {
                    tracing::warn!(
                        contact_id = contact_id.as_deref().unwrap_or("-"),
                        error = %err,
                        "training example failed"
                    );
                    ExampleOutcome {
                        contact_id,
                        status: ExampleStatus::Error,
                        error: Some(err.to_string()),
                    }
                }
            };
            results.push(outcome);
        }

        let result = LoadTrainingDataResult {
            processed: batch.examples.len(),
            results,
            parse_errors: batch.failures,
        };
        tracing::info!(
            processed = result.processed,
            succeeded = result.succeeded(),
            parse_errors = result.parse_errors.len(),
            "training data loaded"
        );
        Ok(result)
    }
}
