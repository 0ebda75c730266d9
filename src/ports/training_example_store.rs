//! Training Example Store Port - Append-only log of training examples.

use async_trait::async_trait;
use serde::Serialize;

use super::StoreError;
use crate::domain::conversation::{ContextMessage, TrainingExample};
use crate::domain::foundation::TrainingExampleId;

/// A training example as persisted, optionally with the model's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecord {
    pub client_sequence: Vec<String>,
    pub chat_history: Vec<ContextMessage>,
    pub consultant_reply: String,
    /// Reply the model predicted for the same client turn.
    pub ai_reply: Option<String>,
    pub scenario: Option<String>,
    pub contact_id: Option<String>,
}

impl TrainingRecord {
    /// Creates a record from a client turn and the consultant's reply.
    pub fn new(
        client_sequence: Vec<String>,
        chat_history: Vec<ContextMessage>,
        consultant_reply: impl Into<String>,
    ) -> Self {
        Self {
            client_sequence,
            chat_history,
            consultant_reply: consultant_reply.into(),
            ai_reply: None,
            scenario: None,
            contact_id: None,
        }
    }

    pub fn with_ai_reply(mut self, ai_reply: impl Into<String>) -> Self {
        self.ai_reply = Some(ai_reply.into());
        self
    }

    pub fn with_origin(mut self, scenario: Option<String>, contact_id: Option<String>) -> Self {
        self.scenario = scenario;
        self.contact_id = contact_id;
        self
    }
}

impl From<&TrainingExample> for TrainingRecord {
    fn from(example: &TrainingExample) -> Self {
        TrainingRecord::new(
            example.client_turn().to_vec(),
            example.context().to_vec(),
            example.consultant_reply(),
        )
        .with_origin(
            example.scenario().map(str::to_string),
            example.contact_id().map(str::to_string),
        )
    }
}

#[async_trait]
pub trait TrainingExampleStore: Send + Sync {
    /// Persists one record and returns its identifier.
    async fn append(&self, record: TrainingRecord) -> Result<TrainingExampleId, StoreError>;
}
