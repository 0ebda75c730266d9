//! Training example produced by the segmenter.

use serde::Serialize;

use super::message::ContextMessage;

/// A (context, client turn, consultant reply) triple.
///
/// Created once per segmentation pass and never mutated.
///
/// # Invariants
///
/// - `client_turn` is non-empty and every entry came from an inbound message
/// - `consultant_reply` came from at least one outbound message
/// - `context` is exactly the transcript prefix before the client run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingExample {
    #[serde(rename = "client_sequence")]
    client_turn: Vec<String>,
    #[serde(rename = "chat_history")]
    context: Vec<ContextMessage>,
    consultant_reply: String,
    scenario: Option<String>,
    contact_id: Option<String>,
}

impl TrainingExample {
    pub(crate) fn new(
        context: Vec<ContextMessage>,
        client_turn: Vec<String>,
        consultant_reply: String,
        scenario: Option<String>,
        contact_id: Option<String>,
    ) -> Self {
        Self {
            client_turn,
            context,
            consultant_reply,
            scenario,
            contact_id,
        }
    }

    pub fn client_turn(&self) -> &[String] {
        &self.client_turn
    }

    pub fn context(&self) -> &[ContextMessage] {
        &self.context
    }

    pub fn consultant_reply(&self) -> &str {
        &self.consultant_reply
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }
}
