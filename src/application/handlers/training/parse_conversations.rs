//! ParseConversationsHandler - Segments conversation transcripts into
//! training examples.

use crate::application::AgentError;
use crate::domain::conversation::{segment_all, Conversation, SegmentedBatch};
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone)]
pub struct ParseConversationsQuery {
    pub conversations: Vec<Conversation>,
}

/// Stateless; segmentation is pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseConversationsHandler;

impl ParseConversationsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: &ParseConversationsQuery) -> Result<SegmentedBatch, AgentError> {
        if query.conversations.is_empty() {
            return Err(ValidationError::required("conversations").into());
        }

        let batch = segment_all(&query.conversations);

        for failure in &batch.failures {
            tracing::warn!(
                position = failure.position,
                contact_id = failure.contact_id.as_deref().unwrap_or("-"),
                error = %failure.error,
                "conversation skipped"
            );
        }
        tracing::info!(
            conversations = query.conversations.len(),
            examples = batch.examples.len(),
            failures = batch.failures.len(),
            "conversations segmented"
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Message, SegmentError};

    #[test]
    fn empty_batch_is_rejected() {
        let err = ParseConversationsHandler::new()
            .handle(&ParseConversationsQuery {
                conversations: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, AgentError::Validation(_)));
    }

    #[test]
    fn malformed_conversation_is_reported_not_fatal() {
        let good = Conversation::new(vec![Message::inbound("Hi"), Message::outbound("Hello")])
            .with_contact_id("good");
        let bad = Conversation::new(vec![Message::inbound("Hi").without_text()])
            .with_contact_id("bad");

        let batch = ParseConversationsHandler::new()
            .handle(&ParseConversationsQuery {
                conversations: vec![bad, good],
            })
            .unwrap();

        assert_eq!(batch.examples.len(), 1);
        assert_eq!(batch.examples[0].contact_id(), Some("good"));
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].position, 0);
        assert_eq!(
            batch.failures[0].error,
            SegmentError::MalformedMessage {
                conversation: "bad".into(),
                index: 0,
                field: "text",
            }
        );
    }
}
