//! GenerateReplyHandler - Predicts the consultant's next reply.

use crate::application::services::{PromptManager, ReplyGenerator};
use crate::application::AgentError;
use crate::domain::conversation::ContextMessage;
use crate::domain::foundation::{PromptVersionId, ValidationError};
use crate::domain::prompt::PromptSlot;

/// Command to generate a reply for a client turn.
#[derive(Debug, Clone)]
pub struct GenerateReplyCommand {
    pub client_sequence: Vec<String>,
    pub chat_history: Vec<ContextMessage>,
}

/// Result of reply generation.
#[derive(Debug, Clone)]
pub struct GenerateReplyResult {
    pub reply: String,
    /// System prompt version the reply was generated with.
    pub prompt_version: PromptVersionId,
}

/// Handler for generating replies.
pub struct GenerateReplyHandler {
    prompts: PromptManager,
    generator: ReplyGenerator,
}

impl GenerateReplyHandler {
    pub fn new(prompts: PromptManager, generator: ReplyGenerator) -> Self {
        Self { prompts, generator }
    }

    pub async fn handle(&self, cmd: GenerateReplyCommand) -> Result<GenerateReplyResult, AgentError> {
        if cmd.client_sequence.is_empty() {
            return Err(ValidationError::required("clientSequence").into());
        }

        let system = self.prompts.latest(PromptSlot::System).await?;
        let reply = self
            .generator
            .generate_reply(system.content(), &cmd.client_sequence, &cmd.chat_history)
            .await?;

        tracing::info!(
            prompt_version = %system.id(),
            client_messages = cmd.client_sequence.len(),
            history_messages = cmd.chat_history.len(),
            "reply generated"
        );

        Ok(GenerateReplyResult {
            reply,
            prompt_version: system.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryPromptStore;
    use crate::ports::PromptStore;
    use std::sync::Arc;

    fn handler(store: &InMemoryPromptStore, mock: &MockAIProvider) -> GenerateReplyHandler {
        GenerateReplyHandler::new(
            PromptManager::new(Arc::new(store.clone())),
            ReplyGenerator::new(Arc::new(mock.clone())),
        )
    }

    fn command(client: &[&str]) -> GenerateReplyCommand {
        GenerateReplyCommand {
            client_sequence: client.iter().map(|s| s.to_string()).collect(),
            chat_history: vec![],
        }
    }

    #[tokio::test]
    async fn uses_latest_system_prompt() {
        let store = InMemoryPromptStore::new();
        store.save(PromptSlot::System, "old").await.unwrap();
        let latest = store.save(PromptSlot::System, "Be concise.").await.unwrap();
        let mock = MockAIProvider::new().with_response(r#"{"reply": "Which country?"}"#);

        let result = handler(&store, &mock)
            .handle(command(&["Hi", "I need a visa"]))
            .await
            .unwrap();

        assert_eq!(result.reply, "Which country?");
        assert_eq!(result.prompt_version, latest.id());
        assert!(mock.get_calls()[0].messages[0]
            .content
            .starts_with("Be concise.\n\nConversation:\nClient: Hi\nClient: I need a visa"));
    }

    #[tokio::test]
    async fn rejects_empty_client_sequence_without_calling_model() {
        let store = InMemoryPromptStore::new();
        let mock = MockAIProvider::new();

        let err = handler(&store, &mock).handle(command(&[])).await.unwrap_err();

        assert!(matches!(err, AgentError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_system_prompt_is_not_found() {
        let store = InMemoryPromptStore::new();
        let mock = MockAIProvider::new();

        let err = handler(&store, &mock).handle(command(&["Hi"])).await.unwrap_err();
        assert!(matches!(err, AgentError::PromptNotFound(PromptSlot::System)));
    }
}
