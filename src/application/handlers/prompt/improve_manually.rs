//! ImproveManuallyHandler - Applies developer instructions to the system prompt.

use crate::application::services::{PromptManager, ReplyGenerator};
use crate::application::AgentError;
use crate::domain::foundation::ValidationError;
use crate::domain::prompt::{PromptSlot, PromptVersion};

#[derive(Debug, Clone)]
pub struct ImproveManuallyCommand {
    pub instructions: String,
}

#[derive(Debug, Clone)]
pub struct ImproveManuallyResult {
    pub updated_prompt: PromptVersion,
}

pub struct ImproveManuallyHandler {
    prompts: PromptManager,
    generator: ReplyGenerator,
}

impl ImproveManuallyHandler {
    pub fn new(prompts: PromptManager, generator: ReplyGenerator) -> Self {
        Self { prompts, generator }
    }

    pub async fn handle(
        &self,
        cmd: ImproveManuallyCommand,
    ) -> Result<ImproveManuallyResult, AgentError> {
        if cmd.instructions.trim().is_empty() {
            return Err(ValidationError::required("instructions").into());
        }

        let system = self.prompts.latest(PromptSlot::System).await?;
        let editor = self.prompts.latest(PromptSlot::Editor).await?;

        let rewritten = self
            .generator
            .rewrite_prompt(editor.content(), system.content(), &cmd.instructions)
            .await?;
        let updated_prompt = self
            .prompts
            .update_system_prompt(&rewritten, Some(system.id()))
            .await?;

        tracing::info!(
            previous_version = %system.id(),
            version_id = %updated_prompt.id(),
            "system prompt rewritten from instructions"
        );

        Ok(ImproveManuallyResult { updated_prompt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryPromptStore;
    use crate::ports::PromptStore;
    use std::sync::Arc;

    async fn seeded_store() -> InMemoryPromptStore {
        let store = InMemoryPromptStore::new();
        store.save(PromptSlot::System, "old prompt").await.unwrap();
        store.save(PromptSlot::Editor, "editor").await.unwrap();
        store
    }

    #[tokio::test]
    async fn saves_rewritten_prompt() {
        let store = seeded_store().await;
        let mock = MockAIProvider::new().with_response(r#"{"prompt": "shorter prompt"}"#);
        let handler = ImproveManuallyHandler::new(
            PromptManager::new(Arc::new(store.clone())),
            ReplyGenerator::new(Arc::new(mock.clone())),
        );

        let result = handler
            .handle(ImproveManuallyCommand {
                instructions: "Use fewer emojis".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.updated_prompt.content(), "shorter prompt");
        assert_eq!(
            store.latest(PromptSlot::System).await.unwrap().unwrap().id(),
            result.updated_prompt.id()
        );
        assert!(mock.get_calls()[0].messages[0]
            .content
            .contains("Current System Prompt:\nold prompt"));
    }

    #[tokio::test]
    async fn blank_instructions_are_rejected() {
        let store = seeded_store().await;
        let mock = MockAIProvider::new();
        let handler = ImproveManuallyHandler::new(
            PromptManager::new(Arc::new(store)),
            ReplyGenerator::new(Arc::new(mock.clone())),
        );

        let err = handler
            .handle(ImproveManuallyCommand {
                instructions: "   ".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }
}
