//! ImproveFromFeedbackHandler - Rewrites the system prompt after comparing
//! the model's prediction with the consultant's real reply.

use std::sync::Arc;

use crate::application::services::{PromptManager, ReplyGenerator};
use crate::application::AgentError;
use crate::domain::conversation::ContextMessage;
use crate::domain::foundation::{TrainingExampleId, ValidationError};
use crate::domain::prompt::{FeedbackContext, PromptSlot, PromptVersion};
use crate::ports::{TrainingExampleStore, TrainingRecord};

/// Command carrying one real exchange to learn from.
#[derive(Debug, Clone)]
pub struct ImproveFromFeedbackCommand {
    pub client_sequence: Vec<String>,
    pub chat_history: Vec<ContextMessage>,
    pub consultant_reply: String,
    pub scenario: Option<String>,
    pub contact_id: Option<String>,
}

impl ImproveFromFeedbackCommand {
    pub fn new(
        client_sequence: Vec<String>,
        chat_history: Vec<ContextMessage>,
        consultant_reply: impl Into<String>,
    ) -> Self {
        Self {
            client_sequence,
            chat_history,
            consultant_reply: consultant_reply.into(),
            scenario: None,
            contact_id: None,
        }
    }

    pub fn with_origin(mut self, scenario: Option<String>, contact_id: Option<String>) -> Self {
        self.scenario = scenario;
        self.contact_id = contact_id;
        self
    }
}

/// Result of a feedback-driven improvement.
#[derive(Debug, Clone)]
pub struct ImproveFromFeedbackResult {
    pub predicted_reply: String,
    pub updated_prompt: PromptVersion,
    pub training_example_id: TrainingExampleId,
}

/// Handler for feedback-driven prompt improvement.
pub struct ImproveFromFeedbackHandler {
    prompts: PromptManager,
    generator: ReplyGenerator,
    examples: Arc<dyn TrainingExampleStore>,
}

impl ImproveFromFeedbackHandler {
    pub fn new(
        prompts: PromptManager,
        generator: ReplyGenerator,
        examples: Arc<dyn TrainingExampleStore>,
    ) -> Self {
        Self {
            prompts,
            generator,
            examples,
        }
    }

    pub async fn handle(
        &self,
        cmd: ImproveFromFeedbackCommand,
    ) -> Result<ImproveFromFeedbackResult, AgentError> {
        // 1. Validate
        if cmd.client_sequence.is_empty() {
            return Err(ValidationError::required("clientSequence").into());
        }
        if cmd.consultant_reply.is_empty() {
            return Err(ValidationError::required("consultantReply").into());
        }

        // 2. Read both prompts
        let system = self.prompts.latest(PromptSlot::System).await?;
        let editor = self.prompts.latest(PromptSlot::Editor).await?;

        // 3. Predict with the current prompt
        let predicted_reply = self
            .generator
            .generate_reply(system.content(), &cmd.client_sequence, &cmd.chat_history)
            .await?;

        // 4. Ask for a better prompt
        let feedback = FeedbackContext {
            client_sequence: &cmd.client_sequence,
            chat_history: &cmd.chat_history,
            consultant_reply: &cmd.consultant_reply,
            predicted_reply: &predicted_reply,
        };
        let improved = self
            .generator
            .improve_prompt(editor.content(), system.content(), &feedback)
            .await?;

        // 5. Save only if nobody else changed the prompt meanwhile
        let updated_prompt = self
            .prompts
            .update_system_prompt(&improved, Some(system.id()))
            .await?;

        // 6. Keep the example and the prediction
        let record = TrainingRecord::new(cmd.client_sequence, cmd.chat_history, cmd.consultant_reply)
            .with_ai_reply(predicted_reply.clone())
            .with_origin(cmd.scenario, cmd.contact_id);
        let contact_id = record.contact_id.clone();
        let training_example_id = self.examples.append(record).await?;

        tracing::info!(
            previous_version = %system.id(),
            version_id = %updated_prompt.id(),
            training_example_id = %training_example_id,
            contact_id = contact_id.as_deref().unwrap_or("-"),
            "system prompt improved from feedback"
        );

        Ok(ImproveFromFeedbackResult {
            predicted_reply,
            updated_prompt,
            training_example_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::{InMemoryPromptStore, InMemoryTrainingExampleStore};
    use crate::domain::conversation::Direction;
    use crate::ports::{PromptStore, RequestPurpose};

    struct Fixture {
        prompts: InMemoryPromptStore,
        examples: InMemoryTrainingExampleStore,
        mock: MockAIProvider,
        handler: ImproveFromFeedbackHandler,
    }

    async fn fixture(mock: MockAIProvider) -> Fixture {
        let prompts = InMemoryPromptStore::new();
        prompts.save(PromptSlot::System, "system v1").await.unwrap();
        prompts.save(PromptSlot::Editor, "editor").await.unwrap();
        let examples = InMemoryTrainingExampleStore::new();

        let handler = ImproveFromFeedbackHandler::new(
            PromptManager::new(Arc::new(prompts.clone())),
            ReplyGenerator::new(Arc::new(mock.clone())),
            Arc::new(examples.clone()),
        );
        Fixture {
            prompts,
            examples,
            mock,
            handler,
        }
    }

    fn command() -> ImproveFromFeedbackCommand {
        ImproveFromFeedbackCommand::new(
            vec!["Hello".to_string()],
            vec![ContextMessage::new(Direction::Outbound, "Welcome")],
            "Hi there",
        )
        .with_origin(Some("tourist".into()), Some("c-7".into()))
    }

    #[tokio::test]
    async fn predicts_improves_saves_and_records() {
        let f = fixture(
            MockAIProvider::new()
                .with_response(r#"{"reply": "Good day."}"#)
                .with_response(r#"{"prompt": "system v2"}"#),
        )
        .await;

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.predicted_reply, "Good day.");
        assert_eq!(result.updated_prompt.content(), "system v2");
        assert_eq!(
            f.prompts.latest(PromptSlot::System).await.unwrap().unwrap().content(),
            "system v2"
        );

        let calls = f.mock.get_calls();
        assert_eq!(calls[0].purpose, RequestPurpose::Reply);
        assert_eq!(calls[1].purpose, RequestPurpose::PromptImprovement);
        let improvement = &calls[1].messages[0].content;
        assert!(improvement.starts_with("Editor Prompt:\neditor\n\nCurrent System Prompt:\nsystem v1"));
        assert!(improvement.contains("Real Consultant Reply:\nHi there"));
        assert!(improvement.contains("AI Predicted Reply:\nGood day."));

        let records = f.examples.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ai_reply.as_deref(), Some("Good day."));
        assert_eq!(records[0].contact_id.as_deref(), Some("c-7"));
        assert_eq!(records[0].scenario.as_deref(), Some("tourist"));
    }

    #[tokio::test]
    async fn requires_consultant_reply() {
        let f = fixture(MockAIProvider::new()).await;
        let mut cmd = command();
        cmd.consultant_reply.clear();

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, AgentError::Validation(_)));
        assert_eq!(f.mock.call_count(), 0);
    }

    #[tokio::test]
    async fn model_failure_saves_nothing() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("prediction")
                .with_error(MockError::RateLimited { retry_after_secs: 3 }),
        )
        .await;

        let err = f.handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, AgentError::Generation { .. }));
        assert_eq!(f.prompts.version_count().await, 2);
        assert!(f.examples.is_empty().await);
    }

    #[tokio::test]
    async fn missing_editor_prompt_is_not_found() {
        let prompts = InMemoryPromptStore::new();
        prompts.save(PromptSlot::System, "system").await.unwrap();
        let handler = ImproveFromFeedbackHandler::new(
            PromptManager::new(Arc::new(prompts)),
            ReplyGenerator::new(Arc::new(MockAIProvider::new())),
            Arc::new(InMemoryTrainingExampleStore::new()),
        );

        let err = handler.handle(command()).await.unwrap_err();
        assert!(matches!(err, AgentError::PromptNotFound(PromptSlot::Editor)));
    }
}
