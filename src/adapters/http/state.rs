//! Shared state for the HTTP adapters.

use std::sync::Arc;

use crate::application::handlers::{
    GenerateReplyHandler, GetPromptHistoryHandler, ImproveFromFeedbackHandler,
    ImproveManuallyHandler, LoadTrainingDataHandler, ParseConversationsHandler,
    RollbackPromptHandler,
};
use crate::application::services::{PromptManager, ReplyGenerator};
use crate::application::AgentError;
use crate::ports::TrainingExampleStore;

use super::error::ApiError;

/// Dependencies every route handler draws from.
#[derive(Clone)]
pub struct AppState {
    pub prompts: PromptManager,
    pub generator: ReplyGenerator,
    pub training_examples: Arc<dyn TrainingExampleStore>,
    /// Include collaborator error text in 5xx responses.
    pub verbose_errors: bool,
}

impl AppState {
    pub fn new(
        prompts: PromptManager,
        generator: ReplyGenerator,
        training_examples: Arc<dyn TrainingExampleStore>,
    ) -> Self {
        Self {
            prompts,
            generator,
            training_examples,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn generate_reply_handler(&self) -> GenerateReplyHandler {
        GenerateReplyHandler::new(self.prompts.clone(), self.generator.clone())
    }

    pub fn improve_from_feedback_handler(&self) -> ImproveFromFeedbackHandler {
        ImproveFromFeedbackHandler::new(
            self.prompts.clone(),
            self.generator.clone(),
            self.training_examples.clone(),
        )
    }

    pub fn improve_manually_handler(&self) -> ImproveManuallyHandler {
        ImproveManuallyHandler::new(self.prompts.clone(), self.generator.clone())
    }

    pub fn parse_conversations_handler(&self) -> ParseConversationsHandler {
        ParseConversationsHandler::new()
    }

    pub fn load_training_data_handler(&self) -> LoadTrainingDataHandler {
        LoadTrainingDataHandler::new(Arc::new(self.improve_from_feedback_handler()))
    }

    pub fn prompt_history_handler(&self) -> GetPromptHistoryHandler {
        GetPromptHistoryHandler::new(self.prompts.clone())
    }

    pub fn rollback_prompt_handler(&self) -> RollbackPromptHandler {
        RollbackPromptHandler::new(self.prompts.clone())
    }

    /// Converts an application error into a response, honouring `verbose_errors`.
    pub fn api_error(&self, err: AgentError) -> ApiError {
        ApiError::from_agent(err, self.verbose_errors)
    }
}
