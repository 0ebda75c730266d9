//! Reply generation and prompt rewriting through the AI provider.

use std::sync::Arc;

use crate::application::AgentError;
use crate::domain::conversation::ContextMessage;
use crate::domain::prompt::{
    extract_prompt, extract_reply, improvement_request, manual_update_request, reply_request,
    FeedbackContext,
};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestPurpose};

/// Renders prompts, calls the model once per operation, and unwraps its
/// JSON envelopes.
#[derive(Clone)]
pub struct ReplyGenerator {
    provider: Arc<dyn AIProvider>,
    temperature: Option<f32>,
}

impl ReplyGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            temperature: None,
        }
    }

    /// Sampling temperature sent with every request; `None` uses the model default.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model identifier of the underlying provider.
    pub fn model(&self) -> String {
        self.provider.provider_info().model
    }

    /// Predicts the consultant's reply to `client_sequence`.
    pub async fn generate_reply(
        &self,
        system_prompt: &str,
        client_sequence: &[String],
        chat_history: &[ContextMessage],
    ) -> Result<String, AgentError> {
        let prompt = reply_request(system_prompt, client_sequence, chat_history);
        let raw = self.complete(RequestPurpose::Reply, prompt).await?;
        Ok(extract_reply(&raw))
    }

    /// Asks the model for an improved system prompt given how its prediction
    /// differed from the real reply.
    pub async fn improve_prompt(
        &self,
        editor_prompt: &str,
        existing_prompt: &str,
        feedback: &FeedbackContext<'_>,
    ) -> Result<String, AgentError> {
        let prompt = improvement_request(editor_prompt, existing_prompt, feedback);
        let raw = self
            .complete(RequestPurpose::PromptImprovement, prompt)
            .await?;
        Ok(extract_prompt(&raw, existing_prompt))
    }

    /// Applies developer instructions to the system prompt.
    pub async fn rewrite_prompt(
        &self,
        editor_prompt: &str,
        existing_prompt: &str,
        instructions: &str,
    ) -> Result<String, AgentError> {
        let prompt = manual_update_request(editor_prompt, existing_prompt, instructions);
        let raw = self.complete(RequestPurpose::PromptRewrite, prompt).await?;
        Ok(extract_prompt(&raw, existing_prompt))
    }

    async fn complete(&self, purpose: RequestPurpose, prompt: String) -> Result<String, AgentError> {
        let mut request = CompletionRequest::new(purpose).with_message(MessageRole::User, prompt);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    %purpose,
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    "model call completed"
                );
                Ok(response.content)
            }
            Err(err) => {
                let model = self.model();
                tracing::warn!(%purpose, %model, error = %err, "model call failed");
                Err(AgentError::generation(model, err))
            }
        }
    }
}
