//! Prompt history queries and rollbacks.

use crate::application::services::PromptManager;
use crate::application::AgentError;
use crate::domain::foundation::{PromptVersionId, ValidationError};
use crate::domain::prompt::{PromptSlot, PromptVersion};
use crate::ports::DEFAULT_HISTORY_LIMIT;

/// Largest page a history query may request.
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Query for the recent versions of a slot.
#[derive(Debug, Clone)]
pub struct GetPromptHistoryQuery {
    pub slot: PromptSlot,
    /// Defaults to the store's default page size.
    pub limit: Option<usize>,
}

pub struct GetPromptHistoryHandler {
    prompts: PromptManager,
}

impl GetPromptHistoryHandler {
    pub fn new(prompts: PromptManager) -> Self {
        Self { prompts }
    }

    pub async fn handle(&self, query: GetPromptHistoryQuery) -> Result<Vec<PromptVersion>, AgentError> {
        let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::out_of_range(
                "limit",
                1,
                MAX_HISTORY_LIMIT as i64,
                limit as i64,
            )
            .into());
        }

        self.prompts.history(query.slot, limit).await
    }
}

/// Command to make an earlier version the active one again.
#[derive(Debug, Clone)]
pub struct RollbackPromptCommand {
    pub slot: PromptSlot,
    pub version_id: PromptVersionId,
}

pub struct RollbackPromptHandler {
    prompts: PromptManager,
}

impl RollbackPromptHandler {
    pub fn new(prompts: PromptManager) -> Self {
        Self { prompts }
    }

    pub async fn handle(&self, cmd: RollbackPromptCommand) -> Result<PromptVersion, AgentError> {
        self.prompts.rollback(cmd.slot, cmd.version_id).await
    }
}
