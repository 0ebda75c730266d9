//! Application-level errors.
//!
//! Collaborator failures (model, datastore) stay distinguishable from
//! request and segmentation problems so the HTTP layer can map each to its
//! own status.

use thiserror::Error;

use crate::domain::conversation::SegmentError;
use crate::domain::foundation::{ErrorCode, PromptVersionId, ValidationError};
use crate::domain::prompt::PromptSlot;
use crate::ports::{AIError, StoreError};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Segmentation(#[from] SegmentError),

    #[error("no prompt has been saved in slot '{0}'")]
    PromptNotFound(PromptSlot),

    #[error("prompt version {0} not found")]
    VersionNotFound(PromptVersionId),

    /// Another writer changed the slot between read and write.
    #[error("prompt slot '{slot}' was updated concurrently; retry with the latest prompt")]
    PromptConflict { slot: PromptSlot },

    #[error("model '{model}' failed: {source}")]
    Generation {
        model: String,
        #[source]
        source: AIError,
    },

    #[error(transparent)]
    Store(StoreError),
}

impl AgentError {
    pub fn generation(model: impl Into<String>, source: AIError) -> Self {
        AgentError::Generation {
            model: model.into(),
            source,
        }
    }

    /// Client-facing error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            AgentError::Validation(_) => ErrorCode::ValidationFailed,
            AgentError::Segmentation(_) => ErrorCode::MalformedMessage,
            AgentError::PromptNotFound(_) => ErrorCode::PromptNotFound,
            AgentError::VersionNotFound(_) => ErrorCode::PromptVersionNotFound,
            AgentError::PromptConflict { .. } => ErrorCode::PromptConflict,
            AgentError::Generation {
                source: AIError::RateLimited { .. },
                ..
            } => ErrorCode::RateLimited,
            AgentError::Generation { .. } => ErrorCode::AIProviderError,
            AgentError::Store(StoreError::Corrupt(_)) => ErrorCode::InternalError,
            AgentError::Store(_) => ErrorCode::StoreUnavailable,
        }
    }
}

impl From<StoreError> for AgentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { slot, .. } => AgentError::PromptConflict { slot },
            other => AgentError::Store(other),
        }
    }
}
