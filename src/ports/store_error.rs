//! Errors shared by the datastore ports.

use thiserror::Error;

use crate::domain::foundation::PromptVersionId;
use crate::domain::prompt::PromptSlot;

/// Datastore failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The datastore could not be reached or rejected the query.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Another writer saved to the slot after the caller read it.
    #[error("prompt slot '{slot}' changed concurrently (expected latest {expected}, found {actual})")]
    Conflict {
        slot: PromptSlot,
        expected: VersionRef,
        actual: VersionRef,
    },

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }

    pub fn conflict(
        slot: PromptSlot,
        expected: Option<PromptVersionId>,
        actual: Option<PromptVersionId>,
    ) -> Self {
        Self::Conflict {
            slot,
            expected: VersionRef(expected),
            actual: VersionRef(actual),
        }
    }
}

/// Display wrapper for an optional version id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRef(pub Option<PromptVersionId>);

impl std::fmt::Display for VersionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id),
            None => f.write_str("none"),
        }
    }
}
