//! Immutable prompt versions.

use serde::Serialize;

use super::slot::PromptSlot;
use crate::domain::foundation::{PromptVersionId, Timestamp};

/// One saved prompt. Never modified after creation.
///
/// Rolling back means saving an older version's content again, which
/// produces a new version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptVersion {
    id: PromptVersionId,
    slot: PromptSlot,
    content: String,
    created_at: Timestamp,
}

impl PromptVersion {
    /// Creates a new version stamped with the current time.
    pub fn new(slot: PromptSlot, content: impl Into<String>) -> Self {
        Self {
            id: PromptVersionId::new(),
            slot,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a version loaded from storage.
    pub fn reconstitute(
        id: PromptVersionId,
        slot: PromptSlot,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            slot,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> PromptVersionId {
        self.id
    }

    pub fn slot(&self) -> PromptSlot {
        self.slot
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
