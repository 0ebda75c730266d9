//! Prompt Store Port - Append-only, versioned prompt slots.
//!
//! Every save creates a new immutable [`PromptVersion`]. The latest version
//! of a slot is the most recent save by creation order. Nothing is ever
//! updated or deleted, so any earlier version can be restored by saving its
//! content again.
//!
//! # Concurrency
//!
//! Read-modify-write callers (prompt improvement) use
//! [`PromptStore::save_if_latest`], which fails with `StoreError::Conflict`
//! when the slot moved on since the caller read it.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::foundation::PromptVersionId;
use crate::domain::prompt::{PromptSlot, PromptVersion};

/// Number of versions returned by history queries when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Returns the most recent version of `slot`, or `None` if nothing has
    /// been saved yet.
    async fn latest(&self, slot: PromptSlot) -> Result<Option<PromptVersion>, StoreError>;

    /// Appends a new version unconditionally.
    async fn save(&self, slot: PromptSlot, content: &str) -> Result<PromptVersion, StoreError>;

    /// Appends a new version only if the latest version of `slot` is still
    /// `expected_latest` (`None` meaning the slot must be empty).
    async fn save_if_latest(
        &self,
        slot: PromptSlot,
        expected_latest: Option<PromptVersionId>,
        content: &str,
    ) -> Result<PromptVersion, StoreError>;

    /// Looks up a single version by id.
    async fn find(&self, id: PromptVersionId) -> Result<Option<PromptVersion>, StoreError>;

    /// Returns up to `limit` versions of `slot`, newest first.
    async fn history(&self, slot: PromptSlot, limit: usize)
        -> Result<Vec<PromptVersion>, StoreError>;
}
