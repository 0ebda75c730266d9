//! In-Memory Prompt Store Adapter
//!
//! Keeps every prompt version in insertion order. Used when no database is
//! configured and in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::PromptVersionId;
use crate::domain::prompt::{PromptSlot, PromptVersion};
use crate::ports::{PromptStore, StoreError};

/// In-memory, append-only prompt history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromptStore {
    versions: Arc<RwLock<Vec<PromptVersion>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Total number of versions across all slots.
    pub async fn version_count(&self) -> usize {
        self.versions.read().await.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("in-memory prompt store switched off"))
        } else {
            Ok(())
        }
    }
}

fn latest_in(versions: &[PromptVersion], slot: PromptSlot) -> Option<&PromptVersion> {
    versions.iter().rev().find(|v| v.slot() == slot)
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn latest(&self, slot: PromptSlot) -> Result<Option<PromptVersion>, StoreError> {
        self.check_available()?;
        let versions = self.versions.read().await;
        Ok(latest_in(&versions, slot).cloned())
    }

    async fn save(&self, slot: PromptSlot, content: &str) -> Result<PromptVersion, StoreError> {
        self.check_available()?;
        let version = PromptVersion::new(slot, content);
        self.versions.write().await.push(version.clone());
        Ok(version)
    }

    async fn save_if_latest(
        &self,
        slot: PromptSlot,
        expected_latest: Option<PromptVersionId>,
        content: &str,
    ) -> Result<PromptVersion, StoreError> {
        self.check_available()?;
        let mut versions = self.versions.write().await;

        let current = latest_in(&versions, slot).map(PromptVersion::id);
        if current != expected_latest {
            return Err(StoreError::conflict(slot, expected_latest, current));
        }

        let version = PromptVersion::new(slot, content);
        versions.push(version.clone());
        Ok(version)
    }

    async fn find(&self, id: PromptVersionId) -> Result<Option<PromptVersion>, StoreError> {
        self.check_available()?;
        let versions = self.versions.read().await;
        Ok(versions.iter().find(|v| v.id() == id).cloned())
    }

    async fn history(
        &self,
        slot: PromptSlot,
        limit: usize,
    ) -> Result<Vec<PromptVersion>, StoreError> {
        self.check_available()?;
        let versions = self.versions.read().await;
        Ok(versions
            .iter()
            .rev()
            .filter(|v| v.slot() == slot)
            .take(limit)
            .cloned()
            .collect())
    }
}
