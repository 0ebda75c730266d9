//! Prompt slot management on top of the PromptStore port.

use std::sync::Arc;

use crate::application::AgentError;
use crate::domain::foundation::PromptVersionId;
use crate::domain::prompt::{default_content, PromptSlot, PromptVersion};
use crate::ports::{PromptStore, StoreError};

/// Reads, saves, and restores prompt versions.
#[derive(Clone)]
pub struct PromptManager {
    store: Arc<dyn PromptStore>,
}

impl PromptManager {
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// Saves the built-in prompt into every empty slot.
    ///
    /// Returns the versions that were created. A slot seeded concurrently by
    /// another instance is left alone.
    pub async fn ensure_defaults(&self) -> Result<Vec<PromptVersion>, AgentError> {
        let mut seeded = Vec::new();

        for slot in PromptSlot::ALL {
            if self.store.latest(slot).await?.is_some() {
                continue;
            }
            match self
                .store
                .save_if_latest(slot, None, default_content(slot))
                .await
            {
                Ok(version) => {
                    tracing::info!(%slot, version_id = %version.id(), "seeded default prompt");
                    seeded.push(version);
                }
                Err(StoreError::Conflict { .. }) => {
                    tracing::debug!(%slot, "slot seeded concurrently");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(seeded)
    }

    /// Latest version of `slot`.
    pub async fn latest(&self, slot: PromptSlot) -> Result<PromptVersion, AgentError> {
        self.store
            .latest(slot)
            .await?
            .ok_or(AgentError::PromptNotFound(slot))
    }

    /// Saves a new system prompt, provided no other save happened since
    /// `expected_latest` was read.
    pub async fn update_system_prompt(
        &self,
        content: &str,
        expected_latest: Option<PromptVersionId>,
    ) -> Result<PromptVersion, AgentError> {
        let version = self
            .store
            .save_if_latest(PromptSlot::System, expected_latest, content)
            .await?;

        tracing::info!(
            slot = %PromptSlot::System,
            version_id = %version.id(),
            "system prompt updated"
        );
        Ok(version)
    }

    /// Up to `limit` versions of `slot`, newest first.
    pub async fn history(
        &self,
        slot: PromptSlot,
        limit: usize,
    ) -> Result<Vec<PromptVersion>, AgentError> {
        Ok(self.store.history(slot, limit).await?)
    }

    /// Re-saves the content of `version_id` as the newest version of `slot`.
    pub async fn rollback(
        &self,
        slot: PromptSlot,
        version_id: PromptVersionId,
    ) -> Result<PromptVersion, AgentError> {
        let target = self
            .store
            .find(version_id)
            .await?
            .filter(|version| version.slot() == slot)
            .ok_or(AgentError::VersionNotFound(version_id))?;

        let restored = self.store.save(slot, target.content()).await?;
        tracing::info!(
            %slot,
            from_version = %version_id,
            version_id = %restored.id(),
            "prompt rolled back"
        );
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPromptStore;
    use crate::domain::prompt::{BASE_EDITOR_PROMPT, BASE_SYSTEM_PROMPT};

    fn manager() -> (PromptManager, InMemoryPromptStore) {
        let store = InMemoryPromptStore::new();
        (PromptManager::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn ensure_defaults_seeds_empty_slots_once() {
        let (manager, store) = manager();

        let seeded = manager.ensure_defaults().await.unwrap();
        assert_eq!(seeded.len(), 2);
        assert_eq!(
            manager.latest(PromptSlot::System).await.unwrap().content(),
            BASE_SYSTEM_PROMPT
        );
        assert_eq!(
            manager.latest(PromptSlot::Editor).await.unwrap().content(),
            BASE_EDITOR_PROMPT
        );

        assert!(manager.ensure_defaults().await.unwrap().is_empty());
        assert_eq!(store.version_count().await, 2);
    }

    #[tokio::test]
    async fn ensure_defaults_leaves_customised_slots() {
        let (manager, store) = manager();
        store.save(PromptSlot::System, "custom").await.unwrap();

        let seeded = manager.ensure_defaults().await.unwrap();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0].slot(), PromptSlot::Editor);
        assert_eq!(
            manager.latest(PromptSlot::System).await.unwrap().content(),
            "custom"
        );
    }

    #[tokio::test]
    async fn latest_of_empty_slot_is_not_found() {
        let (manager, _) = manager();
        let err = manager.latest(PromptSlot::Editor).await.unwrap_err();
        assert!(matches!(err, AgentError::PromptNotFound(PromptSlot::Editor)));
    }

    #[tokio::test]
    async fn update_detects_concurrent_save() {
        let (manager, store) = manager();
        let read = store.save(PromptSlot::System, "v1").await.unwrap();
        store.save(PromptSlot::System, "someone else").await.unwrap();

        let err = manager
            .update_system_prompt("v2", Some(read.id()))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::PromptConflict { .. }));
    }

    #[tokio::test]
    async fn rollback_resaves_old_content_as_newest() {
        let (manager, _) = manager();
        let v1 = manager.update_system_prompt("v1", None).await.unwrap();
        let v2 = manager
            .update_system_prompt("v2", Some(v1.id()))
            .await
            .unwrap();

        let restored = manager.rollback(PromptSlot::System, v1.id()).await.unwrap();
        assert_eq!(restored.content(), "v1");
        assert_ne!(restored.id(), v1.id());

        let history = manager.history(PromptSlot::System, 10).await.unwrap();
        let ids: Vec<_> = history.iter().map(PromptVersion::id).collect();
        assert_eq!(ids, vec![restored.id(), v2.id(), v1.id()]);
    }

    #[tokio::test]
    async fn rollback_rejects_version_from_other_slot() {
        let (manager, store) = manager();
        let editor = store.save(PromptSlot::Editor, "editor").await.unwrap();

        let err = manager
            .rollback(PromptSlot::System, editor.id())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::VersionNotFound(id) if id == editor.id()));
    }
}
