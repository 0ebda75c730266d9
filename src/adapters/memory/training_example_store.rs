//! In-Memory Training Example Store Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::TrainingExampleId;
use crate::ports::{StoreError, TrainingExampleStore, TrainingRecord};

/// In-memory, append-only training example log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrainingExampleStore {
    records: Arc<RwLock<Vec<(TrainingExampleId, TrainingRecord)>>>,
}

impl InMemoryTrainingExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all stored records in append order.
    pub async fn records(&self) -> Vec<TrainingRecord> {
        self.records
            .read()
            .await
            .iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TrainingExampleStore for InMemoryTrainingExampleStore {
    async fn append(&self, record: TrainingRecord) -> Result<TrainingExampleId, StoreError> {
        let id = TrainingExampleId::new();
        self.records.write().await.push((id, record));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ContextMessage, Direction};

    #[tokio::test]
    async fn appends_in_order_with_distinct_ids() {
        let store = InMemoryTrainingExampleStore::new();
        assert!(store.is_empty().await);

        let first = store
            .append(TrainingRecord::new(vec!["Hi".into()], vec![], "Hello"))
            .await
            .unwrap();
        let second = store
            .append(
                TrainingRecord::new(
                    vec!["Bye".into()],
                    vec![ContextMessage::new(Direction::Outbound, "Welcome")],
                    "See you",
                )
                .with_ai_reply("Goodbye"),
            )
            .await
            .unwrap();

        assert_ne!(first, second);
        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].consultant_reply, "Hello");
        assert_eq!(records[1].ai_reply.as_deref(), Some("Goodbye"));
    }
}
