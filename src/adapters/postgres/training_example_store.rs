//! PostgreSQL implementation of TrainingExampleStore.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{Timestamp, TrainingExampleId};
use crate::ports::{StoreError, TrainingExampleStore, TrainingRecord};

/// PostgreSQL implementation of TrainingExampleStore.
#[derive(Clone)]
pub struct PostgresTrainingExampleStore {
    pool: PgPool,
}

impl PostgresTrainingExampleStore {
    /// Creates a new PostgresTrainingExampleStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingExampleStore for PostgresTrainingExampleStore {
    async fn append(&self, record: TrainingRecord) -> Result<TrainingExampleId, StoreError> {
        let id = TrainingExampleId::new();

        sqlx::query(
            r#"
            INSERT INTO training_examples (
                id, client_sequence, chat_history, consultant_reply,
                ai_reply, scenario, contact_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id.as_uuid())
        .bind(Json(&record.client_sequence))
        .bind(Json(&record.chat_history))
        .bind(&record.consultant_reply)
        .bind(&record.ai_reply)
        .bind(&record.scenario)
        .bind(&record.contact_id)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            StoreError::unavailable(format!("Failed to insert training example: {}", e))
        })?;

        Ok(id)
    }
}
