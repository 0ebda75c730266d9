//! PostgreSQL implementation of PromptStore.
//!
//! Versions live in the append-only `prompt_versions` table and are ordered
//! by the `seq` column. Every write runs in a transaction holding a
//! per-slot advisory lock, so the read of the current latest version and
//! the insert of the next one cannot interleave with another writer.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{PromptVersionId, Timestamp};
use crate::domain::prompt::{PromptSlot, PromptVersion};
use crate::ports::{PromptStore, StoreError};

/// PostgreSQL implementation of PromptStore.
#[derive(Clone)]
pub struct PostgresPromptStore {
    pool: PgPool,
}

impl PostgresPromptStore {
    /// Creates a new PostgresPromptStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin_locked(
        &self,
        slot: PromptSlot,
    ) -> Result<Transaction<'static, Postgres>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            StoreError::unavailable(format!("Failed to start transaction: {}", e))
        })?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(slot_lock_key(slot))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                StoreError::unavailable(format!("Failed to lock prompt slot {}: {}", slot, e))
            })?;

        Ok(tx)
    }

    async fn insert(
        tx: &mut Transaction<'static, Postgres>,
        version: &PromptVersion,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO prompt_versions (id, slot, content, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(version.id().as_uuid())
        .bind(version.slot().as_str())
        .bind(version.content())
        .bind(version.created_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to insert prompt: {}", e)))?;

        Ok(())
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), StoreError> {
        tx.commit()
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to commit transaction: {}", e)))
    }
}

#[async_trait]
impl PromptStore for PostgresPromptStore {
    async fn latest(&self, slot: PromptSlot) -> Result<Option<PromptVersion>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, slot, content, created_at
            FROM prompt_versions
            WHERE slot = $1
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .bind(slot.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch latest prompt: {}", e)))?;

        row.map(row_to_version).transpose()
    }

    async fn save(&self, slot: PromptSlot, content: &str) -> Result<PromptVersion, StoreError> {
        let version = PromptVersion::new(slot, content);

        let mut tx = self.begin_locked(slot).await?;
        Self::insert(&mut tx, &version).await?;
        Self::commit(tx).await?;

        Ok(version)
    }

    async fn save_if_latest(
        &self,
        slot: PromptSlot,
        expected_latest: Option<PromptVersionId>,
        content: &str,
    ) -> Result<PromptVersion, StoreError> {
        let mut tx = self.begin_locked(slot).await?;

        let current: Option<uuid::Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM prompt_versions
            WHERE slot = $1
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .bind(slot.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch latest prompt: {}", e)))?;

        let current = current.map(PromptVersionId::from_uuid);
        if current != expected_latest {
            // Dropping the transaction rolls it back and releases the lock.
            return Err(StoreError::conflict(slot, expected_latest, current));
        }

        let version = PromptVersion::new(slot, content);
        Self::insert(&mut tx, &version).await?;
        Self::commit(tx).await?;

        Ok(version)
    }

    async fn find(&self, id: PromptVersionId) -> Result<Option<PromptVersion>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, slot, content, created_at
            FROM prompt_versions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch prompt version: {}", e)))?;

        row.map(row_to_version).transpose()
    }

    async fn history(
        &self,
        slot: PromptSlot,
        limit: usize,
    ) -> Result<Vec<PromptVersion>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, slot, content, created_at
            FROM prompt_versions
            WHERE slot = $1
            ORDER BY seq DESC
            LIMIT $2
            "#,
        )
        .bind(slot.as_str())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch prompt history: {}", e)))?;

        rows.into_iter().map(row_to_version).collect()
    }
}

/// Advisory lock key for a slot. Fixed values so every instance agrees.
fn slot_lock_key(slot: PromptSlot) -> i64 {
    match slot {
        PromptSlot::System => 0x7072_6f6d_7074_0001,
        PromptSlot::Editor => 0x7072_6f6d_7074_0002,
    }
}

fn row_to_version(row: PgRow) -> Result<PromptVersion, StoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::corrupt(format!("prompt_versions.id: {}", e)))?;
    let slot: String = row
        .try_get("slot")
        .map_err(|e| StoreError::corrupt(format!("prompt_versions.slot: {}", e)))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| StoreError::corrupt(format!("prompt_versions.content: {}", e)))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::corrupt(format!("prompt_versions.created_at: {}", e)))?;

    let slot: PromptSlot = slot
        .parse()
        .map_err(|_| StoreError::corrupt(format!("unknown prompt slot '{}'", slot)))?;

    Ok(PromptVersion::reconstitute(
        PromptVersionId::from_uuid(id),
        slot,
        content,
        Timestamp::from_datetime(created_at),
    ))
}
