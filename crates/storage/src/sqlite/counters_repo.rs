use async_trait::async_trait;
use chrono::Utc;
use flash_core::model::Counters;
use sqlx::Row;

use crate::repository::{
    COUNTERS_KEY, CountersRecord, CountersRepository, StorageError, decode_counters,
};

use super::SqliteRepository;

impl SqliteRepository {
    /// Raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    /// Store raw text under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CountersRepository for SqliteRepository {
    async fn load_counters(&self) -> Result<Option<Counters>, StorageError> {
        self.get_raw(COUNTERS_KEY)
            .await?
            .as_deref()
            .map(decode_counters)
            .transpose()
    }

    async fn save_counters(&self, counters: &Counters) -> Result<(), StorageError> {
        let raw = CountersRecord::from_counters(counters).to_json()?;
        self.put_raw(COUNTERS_KEY, &raw).await
    }
}
