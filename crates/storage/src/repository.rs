use async_trait::async_trait;
use flash_core::model::{Counters, CountersError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Fixed key the counters record is stored under.
pub const COUNTERS_KEY: &str = "flashmath_state_v1";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CountersError> for StorageError {
    fn from(err: CountersError) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Persisted shape of the counters: a flat JSON object.
///
/// `last` is reserved. It is written as `null` and any stored value is
/// accepted and ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountersRecord {
    pub streak: u32,
    pub best: u32,
    pub total: u32,
    pub correct: u32,
    #[serde(default)]
    pub last: Option<serde_json::Value>,
}

impl CountersRecord {
    #[must_use]
    pub fn from_counters(counters: &Counters) -> Self {
        Self {
            streak: counters.streak(),
            best: counters.best(),
            total: counters.total(),
            correct: counters.correct(),
            last: None,
        }
    }

    /// Convert the record back into domain `Counters`.
    ///
    /// # Errors
    ///
    /// Returns `CountersError` if the stored values break the counter invariants.
    pub fn into_counters(self) -> Result<Counters, CountersError> {
        Counters::from_persisted(self.streak, self.best, self.total, self.correct)
    }

    /// Encode as the stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Decode stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for unparseable text, negative or
    /// non-integer fields, or a JSON `null`.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

/// Decode stored text straight into validated counters.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not a valid counters record.
pub fn decode_counters(raw: &str) -> Result<Counters, StorageError> {
    Ok(CountersRecord::from_json(raw)?.into_counters()?)
}

/// Repository contract for the single counters record.
#[async_trait]
pub trait CountersRepository: Send + Sync {
    /// Load the stored counters, `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for corrupt content, or other storage errors.
    async fn load_counters(&self) -> Result<Option<Counters>, StorageError>;

    /// Overwrite the stored counters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the counters cannot be stored.
    async fn save_counters(&self, counters: &Counters) -> Result<(), StorageError>;
}

/// In-memory key/value repository for testing and prototyping.
///
/// Values are kept as the same JSON text the SQLite backend stores.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store raw text under `key`, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl CountersRepository for InMemoryRepository {
    async fn load_counters(&self) -> Result<Option<Counters>, StorageError> {
        self.raw(COUNTERS_KEY)?
            .as_deref()
            .map(decode_counters)
            .transpose()
    }

    async fn save_counters(&self, counters: &Counters) -> Result<(), StorageError> {
        let raw = CountersRecord::from_counters(counters).to_json()?;
        self.put_raw(COUNTERS_KEY, raw)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub counters: Arc<dyn CountersRepository>,
}
