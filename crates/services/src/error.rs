//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Failure reported by a best-effort host capability.
///
/// Callers log and swallow these; they never reach the player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostError {
    #[error("host capability unavailable")]
    Unavailable,
    #[error("host call failed: {0}")]
    Failed(String),
}

/// Errors emitted by counters and session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
