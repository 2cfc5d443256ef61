use std::sync::Arc;

use flash_core::model::Counters;
use storage::repository::CountersRepository;

use crate::error::SessionError;

#[derive(Clone)]
pub struct CountersService {
    repo: Arc<dyn CountersRepository>,
}

impl CountersService {
    #[must_use]
    pub fn new(repo: Arc<dyn CountersRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted counters (or zeroed counters if none were saved).
    ///
    /// # Errors
    ///
    /// Returns `SessionError` on storage failures, including corrupt content.
    pub async fn load(&self) -> Result<Counters, SessionError> {
        let counters = self.repo.load_counters().await?;
        Ok(counters.unwrap_or_default())
    }

    /// Load persisted counters, treating any failure as "no prior state".
    pub async fn load_or_default(&self) -> Counters {
        match self.repo.load_counters().await {
            Ok(Some(counters)) => counters,
            Ok(None) => Counters::default(),
            Err(err) => {
                tracing::warn!(error = %err, "stored counters unreadable, starting fresh");
                Counters::default()
            }
        }
    }

    /// Persist the given counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the write fails.
    pub async fn save(&self, counters: &Counters) -> Result<(), SessionError> {
        self.repo.save_counters(counters).await?;
        Ok(())
    }

    /// Apply the reset rule to the stored counters and persist the result.
    ///
    /// Unreadable content is replaced by zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the write fails.
    pub async fn reset(&self) -> Result<Counters, SessionError> {
        let mut counters = self.load_or_default().await;
        counters.reset();
        self.save(&counters).await?;
        Ok(counters)
    }
}
