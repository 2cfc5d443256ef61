use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountersError {
    #[error("correct ({correct}) exceeds total ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("streak ({streak}) exceeds best ({best})")]
    StreakExceedsBest { streak: u32, best: u32 },
}

/// Streak and accuracy statistics for the local player.
///
/// Invariants: `correct <= total` and `streak <= best`. `best`, `total` and
/// `correct` only grow, except that [`Counters::reset`] clears `total` and
/// `correct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    streak: u32,
    best: u32,
    total: u32,
    correct: u32,
}

impl Counters {
    /// Rehydrate counters from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `CountersError` if the values break the counter invariants.
    pub fn from_persisted(
        streak: u32,
        best: u32,
        total: u32,
        correct: u32,
    ) -> Result<Self, CountersError> {
        if correct > total {
            return Err(CountersError::CorrectExceedsTotal { correct, total });
        }
        if streak > best {
            return Err(CountersError::StreakExceedsBest { streak, best });
        }
        Ok(Self {
            streak,
            best,
            total,
            correct,
        })
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Record one answered problem.
    pub fn record(&mut self, correct: bool) {
        self.total = self.total.saturating_add(1);
        if correct {
            self.correct = self.correct.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
            self.best = self.best.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Clear the current run. `best` is kept.
    pub fn reset(&mut self) {
        self.streak = 0;
        self.total = 0;
        self.correct = 0;
    }

    /// Share of correct answers as a rounded percentage, `None` before the first answer.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let correct = u64::from(self.correct);
        let total = u64::from(self.total);
        let rounded = (correct * 200 + total) / (total * 2);
        u32::try_from(rounded).ok()
    }
}
