use std::sync::Arc;

use flash_core::model::{Counters, Difficulty, Problem, Slot};
use flash_core::{ProblemGenerator, score};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::CountersRepository;

use super::view::{AnswerOutcome, SessionSnapshot};
use crate::counters_service::CountersService;
use crate::feedback::Feedback;

/// Drives the generator and scorer for one player.
///
/// After `start`, `advance`, `reset` and `toggle_difficulty` there is exactly
/// one live problem. `answer` consumes it; the caller deals the next one with
/// `advance` once the feedback pause is over.
pub struct FlashSession {
    counters_service: CountersService,
    generator: ProblemGenerator,
    rng: StdRng,
    difficulty: Difficulty,
    counters: Counters,
    current: Option<Problem>,
}

impl FlashSession {
    /// Load stored counters and deal the first problem.
    ///
    /// Missing or unreadable counters start from zero.
    pub async fn start(repo: Arc<dyn CountersRepository>, difficulty: Difficulty) -> Self {
        Self::start_with_rng(repo, difficulty, StdRng::from_os_rng()).await
    }

    /// Like [`FlashSession::start`] with an explicit random source.
    pub async fn start_with_rng(
        repo: Arc<dyn CountersRepository>,
        difficulty: Difficulty,
        rng: StdRng,
    ) -> Self {
        let counters_service = CountersService::new(repo);
        let counters = counters_service.load_or_default().await;
        let mut session = Self {
            counters_service,
            generator: ProblemGenerator::new(),
            rng,
            difficulty,
            counters,
            current: None,
        };
        session.deal();
        session
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// The live problem, `None` while the feedback pause is running.
    #[must_use]
    pub fn current(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty,
            counters: self.counters,
            problem: self.current.clone(),
        }
    }

    /// Score `selection` against the live problem and persist the counters.
    ///
    /// Returns `None` without touching anything when no problem is live.
    pub async fn answer(&mut self, selection: Slot) -> Option<AnswerOutcome> {
        let problem = self.current.take()?;
        let verdict = score(selection, &problem, &mut self.counters);
        let persisted = self.persist().await;
        tracing::debug!(
            equation = %problem.equation(),
            correct = verdict.is_correct(),
            streak = self.counters.streak(),
            "answer scored"
        );
        Some(AnswerOutcome {
            verdict,
            counters: self.counters,
            feedback: Feedback::for_verdict(verdict),
            persisted,
        })
    }

    /// Deal the next problem after an answer.
    ///
    /// Does nothing if a problem is already live, e.g. because a reset or
    /// difficulty toggle landed during the feedback pause. Returns whether a
    /// new problem was dealt.
    pub fn advance(&mut self) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.deal();
        true
    }

    /// Zero streak, total and correct (keeping best), persist, and deal a new problem.
    ///
    /// Returns whether the save succeeded.
    pub async fn reset(&mut self) -> bool {
        self.counters.reset();
        let persisted = self.persist().await;
        self.deal();
        persisted
    }

    /// Flip between normal and hard and deal a new problem.
    pub fn toggle_difficulty(&mut self) -> Difficulty {
        self.difficulty = self.difficulty.toggled();
        self.deal();
        self.difficulty
    }

    fn deal(&mut self) {
        self.current = Some(self.generator.generate(self.difficulty, &mut self.rng));
    }

    async fn persist(&self) -> bool {
        match self.counters_service.save(&self.counters).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist counters");
                false
            }
        }
    }
}
