use flash_core::Verdict;
use flash_core::model::{Counters, Difficulty, Problem};

use crate::feedback::Feedback;

/// Result of answering the live problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub verdict: Verdict,
    pub counters: Counters,
    pub feedback: Feedback,
    /// `false` when the save failed; play continues either way.
    pub persisted: bool,
}

/// Presentation-agnostic copy of the session state.
///
/// No pre-formatted strings; the UI decides how to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub counters: Counters,
    pub problem: Option<Problem>,
}
