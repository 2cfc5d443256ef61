//! Scoring a binary choice against the live problem.

use crate::model::{Counters, Problem, Slot};

/// Result of scoring one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Score `selection` against `problem` and update `counters` in place.
///
/// Persisting the updated counters is the caller's job.
pub fn score(selection: Slot, problem: &Problem, counters: &mut Counters) -> Verdict {
    let verdict = if problem.is_correct(selection) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    };
    counters.record(verdict.is_correct());
    verdict
}
