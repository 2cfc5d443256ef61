//! Per-answer feedback: toast text, pacing pause and haptic pulse.

use std::time::Duration;

use flash_core::Verdict;

use crate::error::HostError;

pub const TOAST_CORRECT: &str = "\u{2713}";
pub const TOAST_INCORRECT: &str = "\u{2715}";
pub const TOAST_RESET: &str = "reset";
pub const TOAST_HARD_MODE: &str = "hard mode";
pub const TOAST_EASY_MODE: &str = "easy mode";

const CORRECT_PAUSE: Duration = Duration::from_millis(180);
const INCORRECT_PAUSE: Duration = Duration::from_millis(260);
const CORRECT_PULSE: &[u32] = &[18];
const INCORRECT_PULSE: &[u32] = &[30, 40, 30];

/// How the widget reacts to a scored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub toast: &'static str,
    /// Pause before the next problem is dealt.
    pub pause: Duration,
    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub haptic: &'static [u32],
    pub shake: bool,
}

impl Feedback {
    #[must_use]
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Self {
                toast: TOAST_CORRECT,
                pause: CORRECT_PAUSE,
                haptic: CORRECT_PULSE,
                shake: false,
            },
            Verdict::Incorrect => Self {
                toast: TOAST_INCORRECT,
                pause: INCORRECT_PAUSE,
                haptic: INCORRECT_PULSE,
                shake: true,
            },
        }
    }
}

/// Optional vibration capability.
pub trait Haptics {
    /// Play a vibration pattern.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the device cannot vibrate.
    fn vibrate(&self, pattern: &[u32]) -> Result<(), HostError>;
}

/// Absent capability: every call is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _pattern: &[u32]) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }
}

/// Pulse for the given feedback, ignoring failures.
pub fn buzz(haptics: &dyn Haptics, feedback: &Feedback) {
    if let Err(err) = haptics.vibrate(feedback.haptic) {
        tracing::debug!(error = %err, "haptic pulse skipped");
    }
}
