use std::sync::Arc;

use dioxus::prelude::Key;
use flash_core::model::{Counters, Difficulty, Slot};
use services::feedback::{TOAST_EASY_MODE, TOAST_HARD_MODE, TOAST_RESET};
use services::{AnswerOutcome, FlashSession, SessionSnapshot};
use storage::repository::CountersRepository;

use super::hud_vm::{HudVm, map_hud};

const PLACEHOLDER: &str = "\u{2014}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashIntent {
    Pick(Slot),
    Reset,
    ToggleDifficulty,
}

/// Keyboard shortcuts: arrows pick a side, `r` resets, `h` toggles hard mode.
#[must_use]
pub fn intent_for_key(key: &Key) -> Option<FlashIntent> {
    match key {
        Key::ArrowLeft => Some(FlashIntent::Pick(Slot::Left)),
        Key::ArrowRight => Some(FlashIntent::Pick(Slot::Right)),
        Key::Character(value) if value.eq_ignore_ascii_case("r") => Some(FlashIntent::Reset),
        Key::Character(value) if value.eq_ignore_ascii_case("h") => {
            Some(FlashIntent::ToggleDifficulty)
        }
        _ => None,
    }
}

/// Everything the widget renders, derived from the last published snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashScreen {
    pub hud: HudVm,
    pub equation: String,
    pub left: String,
    pub right: String,
    /// Choices are locked while loading and during the feedback pause.
    pub choices_enabled: bool,
    /// The toggle names the mode it switches to.
    pub hard_label: &'static str,
}

#[must_use]
pub fn map_flash(snapshot: Option<&SessionSnapshot>) -> FlashScreen {
    let counters = snapshot.map_or_else(Counters::default, |snapshot| snapshot.counters);
    let problem = snapshot.and_then(|snapshot| snapshot.problem.as_ref());
    let hard = snapshot.is_some_and(|snapshot| snapshot.difficulty.is_hard());

    let label = |slot: Slot| {
        problem.map_or_else(|| PLACEHOLDER.to_string(), |p| p.value_at(slot).to_string())
    };
    FlashScreen {
        hud: map_hud(&counters),
        equation: problem.map_or_else(|| PLACEHOLDER.to_string(), |p| p.equation()),
        left: label(Slot::Left),
        right: label(Slot::Right),
        choices_enabled: problem.is_some(),
        hard_label: if hard { "easy" } else { "hard" },
    }
}

/// Owns the session for the lifetime of the view.
pub struct FlashVm {
    session: FlashSession,
}

impl FlashVm {
    #[must_use]
    pub fn new(session: FlashSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub async fn answer(&mut self, slot: Slot) -> Option<AnswerOutcome> {
        self.session.answer(slot).await
    }

    pub fn advance(&mut self) -> bool {
        self.session.advance()
    }

    /// Reset the run and return the toast to show.
    pub async fn reset(&mut self) -> &'static str {
        self.session.reset().await;
        TOAST_RESET
    }

    /// Flip difficulty and return the toast to show.
    pub fn toggle_difficulty(&mut self) -> &'static str {
        if self.session.toggle_difficulty().is_hard() {
            TOAST_HARD_MODE
        } else {
            TOAST_EASY_MODE
        }
    }
}

pub async fn start_flash(
    counters: Arc<dyn CountersRepository>,
    difficulty: Difficulty,
) -> FlashVm {
    FlashVm::new(FlashSession::start(counters, difficulty).await)
}
