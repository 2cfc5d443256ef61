use std::sync::Arc;

use flash_core::model::Difficulty;
use storage::repository::CountersRepository;

use crate::platform::{HapticsRef, HostRef};

pub trait UiApp: Send + Sync {
    fn counters(&self) -> Arc<dyn CountersRepository>;
    fn launch_difficulty(&self) -> Difficulty;
    fn host(&self) -> HostRef;
    fn haptics(&self) -> HapticsRef;
}

#[derive(Clone)]
pub struct AppContext {
    counters: Arc<dyn CountersRepository>,
    launch_difficulty: Difficulty,
    host: HostRef,
    haptics: HapticsRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            counters: app.counters(),
            launch_difficulty: app.launch_difficulty(),
            host: app.host(),
            haptics: app.haptics(),
        }
    }

    #[must_use]
    pub fn counters(&self) -> Arc<dyn CountersRepository> {
        Arc::clone(&self.counters)
    }

    #[must_use]
    pub fn launch_difficulty(&self) -> Difficulty {
        self.launch_difficulty
    }

    #[must_use]
    pub fn host(&self) -> HostRef {
        Arc::clone(&self.host)
    }

    #[must_use]
    pub fn haptics(&self) -> HapticsRef {
        Arc::clone(&self.haptics)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
