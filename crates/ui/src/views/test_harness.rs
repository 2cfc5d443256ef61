use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use flash_core::model::{Counters, Difficulty};
use services::{HostEnvironment, HostError, NoHaptics, NoHost};
use storage::repository::{CountersRepository, InMemoryRepository, StorageError};

use crate::context::{UiApp, build_app_context};
use crate::platform::{HapticsRef, HostRef};
use crate::views::FlashView;
use crate::views::flash::FlashTestHandles;

/// Host that reports itself as an embedding shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniHost;

#[async_trait(?Send)]
impl HostEnvironment for MiniHost {
    async fn is_embedded(&self) -> Result<bool, HostError> {
        Ok(true)
    }

    async fn signal_ready(&self) -> Result<(), HostError> {
        Ok(())
    }
}

/// Shares its store with an [`InMemoryRepository`] but takes a while to save.
#[derive(Clone)]
pub struct SlowRepository {
    inner: InMemoryRepository,
    delay: Duration,
}

impl SlowRepository {
    pub fn new(inner: InMemoryRepository, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl CountersRepository for SlowRepository {
    async fn load_counters(&self) -> Result<Option<Counters>, StorageError> {
        self.inner.load_counters().await
    }

    async fn save_counters(&self, counters: &Counters) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.save_counters(counters).await
    }
}

#[derive(Clone)]
struct TestApp {
    counters: Arc<dyn CountersRepository>,
    difficulty: Difficulty,
    host: HostRef,
}

impl UiApp for TestApp {
    fn counters(&self) -> Arc<dyn CountersRepository> {
        Arc::clone(&self.counters)
    }

    fn launch_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn host(&self) -> HostRef {
        Arc::clone(&self.host)
    }

    fn haptics(&self) -> HapticsRef {
        Arc::new(NoHaptics)
    }
}

#[derive(Props, Clone)]
struct FlashHarnessProps {
    app: Arc<TestApp>,
    handles: FlashTestHandles,
}

impl PartialEq for FlashHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn FlashHarness(props: FlashHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { FlashView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub handles: FlashTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let startup tasks (counter load, host handshake) settle.
    pub async fn start(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(repo: InMemoryRepository, difficulty: Difficulty) -> ViewHarness {
    setup_view_harness_with_host(repo, difficulty, Arc::new(NoHost))
}

pub fn setup_view_harness_with_host(
    repo: InMemoryRepository,
    difficulty: Difficulty,
    host: HostRef,
) -> ViewHarness {
    let counters: Arc<dyn CountersRepository> = Arc::new(repo.clone());
    build_harness(repo, counters, difficulty, host)
}

/// The view saves through `counters`; `repo` observes the same store.
pub fn setup_view_harness_with_counters(
    repo: InMemoryRepository,
    counters: Arc<dyn CountersRepository>,
    difficulty: Difficulty,
) -> ViewHarness {
    build_harness(repo, counters, difficulty, Arc::new(NoHost))
}

fn build_harness(
    repo: InMemoryRepository,
    counters: Arc<dyn CountersRepository>,
    difficulty: Difficulty,
    host: HostRef,
) -> ViewHarness {
    let handles = FlashTestHandles::default();
    let app = Arc::new(TestApp {
        counters,
        difficulty,
        host,
    });

    let dom = VirtualDom::new_with_props(
        FlashHarness,
        FlashHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, repo, handles }
}
