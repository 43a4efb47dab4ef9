#![allow(dead_code)]

pub mod fixtures;

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use lexi::types::{SectionIndex, SectionPayload};
use lexi::{
    FetchError, InMemorySectionSource, MemoryHistory, Navigator, NavigatorConfig,
    RecordingLiveRegion, RecordingView, SectionSource,
};
use std::cell::RefCell;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub type TestNavigator<S = InMemorySectionSource> =
    Navigator<S, RecordingView, MemoryHistory, RecordingLiveRegion>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A navigator over an on-demand page whose sections come from `source`.
pub fn navigator_with<S: SectionSource + 'static>(
    config: NavigatorConfig,
    source: S,
    url: &str,
) -> TestNavigator<S> {
    init_logging();
    let toc = config.total_sections.unwrap_or(0);
    Navigator::new(
        config,
        source,
        RecordingView::placeholder(toc),
        MemoryHistory::new(url),
        RecordingLiveRegion::new(),
    )
}

/// A navigator over an on-demand page with `total` fixture sections.
pub fn ajax_navigator(total: usize, url: &str) -> TestNavigator {
    navigator_with(
        fixtures::config(total),
        fixtures::sections(total),
        url,
    )
}

/// A navigator over a page where every section was rendered server-side.
pub fn server_rendered_navigator(total: usize, url: &str) -> TestNavigator {
    init_logging();
    Navigator::new(
        fixtures::config(total),
        InMemorySectionSource::unavailable(),
        RecordingView::server_rendered(total),
        MemoryHistory::new(url),
        RecordingLiveRegion::new(),
    )
}

/// A source that can hold requests until released.
///
/// While the gate is open requests go straight through to `inner`.
pub struct GatedSource {
    pub inner: InMemorySectionSource,
    gate: RefCell<Option<Shared<oneshot::Receiver<()>>>>,
}

impl GatedSource {
    pub fn new(inner: InMemorySectionSource) -> Self {
        Self {
            inner,
            gate: RefCell::new(None),
        }
    }

    /// Holds every following request until the returned sender fires or
    /// is dropped.
    pub fn close(&self) -> oneshot::Sender<()> {
        let (open, gate) = oneshot::channel();
        *self.gate.borrow_mut() = Some(gate.shared());
        open
    }
}

impl SectionSource for GatedSource {
    async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError> {
        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.fetch(index).await
    }

    fn name(&self) -> &'static str {
        "GatedSource"
    }
}

/// Lets spawned local tasks run until `done` holds, up to a bound.
pub async fn settle_until(done: impl Fn() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
}
