//! Section fetcher.
//!
//! Resolves "the HTML of section i" against a [`SectionSource`], with the
//! cache in front of it. Concurrent fetches of one index share a single
//! request, successes are cached under the requested index, and failures
//! are never cached so the next attempt goes back to the source.

use crate::cache::SectionCache;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use lexi_traits::{FetchError, SectionSource};
use lexi_types::{SectionIndex, SectionPayload, SharedHtml};
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type PendingFetch = Shared<LocalBoxFuture<'static, Result<SectionPayload, FetchError>>>;

pub struct SectionFetcher<S> {
    source: Rc<S>,
    cache: RefCell<SectionCache>,
    in_flight: RefCell<HashMap<SectionIndex, PendingFetch>>,
}

impl<S: SectionSource + 'static> SectionFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Rc::new(source),
            cache: RefCell::new(SectionCache::new()),
            in_flight: RefCell::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached markup for `index`, without touching the source.
    pub fn cached(&self, index: SectionIndex) -> Option<SharedHtml> {
        self.cache.borrow().get(index)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_in_flight(&self, index: SectionIndex) -> bool {
        self.in_flight.borrow().contains_key(&index)
    }

    /// Fetch `index` from the source, joining a request already in flight
    /// for the same index.
    ///
    /// The cache is not consulted here; callers check [`cached`] first so
    /// they can render synchronously on a hit.
    ///
    /// [`cached`]: SectionFetcher::cached
    pub async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError> {
        let pending = self
            .in_flight
            .borrow_mut()
            .entry(index)
            .or_insert_with(|| {
                debug!("Fetching section {} from {}", index, self.source.name());
                let source = Rc::clone(&self.source);
                async move { source.fetch(index).await }
                    .boxed_local()
                    .shared()
            })
            .clone();

        let result = pending.clone().await;

        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight
                .get(&index)
                .is_some_and(|current| current.ptr_eq(&pending))
            {
                in_flight.remove(&index);
            }
        }

        if let Ok(payload) = &result {
            self.cache.borrow_mut().insert(index, payload.html.clone());
        }
        result
    }

    /// Warm the cache for `index`. Does nothing when the section is already
    /// cached or being fetched. Failures are logged and swallowed.
    ///
    /// Returns `true` when this call fetched and cached the section.
    pub async fn prefetch(&self, index: SectionIndex) -> bool {
        if self.cache.borrow().contains(index) || self.is_in_flight(index) {
            return false;
        }
        match self.fetch(index).await {
            Ok(_) => {
                debug!("Prefetched section {}", index);
                true
            }
            Err(err) => {
                warn!("Failed to prefetch section {}: {}", index, err);
                false
            }
        }
    }
}
