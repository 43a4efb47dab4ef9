//! SectionSource trait for abstracting where section markup comes from.
//!
//! The navigator asks a source for "the HTML of section i" and does not
//! care whether it is answered by the REST endpoint in a browser or by a
//! table of fixtures in a test.

use lexi_types::{SectionIndex, SectionPayload, SectionResponse};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Error type for section fetches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed section payload: {0}")]
    Malformed(String),

    #[error("Section payload has no HTML content")]
    MissingHtml,

    #[error("Section source unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Validates a decoded endpoint response.
///
/// A body without an `html` field (or with an empty one) is malformed.
pub fn payload_from_response(response: SectionResponse) -> Result<SectionPayload, FetchError> {
    let html = response
        .html
        .filter(|html| !html.is_empty())
        .ok_or(FetchError::MissingHtml)?;
    Ok(SectionPayload {
        html: html.into(),
        index: response.index,
        total: response.total,
    })
}

/// Decodes and validates a raw JSON response body.
pub fn parse_section_body(body: &str) -> Result<SectionPayload, FetchError> {
    let response: SectionResponse = serde_json::from_str(body)?;
    payload_from_response(response)
}

/// A source of section markup.
///
/// Implementations run on a single-threaded event loop, so the returned
/// futures are not required to be `Send`.
///
/// # Implementations
///
/// - `RestSectionSource` (lexi-wasm): `fetch` against the section endpoint
/// - `InMemorySectionSource`: fixtures held in memory
#[allow(async_fn_in_trait)]
pub trait SectionSource {
    /// Fetch the markup of one section.
    async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Whether the source can answer at all. A source without an endpoint
    /// returns `false` and the navigator falls back to pre-rendered sections.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: SectionSource + ?Sized> SectionSource for std::rc::Rc<S> {
    async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError> {
        (**self).fetch(index).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// An in-memory section source.
///
/// Answers are pre-populated per index. Every call to `fetch` is recorded,
/// which makes the source useful for asserting how often the network would
/// have been hit.
#[derive(Debug)]
pub struct InMemorySectionSource {
    answers: RefCell<HashMap<SectionIndex, Result<SectionPayload, FetchError>>>,
    requests: RefCell<Vec<SectionIndex>>,
    available: bool,
}

impl Default for InMemorySectionSource {
    fn default() -> Self {
        Self {
            answers: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            available: true,
        }
    }
}

impl InMemorySectionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source standing in for a page without an endpoint.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Builds a source answering `0..sections.len()` with the given markup,
    /// each payload declaring its own index and the total.
    pub fn with_sections<I, T>(sections: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let source = Self::new();
        let sections: Vec<String> = sections.into_iter().map(Into::into).collect();
        let total = sections.len();
        for (i, html) in sections.into_iter().enumerate() {
            source.insert_payload(
                SectionIndex::new(i),
                SectionPayload::new(html)
                    .with_index(i64::try_from(i).unwrap_or(i64::MAX))
                    .with_total(total),
            );
        }
        source
    }

    /// Answer `index` with `html`, declaring the same index.
    pub fn insert(&self, index: SectionIndex, html: impl Into<String>) {
        let html: String = html.into();
        self.insert_payload(index, SectionPayload::new(html).with_index(index.as_i64()));
    }

    /// Answer `index` with a full payload.
    pub fn insert_payload(&self, index: SectionIndex, payload: SectionPayload) {
        self.answers.borrow_mut().insert(index, Ok(payload));
    }

    /// Make requests for `index` fail with `error`.
    pub fn fail(&self, index: SectionIndex, error: FetchError) {
        self.answers.borrow_mut().insert(index, Err(error));
    }

    /// Every index requested so far, in order.
    pub fn requests(&self) -> Vec<SectionIndex> {
        self.requests.borrow().clone()
    }

    /// Total number of fetches issued.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Number of fetches issued for one index.
    pub fn requests_for(&self, index: SectionIndex) -> usize {
        self.requests.borrow().iter().filter(|&&i| i == index).count()
    }
}

impl SectionSource for InMemorySectionSource {
    async fn fetch(&self, index: SectionIndex) -> Result<SectionPayload, FetchError> {
        self.requests.borrow_mut().push(index);
        if !self.available {
            return Err(FetchError::Unavailable("no section endpoint".to_string()));
        }
        self.answers
            .borrow()
            .get(&index)
            .cloned()
            .unwrap_or(Err(FetchError::Http {
                status: 404,
                status_text: "Not Found".to_string(),
            }))
    }

    fn name(&self) -> &'static str {
        "InMemorySectionSource"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
