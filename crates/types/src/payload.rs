//! Section payloads, on the wire and once accepted.

use serde::Deserialize;
use std::sync::Arc;

/// Section markup shared between the cache and the page.
pub type SharedHtml = Arc<str>;

/// The JSON body returned by the section endpoint.
///
/// Every field is optional on the wire; a body without `html` is a
/// malformed response and is rejected by the section source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionResponse {
    pub html: Option<String>,
    pub index: Option<i64>,
    pub total: Option<usize>,
}

/// A successfully fetched section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPayload {
    pub html: SharedHtml,
    /// The index the server says it returned. It can differ from the
    /// requested one when the server clamps the request.
    pub index: Option<i64>,
    pub total: Option<usize>,
}

impl SectionPayload {
    pub fn new(html: impl Into<SharedHtml>) -> Self {
        Self {
            html: html.into(),
            index: None,
            total: None,
        }
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}
