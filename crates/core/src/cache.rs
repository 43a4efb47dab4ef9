//! Section cache.
//!
//! Holds the markup of every successfully fetched section for the life of
//! the page. Entries are never evicted; a document has a bounded number of
//! sections.

use lexi_types::{SectionIndex, SharedHtml};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct SectionCache {
    entries: HashMap<SectionIndex, SharedHtml>,
}

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: SectionIndex) -> Option<SharedHtml> {
        self.entries.get(&index).cloned()
    }

    pub fn contains(&self, index: SectionIndex) -> bool {
        self.entries.contains_key(&index)
    }

    /// Stores markup for `index`. Writing the same index again replaces the
    /// entry, which is harmless: every writer stores the same section.
    pub fn insert(&mut self, index: SectionIndex, html: SharedHtml) {
        self.entries.insert(index, html);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
