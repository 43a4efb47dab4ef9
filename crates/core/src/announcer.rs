//! Screen-reader announcements through a single polite live region.

use lexi_traits::LiveRegion;
use lexi_types::{Labels, SectionIndex};

pub struct Announcer<L> {
    region_id: String,
    region: L,
}

impl<L: LiveRegion> Announcer<L> {
    pub fn new(region_id: impl Into<String>, region: L) -> Self {
        Self {
            region_id: region_id.into(),
            region,
        }
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    /// "Section 3 loaded" for index 2.
    pub fn section_loaded(&mut self, index: SectionIndex, labels: &Labels) {
        let message = labels.section_loaded(index.ordinal());
        self.say(&message);
    }

    pub fn error(&mut self, labels: &Labels) {
        self.say(&labels.error);
    }

    /// Replace the region's text with `message`.
    pub fn say(&mut self, message: &str) {
        self.region.announce(&self.region_id, message);
    }

    pub fn region(&self) -> &L {
        &self.region
    }
}
