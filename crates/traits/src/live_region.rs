//! LiveRegion trait for assistive-technology announcements.

use std::collections::HashMap;

pub trait LiveRegion {
    /// Replace the text of the polite live region `region_id`, creating
    /// the region first if the page has none.
    fn announce(&mut self, region_id: &str, message: &str);
}

/// An in-memory live region that keeps every message it received.
#[derive(Debug, Clone, Default)]
pub struct RecordingLiveRegion {
    regions: HashMap<String, String>,
    messages: Vec<String>,
}

impl RecordingLiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a region, if it was ever written.
    pub fn text(&self, region_id: &str) -> Option<&str> {
        self.regions.get(region_id).map(String::as_str)
    }

    /// Every announcement in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl LiveRegion for RecordingLiveRegion {
    fn announce(&mut self, region_id: &str, message: &str) {
        self.regions
            .insert(region_id.to_string(), message.to_string());
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_write_replaces_text() {
        let mut region = RecordingLiveRegion::new();
        region.announce("lexi-announcer-1", "Section 1 loaded");
        region.announce("lexi-announcer-1", "Section 2 loaded");
        assert_eq!(region.text("lexi-announcer-1"), Some("Section 2 loaded"));
        assert_eq!(region.messages().len(), 2);
        assert_eq!(region.text("lexi-announcer-2"), None);
    }
}
