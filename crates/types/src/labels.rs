//! Localized strings.
//!
//! The page supplies translations under `i18n`; missing keys keep their
//! English defaults.

use serde::Deserialize;

/// Localized strings used by the navigator.
///
/// Every key falls back to its English default when the page does not
/// provide it, so lookups never need an ad hoc `or` at the use site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub loading: String,
    pub error: String,
    pub previous: String,
    pub next: String,
    pub section: String,
    pub loaded: String,
    pub show_commentary: String,
    pub hide_commentary: String,
    pub full_text: String,
    pub single_section: String,
    pub print_success: String,
    pub citation_copied: String,
    pub table_of_contents: String,
    pub section_not_found: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            loading: "Loading...".to_string(),
            error: "Error loading section".to_string(),
            previous: "Previous".to_string(),
            next: "Next".to_string(),
            section: "Section".to_string(),
            loaded: "loaded".to_string(),
            show_commentary: "Show Commentary".to_string(),
            hide_commentary: "Hide Commentary".to_string(),
            full_text: "Full text".to_string(),
            single_section: "Single section".to_string(),
            print_success: "Print dialog opened".to_string(),
            citation_copied: "Citation copied to clipboard".to_string(),
            table_of_contents: "Table of Contents".to_string(),
            section_not_found: "Section not found".to_string(),
        }
    }
}

impl Labels {
    /// `aria-label` for the previous-section buttons, e.g. "Previous Section".
    pub fn previous_aria(&self) -> String {
        format!("{} {}", self.previous, self.section)
    }

    /// `aria-label` for the next-section buttons, e.g. "Next Section".
    pub fn next_aria(&self) -> String {
        format!("{} {}", self.next, self.section)
    }

    /// Announcement after a section has been displayed, e.g. "Section 3 loaded".
    pub fn section_loaded(&self, ordinal: usize) -> String {
        format!("{} {} {}", self.section, ordinal, self.loaded)
    }

    /// Fallback title for a section without a heading, e.g. "Section 3".
    pub fn section_title(&self, ordinal: usize) -> String {
        format!("{} {}", self.section, ordinal)
    }

    /// Label of a commentary toggle in the given expansion state.
    pub fn commentary_toggle(&self, expanded: bool) -> &str {
        if expanded {
            &self.hide_commentary
        } else {
            &self.show_commentary
        }
    }
}
