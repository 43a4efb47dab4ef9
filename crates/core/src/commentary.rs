//! Expandable commentary blocks.
//!
//! A toggle owns `aria-expanded`; the element named by its
//! `aria-controls` owns `aria-hidden`. A click flips both and swaps the
//! toggle's label.

use lexi_types::Labels;

/// Attribute values to write after a toggle was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryUpdate {
    /// New `aria-expanded` of the toggle.
    pub expanded: bool,
    /// New `aria-hidden` of the controlled content.
    pub content_hidden: bool,
    pub label: String,
}

impl CommentaryUpdate {
    pub fn expanded_attr(&self) -> &'static str {
        bool_attr(self.expanded)
    }

    pub fn hidden_attr(&self) -> &'static str {
        bool_attr(self.content_hidden)
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Computes the update for a click on a toggle whose current
/// `aria-expanded` is `expanded_attr`. A missing attribute counts as
/// collapsed.
pub fn toggle_commentary(expanded_attr: Option<&str>, labels: &Labels) -> CommentaryUpdate {
    let expanded = expanded_attr != Some("true");
    CommentaryUpdate {
        expanded,
        content_hidden: !expanded,
        label: labels.commentary_toggle(expanded).to_string(),
    }
}
