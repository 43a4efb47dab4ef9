//! View projection types.
//!
//! The navigator never reads visibility or control state back from the
//! page. It computes these values from its own state on every transition
//! and hands them to the host, which applies them.

use crate::ids::SectionIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How sections are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// Every section is present and visible; navigation scrolls.
    #[default]
    #[serde(rename = "full")]
    FullText,
    /// Only the current section is visible; navigation swaps it.
    #[serde(rename = "single")]
    SingleSection,
}

impl ViewMode {
    /// The `data-view` attribute value of the toggle button for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::FullText => "full",
            ViewMode::SingleSection => "single",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViewMode(pub String);

impl fmt::Display for UnknownViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownViewMode {}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full" => Ok(ViewMode::FullText),
            "single" => Ok(ViewMode::SingleSection),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// Which pre-rendered sections should be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionVisibility {
    All,
    Only(SectionIndex),
}

impl SectionVisibility {
    pub fn for_mode(mode: ViewMode, current: SectionIndex) -> Self {
        match mode {
            ViewMode::FullText => SectionVisibility::All,
            ViewMode::SingleSection => SectionVisibility::Only(current),
        }
    }

    pub fn is_visible(self, index: SectionIndex) -> bool {
        match self {
            SectionVisibility::All => true,
            SectionVisibility::Only(only) => only == index,
        }
    }
}

/// Where the viewport should move after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Top of the page, immediately.
    Top,
    /// Title of a section, smoothly and after the next layout.
    Section(SectionIndex),
}

/// What the content container should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyContent<'a> {
    /// A section's markup.
    Html(&'a str),
    /// The loading placeholder with its localized text.
    Loading(&'a str),
    /// The error placeholder with its localized text.
    Error(&'a str),
}

/// The rendered state of every navigation control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsState {
    pub current: SectionIndex,
    pub total: usize,
    pub mode: ViewMode,
    pub navigating: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub prev_label: String,
    pub next_label: String,
    /// `value` of the jump select (zero-based).
    pub jump_value: String,
    /// Text of the selected jump option (one-based).
    pub jump_display: String,
}

impl ControlsState {
    /// Whether the TOC link for `index` should be marked as current.
    pub fn is_active(&self, index: i64) -> bool {
        index == self.current.as_i64()
    }
}

/// State stored with each history entry the navigator pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub section_index: usize,
}

impl HistoryState {
    pub fn new(index: SectionIndex) -> Self {
        Self {
            section_index: index.get(),
        }
    }
}
