//! DocumentView trait for the page the navigator drives.
//!
//! The navigator only pushes projections through this trait: content to
//! show, which pre-rendered sections are visible, where to scroll and how
//! the controls look. The few reads it performs happen once at
//! initialization or for the pre-rendered fallback lookup.

use lexi_types::{BodyContent, ControlsState, ScrollTarget, SectionIndex, SectionVisibility};

pub trait DocumentView {
    /// Whether the content container held real section markup (not a
    /// placeholder) when the page loaded.
    fn has_rendered_content(&self) -> bool;

    /// Number of section links in the table of contents.
    fn toc_entry_count(&self) -> usize;

    /// Whether a pre-rendered element for `index` exists in the page.
    fn has_section(&self, index: SectionIndex) -> bool;

    /// Replace the content container.
    fn set_body(&mut self, content: BodyContent<'_>);

    /// Show or hide the pre-rendered sections.
    fn apply_visibility(&mut self, visibility: SectionVisibility);

    fn scroll_to(&mut self, target: ScrollTarget);

    /// Move focus to the first heading of the content container.
    fn focus_heading(&mut self);

    fn render_controls(&mut self, controls: &ControlsState);

    /// Expand or collapse the table of contents on narrow screens.
    fn set_toc_expanded(&mut self, expanded: bool);
}

/// What the content container of a [`RecordingView`] currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedBody {
    /// Whatever markup the page was created with.
    Initial(String),
    Html(String),
    Loading(String),
    Error(String),
}

impl RecordedBody {
    pub fn text(&self) -> &str {
        match self {
            RecordedBody::Initial(s)
            | RecordedBody::Html(s)
            | RecordedBody::Loading(s)
            | RecordedBody::Error(s) => s,
        }
    }
}

/// An in-memory page.
///
/// Keeps the last projection it received and a log of scroll requests, so
/// tests can assert on what a browser would have shown.
#[derive(Debug, Clone)]
pub struct RecordingView {
    body: RecordedBody,
    sections: Vec<bool>,
    toc_entries: usize,
    controls: Option<ControlsState>,
    scrolls: Vec<ScrollTarget>,
    focus_count: usize,
    toc_expanded: bool,
}

impl RecordingView {
    /// A page whose content is loaded on demand: the container only holds
    /// the loading placeholder.
    pub fn placeholder(toc_entries: usize) -> Self {
        Self {
            body: RecordedBody::Loading("Loading...".to_string()),
            sections: Vec::new(),
            toc_entries,
            controls: None,
            scrolls: Vec::new(),
            focus_count: 0,
            toc_expanded: false,
        }
    }

    /// A page with `sections` pre-rendered sections and a matching TOC.
    pub fn server_rendered(sections: usize) -> Self {
        Self {
            body: RecordedBody::Initial(format!("{sections} sections")),
            sections: vec![true; sections],
            toc_entries: sections,
            ..Self::placeholder(sections)
        }
    }

    /// A page without any content, TOC or sections.
    pub fn empty() -> Self {
        Self::placeholder(0)
    }

    pub fn body(&self) -> &RecordedBody {
        &self.body
    }

    pub fn controls(&self) -> Option<&ControlsState> {
        self.controls.as_ref()
    }

    pub fn scrolls(&self) -> &[ScrollTarget] {
        &self.scrolls
    }

    pub fn last_scroll(&self) -> Option<ScrollTarget> {
        self.scrolls.last().copied()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count
    }

    pub fn toc_expanded(&self) -> bool {
        self.toc_expanded
    }

    /// Indices of the pre-rendered sections currently visible.
    pub fn visible_sections(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter_map(|(i, &visible)| visible.then_some(i))
            .collect()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

impl DocumentView for RecordingView {
    fn has_rendered_content(&self) -> bool {
        match &self.body {
            RecordedBody::Initial(s) | RecordedBody::Html(s) => !s.trim().is_empty(),
            RecordedBody::Loading(_) | RecordedBody::Error(_) => false,
        }
    }

    fn toc_entry_count(&self) -> usize {
        self.toc_entries
    }

    fn has_section(&self, index: SectionIndex) -> bool {
        index.get() < self.sections.len()
    }

    fn set_body(&mut self, content: BodyContent<'_>) {
        self.body = match content {
            BodyContent::Html(html) => RecordedBody::Html(html.to_string()),
            BodyContent::Loading(text) => RecordedBody::Loading(text.to_string()),
            BodyContent::Error(text) => RecordedBody::Error(text.to_string()),
        };
    }

    fn apply_visibility(&mut self, visibility: SectionVisibility) {
        for (i, visible) in self.sections.iter_mut().enumerate() {
            *visible = visibility.is_visible(SectionIndex::new(i));
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.scrolls.push(target);
    }

    fn focus_heading(&mut self) {
        self.focus_count += 1;
    }

    fn render_controls(&mut self, controls: &ControlsState) {
        self.controls = Some(controls.clone());
    }

    fn set_toc_expanded(&mut self, expanded: bool) {
        self.toc_expanded = expanded;
    }
}
