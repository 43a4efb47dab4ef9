//! Offline view of how a page would be navigated.
//!
//! Builds a navigator against in-memory stand-ins for the page so the
//! starting position, view mode and request URLs can be checked without a
//! browser. Used by the `lexi` binary.

use lexi_core::types::{NavigatorConfig, PageConfig, SectionIndex, ViewMode};
use lexi_core::{
    InMemorySectionSource, MemoryHistory, Navigator, NavigatorError, RecordingLiveRegion,
    RecordingView, with_section_param,
};
use log::debug;
use serde_json::{Value, json};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

/// How the page at one URL starts out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub current: SectionIndex,
    pub total: usize,
    pub mode: ViewMode,
    pub announcer_id: String,
    /// Section request URL for `current`, if the page has an endpoint.
    pub request_url: Option<String>,
    /// The page URL with `sec` set, one per section.
    pub permalinks: Vec<String>,
}

impl PagePlan {
    /// Plans a page whose TOC lists `toc_entries` sections.
    ///
    /// `server_rendered` says whether the sections are already in the page
    /// rather than loaded on demand.
    pub fn new(config: NavigatorConfig, url: &str, toc_entries: usize, server_rendered: bool) -> Self {
        let view = if server_rendered {
            RecordingView::server_rendered(toc_entries)
        } else {
            RecordingView::placeholder(toc_entries)
        };
        let request_base = config.endpoint.clone();
        let navigator = Navigator::new(
            config,
            InMemorySectionSource::unavailable(),
            view,
            MemoryHistory::new(url),
            RecordingLiveRegion::new(),
        );

        let current = navigator.current_index();
        let total = navigator.total_sections();
        debug!("Planned {} sections starting at {}", total, current);

        Self {
            current,
            total,
            mode: navigator.mode(),
            announcer_id: navigator.config().announcer_id(),
            request_url: request_base.map(|endpoint| endpoint.url_for(current.get())),
            permalinks: (0..total)
                .map(|i| with_section_param(url, SectionIndex::new(i)))
                .collect(),
        }
    }

    /// Plans from the page configuration in JSON form.
    pub fn from_json(
        config_json: &str,
        url: &str,
        toc_entries: usize,
        server_rendered: bool,
    ) -> Result<Self, PlanError> {
        let page = PageConfig::from_json(config_json).map_err(NavigatorError::from)?;
        Ok(Self::new(
            NavigatorConfig::from(page),
            url,
            toc_entries,
            server_rendered,
        ))
    }

    /// Plans from a configuration file.
    pub fn from_file(
        path: impl AsRef<Path>,
        url: &str,
        toc_entries: usize,
        server_rendered: bool,
    ) -> Result<Self, PlanError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, url, toc_entries, server_rendered)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "current": self.current.get(),
            "display": self.current.ordinal(),
            "total": self.total,
            "mode": self.mode.as_str(),
            "announcer": self.announcer_id,
            "request": self.request_url,
            "permalinks": self.permalinks,
        })
    }
}
