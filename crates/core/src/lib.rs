//! # lexi-core
//!
//! Platform-agnostic section navigation for the Lexi document reader.
//!
//! This crate provides everything a page needs to move between the
//! sections of one long document:
//! - **state**: View state and its transitions
//! - **fetcher** / **cache**: Section loading with request sharing
//! - **location**: The `sec` query parameter and `#sec-…` anchors
//! - **controls**: Rendered control state, inputs and binding registry
//! - **announcer**: Live-region announcements
//! - **commentary**: Commentary toggle transitions
//! - **citation**: Citation text and print documents
//! - **navigator**: The per-document navigator tying it together
//! - **error**: Error types
//!
//! ## Design Principle
//!
//! This crate has **no platform dependencies**:
//! - No DOM access (`web-sys`)
//! - No network access
//! - No async runtime
//!
//! The page, the session history, the live region and the section
//! endpoint are reached through the traits in `lexi-traits`, which the
//! browser crate implements with `web-sys` and tests implement in memory.

// Re-export foundation crates
pub use lexi_traits as traits;
pub use lexi_types as types;

pub mod announcer;
pub mod cache;
pub mod citation;
pub mod commentary;
pub mod controls;
pub mod error;
pub mod fetcher;
pub mod location;
pub mod navigator;
pub mod state;

pub use announcer::Announcer;
pub use cache::SectionCache;
pub use commentary::{CommentaryUpdate, toggle_commentary};
pub use controls::{
    BindingKey, BindingRegistry, Command, ControlKind, FloatingToggle, Step, key_step,
};
pub use error::NavigatorError;
pub use fetcher::SectionFetcher;
pub use location::{initial_index, with_section_param};
pub use navigator::{NavigateOptions, NavigationOutcome, Navigator};
pub use state::{NavigationTicket, Rejection, ViewState};

// Re-export commonly used types from foundation crates
pub use types::{
    ControlsState, DocumentId, HistoryState, Labels, NavigatorConfig, PageConfig, ScrollTarget,
    SectionIndex, SectionVisibility, ViewMode,
};

// Re-export platform abstraction traits
pub use traits::{
    DocumentView, FetchError, HistoryPort, InMemorySectionSource, LiveRegion, MemoryHistory,
    RecordingLiveRegion, RecordingView, SectionSource,
};
