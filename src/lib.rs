//! Lexi: section navigation for long-form documents.
//!
//! A document is split into numbered sections that can be read one at a
//! time or all together. This crate re-exports the navigation engine from
//! `lexi-core` together with its foundation crates, and adds an offline
//! [`plan`] of how a page would start out.
//!
//! Browser bindings live in the `lexi-wasm` crate.
//!
//! # Example
//!
//! ```
//! use lexi::{
//!     InMemorySectionSource, MemoryHistory, NavigateOptions, Navigator, NavigatorConfig,
//!     RecordingLiveRegion, RecordingView,
//! };
//!
//! let navigator = Navigator::new(
//!     NavigatorConfig { total_sections: Some(3), ..NavigatorConfig::default() },
//!     InMemorySectionSource::with_sections(["<h2>One</h2>", "<h2>Two</h2>", "<h2>Three</h2>"]),
//!     RecordingView::placeholder(3),
//!     MemoryHistory::new("https://example.org/doc/"),
//!     RecordingLiveRegion::new(),
//! );
//! futures::executor::block_on(navigator.request_navigate(1, NavigateOptions::default()));
//! assert_eq!(navigator.current_index().get(), 1);
//! ```

pub mod plan;

pub use lexi_core::*;
pub use plan::{PagePlan, PlanError};
