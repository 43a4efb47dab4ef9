// src/error.rs
//! Error types for setting up and driving a navigator.

use lexi_traits::FetchError;
use lexi_types::UnknownViewMode;
use thiserror::Error;

/// The main error enum for navigator operations that can fail outright.
///
/// Section loading failures are not reported through this type while
/// navigating; they become an error placeholder and an announcement.
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Section fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Unknown view mode: '{0}'")]
    ViewMode(String),
}

impl From<UnknownViewMode> for NavigatorError {
    fn from(e: UnknownViewMode) -> Self {
        NavigatorError::ViewMode(e.0)
    }
}
