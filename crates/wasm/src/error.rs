//! Error handling for WASM bindings.
//!
//! Converts navigator errors into JavaScript `Error` objects carrying a
//! `code` property.

use lexi_core::{FetchError, NavigatorError};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or invalid page configuration
    Config,
    /// A required element is missing from the page
    Dom,
    /// Section request failed or returned an unusable body
    Fetch,
    /// JSON serialization/deserialization error
    Json,
    /// Invalid argument from JavaScript
    InvalidArgument,
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Dom => "DOM_ERROR",
            ErrorCode::Fetch => "FETCH_ERROR",
            ErrorCode::Json => "JSON_ERROR",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Note: This is NOT a wasm_bindgen struct because it converts into a
/// plain JavaScript `Error`.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct LexiError {
    code: ErrorCode,
    message: String,
}

impl LexiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Dom, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Fetch, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Wraps a JavaScript exception thrown by a browser API.
    pub fn from_js(code: ErrorCode, context: &str, value: &JsValue) -> Self {
        let detail = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        Self::new(code, format!("{}: {}", context, detail))
    }
}

impl From<NavigatorError> for LexiError {
    fn from(err: NavigatorError) -> Self {
        let code = match &err {
            NavigatorError::Config(_) => ErrorCode::Config,
            NavigatorError::Json(_) => ErrorCode::Json,
            NavigatorError::Fetch(_) => ErrorCode::Fetch,
            NavigatorError::ViewMode(_) => ErrorCode::InvalidArgument,
        };
        Self::new(code, err.to_string())
    }
}

impl From<FetchError> for LexiError {
    fn from(err: FetchError) -> Self {
        Self::fetch(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for LexiError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::config(format!("Invalid configuration object: {}", err))
    }
}

impl From<LexiError> for JsValue {
    fn from(err: LexiError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_str()),
        )
        .ok();
        js_error.into()
    }
}
