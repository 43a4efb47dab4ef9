//! WebAssembly bindings for the Lexi section navigator.
//!
//! This crate connects the platform-agnostic navigator in `lexi-core` to a
//! WordPress document page: the DOM, `window.history`, a live region and
//! the section REST endpoint.
//!
//! # Architecture
//!
//! The navigator itself never touches the browser. This crate implements
//! its host traits with `web-sys` and wires page events to it:
//!
//! - [`dom`] - `WebDocumentView`, the DOM projection of the view state
//! - [`fetch`] - `RestSectionSource`, sections over `fetch`
//! - [`history`] - `BrowserHistory`, `pushState`/`replaceState`
//! - [`live_region`] - `WebLiveRegion`, the polite announcer element
//! - [`binder`] - event listeners for every navigation control
//! - [`commentary`] - commentary toggles, with or without a navigator
//! - [`actions`] - print and copy-citation
//! - [`error`] - Error types with JavaScript interop
//!
//! Everything runs on the page's event loop. Handlers share the navigator
//! through `Rc` and spawn navigations with `spawn_local`.
//!
//! # Example
//!
//! ```javascript
//! import init, { boot } from '@lexi/section-nav';
//!
//! await init();
//! const nav = boot(); // undefined on pages without a navigator
//! ```

pub mod actions;
pub mod binder;
pub mod commentary;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod history;
pub mod listener;
pub mod live_region;
mod reader;

pub use dom::WebDocumentView;
pub use error::{ErrorCode, LexiError};
pub use fetch::RestSectionSource;
pub use history::BrowserHistory;
pub use live_region::WebLiveRegion;
pub use reader::{SectionNavigator, WebNavigator};

use lexi_core::types::{Labels, NavigatorConfig};
use log::debug;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// This function sets up panic hooks for better error messages in the browser console.
/// It is called automatically when using wasm-pack's generated JavaScript.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }
}

/// Binds commentary toggles on the whole page.
///
/// Safe to call repeatedly; only the first call attaches a listener.
/// Returns `true` when this call bound the toggles.
#[wasm_bindgen(js_name = bindCommentaryToggles)]
pub fn bind_commentary_toggles() -> Result<bool, JsValue> {
    let (window, document) = reader::browser()?;
    let labels = reader::page_config(&window, JsValue::UNDEFINED)
        .map(|page| NavigatorConfig::from(page).labels)
        .unwrap_or_else(|e| {
            debug!("Using default labels: {}", e);
            Labels::default()
        });
    match commentary::bind(&document, labels) {
        Some(listener) => {
            listener.leak();
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Sets up the page: commentary toggles everywhere, and a navigator on
/// the first document that does not have one yet.
///
/// Returns `undefined` when there is nothing left to mount, so calling it
/// again after the page was set up attaches nothing.
#[wasm_bindgen]
pub fn boot() -> Result<Option<SectionNavigator>, JsValue> {
    let (_, document) = reader::browser()?;
    match dom::find_root(&document) {
        Some(root) => SectionNavigator::mount(JsValue::UNDEFINED, Some(root)).map(Some),
        None => {
            bind_commentary_toggles()?;
            Ok(None)
        }
    }
}

/// Get the version of the lexi-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
