//! Session history through `window.history` and `window.location`.

use lexi_core::traits::HistoryPort;
use lexi_core::types::HistoryState;
use log::warn;
use wasm_bindgen::JsValue;

pub struct BrowserHistory {
    window: web_sys::Window,
}

impl BrowserHistory {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn write(&self, state: HistoryState, url: &str, push: bool) {
        let history = match self.window.history() {
            Ok(history) => history,
            Err(e) => {
                warn!("History API unavailable: {:?}", e);
                return;
            }
        };
        let value = match serde_wasm_bindgen::to_value(&state) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to serialize history state: {}", e);
                return;
            }
        };
        let result = if push {
            history.push_state_with_url(&value, "", Some(url))
        } else {
            history.replace_state_with_url(&value, "", Some(url))
        };
        if let Err(e) = result {
            warn!("Failed to update history: {:?}", e);
        }
    }
}

/// Reads the section state a `popstate` event carried.
///
/// Only objects with a numeric, non-negative `sectionIndex` count.
pub fn state_from_event(state: &JsValue) -> Option<HistoryState> {
    if state.is_null() || state.is_undefined() {
        return None;
    }
    let index = js_sys::Reflect::get(state, &JsValue::from_str("sectionIndex"))
        .ok()?
        .as_f64()?;
    if index < 0.0 || index.fract() != 0.0 || !index.is_finite() {
        return None;
    }
    Some(HistoryState {
        section_index: index as usize,
    })
}

impl HistoryPort for BrowserHistory {
    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn push(&mut self, state: HistoryState, url: &str) {
        self.write(state, url, true);
    }

    fn replace(&mut self, state: HistoryState, url: &str) {
        self.write(state, url, false);
    }
}
