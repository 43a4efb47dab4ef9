//! `SectionNavigator`, the JavaScript entry point.

use crate::binder::{self, Bindings};
use crate::dom::{self, ROOT_SELECTOR, WebDocumentView};
use crate::error::LexiError;
use crate::fetch::RestSectionSource;
use crate::history::BrowserHistory;
use crate::live_region::WebLiveRegion;
use lexi_core::types::{NavigatorConfig, PageConfig, ViewMode};
use lexi_core::{NavigateOptions, Navigator, NavigatorError};
use log::info;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, Element, Window};

pub type WebNavigator = Navigator<RestSectionSource, WebDocumentView, BrowserHistory, WebLiveRegion>;

/// Name of the configuration object the page injects on `window`.
pub const PAGE_CONFIG_GLOBAL: &str = "letlexiSectionNav";

pub(crate) fn browser() -> Result<(Window, Document), LexiError> {
    let window = web_sys::window().ok_or_else(|| LexiError::dom("No window object available"))?;
    let document = window
        .document()
        .ok_or_else(|| LexiError::dom("No document available"))?;
    Ok((window, document))
}

/// Reads the page configuration from `value`, or from the page-injected
/// global when `value` is `undefined` or `null`.
pub(crate) fn page_config(window: &Window, value: JsValue) -> Result<PageConfig, LexiError> {
    let value = if value.is_undefined() || value.is_null() {
        js_sys::Reflect::get(window, &JsValue::from_str(PAGE_CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED)
    } else {
        value
    };
    if value.is_undefined() || value.is_null() {
        return Ok(PageConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Navigates the sections of the document on this page.
///
/// # Example
///
/// ```javascript
/// import init, { SectionNavigator } from '@lexi/section-nav';
///
/// await init();
/// const nav = SectionNavigator.mount(undefined, document.querySelector('.lexi-doc'));
/// await nav.navigate(2);
/// nav.setMode('single');
/// ```
#[wasm_bindgen]
pub struct SectionNavigator {
    navigator: Rc<WebNavigator>,
    bindings: Bindings,
}

#[wasm_bindgen]
impl SectionNavigator {
    /// Mounts a navigator on `root`, or on the first `.lexi-doc` element
    /// without one when `root` is omitted.
    ///
    /// `config` defaults to `window.letlexiSectionNav`. Fails with
    /// `DOM_ERROR` when there is no such root, when the root has no content
    /// container, or when a navigator is already mounted on it. Fails with
    /// `CONFIG_ERROR` for an unreadable config.
    #[wasm_bindgen]
    pub fn mount(config: JsValue, root: Option<Element>) -> Result<SectionNavigator, JsValue> {
        let (window, document) = browser()?;
        let config = NavigatorConfig::from(page_config(&window, config)?);
        let root = match root {
            Some(root) => root,
            None => dom::find_root(&document).ok_or_else(|| {
                LexiError::dom(format!("No {} element without a navigator found", ROOT_SELECTOR))
            })?,
        };
        let view = WebDocumentView::locate(root.clone(), config.sticky_offset)?;
        let mut bindings = Bindings::claim(document.clone(), root)?;

        let navigator = Rc::new(Navigator::new(
            config.clone(),
            RestSectionSource::new(config.endpoint.clone()),
            view,
            BrowserHistory::new(window.clone()),
            WebLiveRegion::new(document),
        ));
        info!(
            "Mounted section navigator ({} sections, {} mode)",
            navigator.total_sections(),
            navigator.mode()
        );

        bindings.bind_controls(&navigator, &window);
        bindings.bind_commentary(&navigator);

        let started = Rc::clone(&navigator);
        spawn_local(async move {
            started.start().await;
            binder::schedule_prefetch(&started);
        });

        Ok(SectionNavigator {
            navigator,
            bindings,
        })
    }

    /// Navigates to `index` and pushes a history entry.
    ///
    /// Resolves to `true` when the section was displayed, `false` when the
    /// request was ignored or failed.
    #[wasm_bindgen]
    pub fn navigate(&self, index: i32) -> js_sys::Promise {
        let navigator = Rc::clone(&self.navigator);
        future_to_promise(async move {
            let outcome = navigator
                .request_navigate(i64::from(index), NavigateOptions::default())
                .await;
            let displayed = outcome.is_displayed();
            if displayed {
                binder::schedule_prefetch(&navigator);
            }
            Ok(JsValue::from_bool(displayed))
        })
    }

    /// Switches to `"full"` or `"single"`. Returns `false` when the mode
    /// was already active.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<bool, JsValue> {
        let mode: ViewMode = mode
            .parse()
            .map_err(|e| LexiError::from(NavigatorError::from(e)))?;
        Ok(self.navigator.set_mode(mode))
    }

    /// Call after replacing part of the page: binds commentary toggles in
    /// new content and re-applies the current projection.
    #[wasm_bindgen(js_name = domReplaced)]
    pub fn dom_replaced(&mut self) {
        self.bindings.bind_commentary(&self.navigator);
        self.navigator.refresh();
    }

    #[wasm_bindgen(getter, js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.navigator.current_index().get()
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.navigator.mode().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = isNavigating)]
    pub fn is_navigating(&self) -> bool {
        self.navigator.is_navigating()
    }

    #[wasm_bindgen(getter, js_name = totalSections)]
    pub fn total_sections(&self) -> usize {
        self.navigator.total_sections()
    }

    /// Number of listeners currently attached by this navigator.
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.bindings.listener_count()
    }

    /// Removes every listener this navigator attached and frees its root
    /// for another mount. Freeing the object does the same.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        self.bindings.release();
        info!("Section navigator destroyed");
    }
}
