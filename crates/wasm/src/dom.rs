//! The document view backed by the browser DOM.
//!
//! Every control is optional: a missing element is skipped, never an
//! error. Only the navigator root and its content container are required
//! to construct a view.

use crate::error::LexiError;
use lexi_core::traits::DocumentView;
use lexi_core::types::{BodyContent, ControlsState, ScrollTarget, SectionIndex, SectionVisibility};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlSelectElement, NodeList};

pub const ROOT_SELECTOR: &str = ".lexi-doc";
/// Set on a root while a navigator is mounted on it.
pub const MOUNTED_ATTRIBUTE: &str = "data-lexi-nav-bound";
pub const BODY_SELECTOR: &str = ".lexi-doc__body";
pub const SECTION_SELECTOR: &str = ".lexi-section[data-section-index]";
pub const TOC_LINK_SELECTOR: &str = ".lexi-toc__link[data-index]";
pub const PREV_SELECTOR: &str = ".lexi-nav__prev";
pub const NEXT_SELECTOR: &str = ".lexi-nav__next";
pub const JUMP_SELECTOR: &str = ".lexi-jump__select";
pub const VIEW_TOGGLE_SELECTOR: &str = ".lexi-view-toggle";
pub const VIEW_BUTTON_SELECTOR: &str = ".lexi-view-toggle__btn[data-view]";
pub const TOC_TOGGLE_SELECTOR: &str = ".lexi-toc__toggle";
pub const TOC_SELECTOR: &str = ".lexi-toc";
pub const PRINT_SELECTOR: &str = ".lexi-print-btn";
pub const CITATION_SELECTOR: &str = ".lexi-copy-citation-btn";
pub const COMMENTARY_TOGGLE_SELECTOR: &str = ".lexi-commentary-toggle";
const HEADING_SELECTOR: &str = "h1, h2, h3";
const SECTION_TITLE_SELECTOR: &str = ".lexi-section-title";

/// Collects a `NodeList` query result into elements, treating a failed
/// query as an empty match.
pub fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The first navigator root in `document` that has a content container
/// and no navigator mounted yet.
pub fn find_root(document: &Document) -> Option<Element> {
    elements(document.query_selector_all(ROOT_SELECTOR))
        .into_iter()
        .filter(|root| !root.has_attribute(MOUNTED_ATTRIBUTE))
        .find(|root| root.query_selector(BODY_SELECTOR).ok().flatten().is_some())
}

/// The integer in `attribute` of `element`, if it parses.
pub fn int_attribute(element: &Element, attribute: &str) -> Option<i64> {
    element.get_attribute(attribute)?.trim().parse().ok()
}

fn set_attr(element: &Element, name: &str, value: &str) {
    // Attribute names here are static and valid; a failure is not actionable.
    let _ = element.set_attribute(name, value);
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub struct WebDocumentView {
    document: Document,
    root: Element,
    body: Element,
    sticky_offset: f64,
}

impl WebDocumentView {
    /// Builds the view of the document under `root`. Every control lookup
    /// stays inside `root`.
    pub fn locate(root: Element, sticky_offset: u32) -> Result<Self, LexiError> {
        let document = root
            .owner_document()
            .ok_or_else(|| LexiError::dom("Navigator root is not attached to a document"))?;
        let body = root
            .query_selector(BODY_SELECTOR)
            .ok()
            .flatten()
            .ok_or_else(|| LexiError::dom(format!("No {} element found", BODY_SELECTOR)))?;

        let sticky_offset = if sticky_offset > 0 {
            f64::from(sticky_offset)
        } else {
            int_attribute(&root, "data-sticky-offset")
                .filter(|&offset| offset > 0)
                .map(|offset| offset as f64)
                .unwrap_or(0.0)
        };

        Ok(Self {
            document,
            root,
            body,
            sticky_offset,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// The pre-rendered element of section `index`, if present.
    pub fn section(&self, index: SectionIndex) -> Option<Element> {
        self.root
            .query_selector(&format!(
                ".lexi-section[data-section-index=\"{}\"]",
                index.get()
            ))
            .ok()
            .flatten()
    }

    /// Text of the first heading in section `index`.
    pub fn section_heading(&self, index: SectionIndex) -> Option<String> {
        self.section(index)?
            .query_selector("h1, h2, h3, h4, h5, h6")
            .ok()
            .flatten()?
            .text_content()
    }

    fn all(&self, selector: &str) -> Vec<Element> {
        elements(self.root.query_selector_all(selector))
    }

    fn placeholder(&self, class: &str, text: &str) {
        self.body.set_inner_html("");
        let Ok(div) = self.document.create_element("div") else {
            return;
        };
        div.set_class_name(class);
        set_attr(&div, "aria-live", "polite");
        div.set_text_content(Some(text));
        let _ = self.body.append_child(&div);
    }
}

impl DocumentView for WebDocumentView {
    fn has_rendered_content(&self) -> bool {
        !self.body.inner_html().trim().is_empty()
            && self.body.query_selector(".lexi-loading").ok().flatten().is_none()
    }

    fn toc_entry_count(&self) -> usize {
        self.all(TOC_LINK_SELECTOR)
            .iter()
            .filter(|link| int_attribute(link, "data-index").is_some_and(|i| i >= 0))
            .count()
    }

    fn has_section(&self, index: SectionIndex) -> bool {
        self.section(index).is_some()
    }

    fn set_body(&mut self, content: BodyContent<'_>) {
        match content {
            BodyContent::Html(html) => self.body.set_inner_html(html),
            BodyContent::Loading(text) => self.placeholder("lexi-loading", text),
            BodyContent::Error(text) => self.placeholder("lexi-error", text),
        }
    }

    fn apply_visibility(&mut self, visibility: SectionVisibility) {
        for section in elements(self.root.query_selector_all(SECTION_SELECTOR)) {
            let Some(index) = int_attribute(&section, "data-section-index") else {
                continue;
            };
            let visible = usize::try_from(index)
                .map(|i| visibility.is_visible(SectionIndex::new(i)))
                .unwrap_or(false);
            if let Some(section) = section.dyn_ref::<HtmlElement>() {
                let style = section.style();
                if visible {
                    let _ = style.remove_property("display");
                } else {
                    let _ = style.set_property("display", "none");
                }
            }
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match target {
            ScrollTarget::Top => window.scroll_to_with_x_and_y(0.0, 0.0),
            ScrollTarget::Section(index) => {
                let Some(section) = self.section(index) else {
                    return;
                };
                let anchor = section
                    .query_selector(SECTION_TITLE_SELECTOR)
                    .ok()
                    .flatten()
                    .unwrap_or(section);
                let offset = self.sticky_offset;
                let scroll_window = window.clone();
                // Wait one frame so visibility changes have been laid out.
                let callback = Closure::once_into_js(move || {
                    let top = anchor.get_bounding_client_rect().top()
                        + scroll_window.scroll_y().unwrap_or(0.0)
                        - offset;
                    let options = web_sys::ScrollToOptions::new();
                    options.set_top(top.max(0.0));
                    options.set_behavior(web_sys::ScrollBehavior::Smooth);
                    scroll_window.scroll_to_with_scroll_to_options(&options);
                });
                let _ = window.request_animation_frame(callback.unchecked_ref());
            }
        }
    }

    fn focus_heading(&mut self) {
        let Some(heading) = self
            .body
            .query_selector(HEADING_SELECTOR)
            .ok()
            .flatten()
            .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if !heading.has_attribute("tabindex") {
            set_attr(&heading, "tabindex", "-1");
        }
        let _ = heading.focus();
    }

    fn render_controls(&mut self, controls: &ControlsState) {
        for link in self.all(TOC_LINK_SELECTOR) {
            let active = int_attribute(&link, "data-index").is_some_and(|i| controls.is_active(i));
            toggle_class(&link, "active", active);
            set_attr(&link, "aria-current", if active { "page" } else { "false" });
        }

        let buttons = [
            (PREV_SELECTOR, controls.prev_disabled, &controls.prev_label),
            (NEXT_SELECTOR, controls.next_disabled, &controls.next_label),
        ];
        for (selector, disabled, label) in buttons {
            for button in self.all(selector) {
                match button.dyn_ref::<HtmlButtonElement>() {
                    Some(button) => button.set_disabled(disabled),
                    None => set_attr(&button, "aria-disabled", bool_attr(disabled)),
                }
                set_attr(&button, "aria-label", label);
            }
        }

        for select in self.all(JUMP_SELECTOR) {
            if let Some(select) = select.dyn_ref::<HtmlSelectElement>() {
                select.set_value(&controls.jump_value);
            }
        }

        for button in self.all(VIEW_BUTTON_SELECTOR) {
            let active = button.get_attribute("data-view").as_deref() == Some(controls.mode.as_str());
            toggle_class(&button, "is-active", active);
            set_attr(&button, "aria-pressed", bool_attr(active));
        }

        set_attr(&self.root, "data-view", controls.mode.as_str());
        set_attr(&self.root, "aria-busy", bool_attr(controls.navigating));
    }

    fn set_toc_expanded(&mut self, expanded: bool) {
        for toggle in self.all(TOC_TOGGLE_SELECTOR) {
            set_attr(&toggle, "aria-expanded", bool_attr(expanded));
        }
        toggle_class(&self.root, "toc-expanded", expanded);
        for toc in self.all(TOC_SELECTOR) {
            toggle_class(&toc, "expanded", expanded);
        }
    }
}
