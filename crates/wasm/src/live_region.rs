//! The polite live region, created on first use if the page has none.

use lexi_core::traits::LiveRegion;
use web_sys::{Document, Element, HtmlElement};
use wasm_bindgen::JsCast;

pub struct WebLiveRegion {
    document: Document,
}

impl WebLiveRegion {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn region(&self, region_id: &str) -> Option<Element> {
        if let Some(existing) = self.document.get_element_by_id(region_id) {
            return Some(existing);
        }

        let region = self.document.create_element("div").ok()?;
        region.set_id(region_id);
        region.set_attribute("aria-live", "polite").ok()?;
        region.set_attribute("aria-atomic", "true").ok()?;
        if let Some(html) = region.dyn_ref::<HtmlElement>() {
            // Visually hidden, still read by assistive technology.
            let style = html.style();
            for (property, value) in [
                ("position", "absolute"),
                ("left", "-10000px"),
                ("width", "1px"),
                ("height", "1px"),
                ("overflow", "hidden"),
            ] {
                style.set_property(property, value).ok()?;
            }
        }
        self.document.body()?.append_child(&region).ok()?;
        Some(region)
    }
}

impl LiveRegion for WebLiveRegion {
    fn announce(&mut self, region_id: &str, message: &str) {
        match self.region(region_id) {
            Some(region) => region.set_text_content(Some(message)),
            None => log::warn!("No live region available for '{}'", message),
        }
    }
}
