//! Commentary toggles, handled by one delegated listener per document.
//!
//! Works without a navigator so editor previews get working toggles too.
//! Toggles added later are covered by the same listener.

use crate::dom::COMMENTARY_TOGGLE_SELECTOR;
use crate::listener::Listener;
use lexi_core::types::Labels;
use lexi_core::toggle_commentary;
use log::debug;
use web_sys::{Document, Element};

/// Marks a document whose commentary toggles already have a listener.
const BOUND_ATTRIBUTE: &str = "data-lexi-bound";

fn marker(document: &Document) -> Option<Element> {
    document.document_element()
}

pub fn is_bound(document: &Document) -> bool {
    marker(document).is_some_and(|root| root.has_attribute(BOUND_ATTRIBUTE))
}

/// Flips one toggle and its controlled content.
pub fn apply_toggle(document: &Document, toggle: &Element, labels: &Labels) -> bool {
    let Some(target) = toggle
        .get_attribute("aria-controls")
        .and_then(|id| document.get_element_by_id(&id))
    else {
        debug!("Commentary toggle without a resolvable target ignored");
        return false;
    };

    let update = toggle_commentary(toggle.get_attribute("aria-expanded").as_deref(), labels);
    let _ = toggle.set_attribute("aria-expanded", update.expanded_attr());
    let _ = target.set_attribute("aria-hidden", update.hidden_attr());
    toggle.set_text_content(Some(&update.label));
    true
}

/// Binds the document's commentary toggles unless something already did.
///
/// Returns the new listener, or `None` when the document was bound
/// before.
pub fn bind(document: &Document, labels: Labels) -> Option<Listener> {
    if is_bound(document) {
        return None;
    }
    let handler_document = document.clone();
    let listener = Listener::delegate(
        document.as_ref(),
        "click",
        COMMENTARY_TOGGLE_SELECTOR,
        move |toggle, _event| {
            apply_toggle(&handler_document, &toggle, &labels);
        },
    );
    match listener {
        Ok(listener) => {
            if let Some(root) = marker(document) {
                let _ = root.set_attribute(BOUND_ATTRIBUTE, "true");
            }
            Some(listener)
        }
        Err(e) => {
            log::warn!("Failed to bind commentary toggles: {}", e);
            None
        }
    }
}

/// Removes `listener` and clears the document's bound marker.
pub fn unbind(document: &Document, listener: Listener) {
    listener.detach();
    if let Some(root) = marker(document) {
        let _ = root.remove_attribute(BOUND_ATTRIBUTE);
    }
}
