//! Event listeners that can be removed again.

use crate::error::{ErrorCode, LexiError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget};

/// A closure registered for one event on one target.
///
/// Dropping a `Listener` without calling [`detach`] would invalidate the
/// closure while the browser still holds it, so owners keep listeners
/// until they detach them or [`leak`] them for the page lifetime.
///
/// [`detach`]: Listener::detach
/// [`leak`]: Listener::leak
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, LexiError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| {
                LexiError::from_js(ErrorCode::Dom, &format!("Failed to listen for '{}'", event), &e)
            })?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Attaches a listener on `root` that only fires for events whose
    /// target is inside an element matching `selector`. The handler gets
    /// that element.
    pub fn delegate(
        root: &EventTarget,
        event: &'static str,
        selector: &'static str,
        mut handler: impl FnMut(Element, Event) + 'static,
    ) -> Result<Self, LexiError> {
        Self::attach(root, event, move |ev: Event| {
            if let Some(matched) = closest(&ev, selector) {
                handler(matched, ev);
            }
        })
    }

    pub fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }

    /// Keeps the listener for the rest of the page lifetime.
    pub fn leak(self) {
        self.closure.forget();
    }
}

/// The element matching `selector` at or above the event target.
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}
