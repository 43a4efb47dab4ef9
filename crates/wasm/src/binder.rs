//! Wires page controls to a navigator.
//!
//! A navigator owns one `.lexi-doc` root. Its controls are delegated on
//! that root, so two documents on one page never drive each other. The
//! root carries a mounted marker while bound, and every control kind is
//! bound at most once through the binding registry. Listeners are kept
//! so they can be removed on destroy or drop.

use crate::actions;
use crate::commentary;
use crate::dom::{
    self, CITATION_SELECTOR, JUMP_SELECTOR, MOUNTED_ATTRIBUTE, NEXT_SELECTOR, PREV_SELECTOR,
    PRINT_SELECTOR, TOC_LINK_SELECTOR, TOC_TOGGLE_SELECTOR, VIEW_BUTTON_SELECTOR,
    VIEW_TOGGLE_SELECTOR,
};
use crate::error::{ErrorCode, LexiError};
use crate::history::state_from_event;
use crate::listener::Listener;
use crate::reader::WebNavigator;
use js_sys::{Array, Function, Reflect};
use lexi_core::{BindingKey, BindingRegistry, Command, ControlKind, FloatingToggle, Step};
use lexi_core::types::ViewMode;
use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlSelectElement, IntersectionObserver,
    IntersectionObserverEntry, KeyboardEvent, PopStateEvent, Window,
};

/// Runs `command` and schedules a prefetch once something was displayed.
pub fn run(nav: &Rc<WebNavigator>, command: Command) {
    let nav = Rc::clone(nav);
    spawn_local(async move {
        let outcome = nav.dispatch(command).await;
        debug!("Command finished: {:?}", outcome);
        if outcome.is_displayed() {
            schedule_prefetch(&nav);
        }
    });
}

/// Prefetches the next section when the browser is idle.
pub fn schedule_prefetch(nav: &Rc<WebNavigator>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let nav = Rc::clone(nav);
    let callback = Closure::once_into_js(move || {
        spawn_local(async move {
            nav.prefetch_next().await;
        });
    });

    let idle = Reflect::get(&window, &JsValue::from_str("requestIdleCallback"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok());
    match idle {
        Some(request_idle) => {
            let _ = request_idle.call1(&window, &callback);
        }
        None => {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 200);
        }
    }
}

/// The floating copy of the view toggle and what keeps it in sync.
struct Floating {
    element: Element,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

pub struct Bindings {
    document: Document,
    root: Element,
    registry: BindingRegistry,
    listeners: Vec<Listener>,
    commentary: Option<Listener>,
    floating: Option<Floating>,
    released: bool,
}

impl Bindings {
    /// Claims `root` for one navigator.
    ///
    /// Fails with `DOM_ERROR` while another navigator is mounted on it, so
    /// re-initialising the page never stacks a second set of listeners.
    pub fn claim(document: Document, root: Element) -> Result<Self, LexiError> {
        if root.has_attribute(MOUNTED_ATTRIBUTE) {
            return Err(LexiError::dom("A section navigator is already mounted on this element"));
        }
        root.set_attribute(MOUNTED_ATTRIBUTE, "true")
            .map_err(|e| LexiError::from_js(ErrorCode::Dom, "Failed to mark navigator root", &e))?;
        Ok(Self {
            document,
            root,
            registry: BindingRegistry::new(),
            listeners: Vec::new(),
            commentary: None,
            floating: None,
            released: false,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn is_bound(&self, kind: ControlKind) -> bool {
        self.registry.is_bound(&BindingKey::Control(kind))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + usize::from(self.commentary.is_some())
    }

    /// Binds every control kind present under the root. Kinds bound
    /// before are skipped.
    pub fn bind_controls(&mut self, nav: &Rc<WebNavigator>, window: &Window) {
        if self.released {
            return;
        }
        for kind in ControlKind::ALL {
            if self.is_bound(kind) {
                continue;
            }
            match self.bind_kind(kind, nav, window) {
                Ok(true) => {
                    self.registry.claim(BindingKey::Control(kind));
                }
                Ok(false) => debug!("No element for {:?}; not bound", kind),
                Err(e) => warn!("Failed to bind {:?}: {}", kind, e),
            }
        }
    }

    /// Binds commentary toggles for the document unless already bound.
    pub fn bind_commentary(&mut self, nav: &WebNavigator) {
        if self.released {
            return;
        }
        let key = BindingKey::CommentaryRoot("document".to_string());
        if self.registry.is_bound(&key) && commentary::is_bound(&self.document) {
            return;
        }
        if let Some(listener) = commentary::bind(&self.document, nav.labels().clone()) {
            self.commentary = Some(listener);
            self.registry.claim(key);
        }
    }

    fn push(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn bind_kind(
        &mut self,
        kind: ControlKind,
        nav: &Rc<WebNavigator>,
        window: &Window,
    ) -> Result<bool, LexiError> {
        let root = self.root.clone();
        let document = self.document.clone();
        let present = |selector: &str| root.query_selector(selector).ok().flatten().is_some();

        match kind {
            ControlKind::TocLinks => {
                if !present(TOC_LINK_SELECTOR) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                self.push(Listener::delegate(root.as_ref(), "click", TOC_LINK_SELECTOR, move |link, ev| {
                    ev.prevent_default();
                    if let Some(index) = dom::int_attribute(&link, "data-index") {
                        run(&nav, Command::Toc(index));
                    }
                })?);
            }
            ControlKind::PrevButtons | ControlKind::NextButtons => {
                let (selector, step) = if kind == ControlKind::PrevButtons {
                    (PREV_SELECTOR, Step::Previous)
                } else {
                    (NEXT_SELECTOR, Step::Next)
                };
                if !present(selector) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                self.push(Listener::delegate(root.as_ref(), "click", selector, move |_, ev| {
                    ev.prevent_default();
                    run(&nav, Command::Step(step));
                })?);
            }
            ControlKind::JumpSelect => {
                if !present(JUMP_SELECTOR) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                self.push(Listener::delegate(root.as_ref(), "change", JUMP_SELECTOR, move |select, _| {
                    let value = select
                        .dyn_ref::<HtmlSelectElement>()
                        .and_then(|s| s.value().trim().parse::<i64>().ok());
                    if let Some(index) = value {
                        run(&nav, Command::Jump(index));
                    }
                })?);
            }
            ControlKind::Keyboard => {
                let nav = Rc::clone(nav);
                let key_document = document.clone();
                self.push(Listener::attach(document.as_ref(), "keydown", move |ev: Event| {
                    let Some(key_event) = ev.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let focus_within = {
                        let view = nav.view();
                        let active = key_document.active_element();
                        view.root().contains(active.as_deref())
                    };
                    if let Some(target) = nav.key_target(&key_event.key(), focus_within) {
                        ev.prevent_default();
                        run(&nav, Command::Jump(target));
                    }
                })?);
            }
            ControlKind::ViewToggle => {
                if !present(VIEW_BUTTON_SELECTOR) {
                    return Ok(false);
                }
                // Also covers the floating copy, which is kept inside the root.
                let nav = Rc::clone(nav);
                self.push(Listener::delegate(root.as_ref(), "click", VIEW_BUTTON_SELECTOR, move |button, ev| {
                    ev.prevent_default();
                    match button.get_attribute("data-view").unwrap_or_default().parse::<ViewMode>() {
                        Ok(mode) => run(&nav, Command::SetMode(mode)),
                        Err(e) => debug!("View toggle ignored: {}", e),
                    }
                })?);
            }
            ControlKind::FloatingToggle => {
                let Some(primary) = root.query_selector(VIEW_TOGGLE_SELECTOR).ok().flatten() else {
                    return Ok(false);
                };
                self.floating = Some(floating_toggle(&root, &primary)?);
            }
            ControlKind::TocToggle => {
                if !present(TOC_TOGGLE_SELECTOR) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                self.push(Listener::delegate(root.as_ref(), "click", TOC_TOGGLE_SELECTOR, move |_, _| {
                    run(&nav, Command::ToggleToc);
                })?);
            }
            ControlKind::Print => {
                if !present(PRINT_SELECTOR) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                let window = window.clone();
                let print_document = document.clone();
                self.push(Listener::delegate(root.as_ref(), "click", PRINT_SELECTOR, move |_, _| {
                    actions::print_current_section(&nav, &window, &print_document);
                })?);
            }
            ControlKind::CopyCitation => {
                if !present(CITATION_SELECTOR) {
                    return Ok(false);
                }
                let nav = Rc::clone(nav);
                let window = window.clone();
                let copy_document = document.clone();
                self.push(Listener::delegate(root.as_ref(), "click", CITATION_SELECTOR, move |_, _| {
                    actions::copy_citation(&nav, &window, &copy_document);
                })?);
            }
            ControlKind::PopState => {
                let nav = Rc::clone(nav);
                self.push(Listener::attach(window.as_ref(), "popstate", move |ev: Event| {
                    let state = ev
                        .dyn_ref::<PopStateEvent>()
                        .and_then(|pop| state_from_event(&pop.state()));
                    run(&nav, Command::Restore(state));
                })?);
            }
        }
        Ok(true)
    }

    /// Removes every listener and the floating toggle, and frees the root
    /// for another mount. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let Some(listener) = self.commentary.take() {
            commentary::unbind(&self.document, listener);
        }
        if let Some(floating) = self.floating.take() {
            floating.observer.disconnect();
            floating.element.remove();
        }
        let _ = self.root.remove_attribute(MOUNTED_ATTRIBUTE);
        let released = self.registry.release_all();
        debug!("Released {} bindings", released.len());
    }
}

impl Drop for Bindings {
    // The browser still holds the closures until they are detached.
    fn drop(&mut self) {
        self.release();
    }
}

/// Clones the primary view toggle into a floating copy that is shown only
/// while the primary one is scrolled out of view. The copy is appended to
/// `root`; stylesheets pin it to the viewport.
fn floating_toggle(root: &Element, primary: &Element) -> Result<Floating, LexiError> {
    let element: Element = primary
        .clone_node_with_deep(true)
        .map_err(|e| LexiError::from_js(ErrorCode::Dom, "Failed to clone view toggle", &e))?
        .dyn_into()
        .map_err(|_| LexiError::dom("View toggle clone is not an element"))?;
    let _ = element.class_list().add_1("lexi-view-toggle--floating");
    let _ = element.set_attribute("hidden", "");

    let state = Rc::new(Cell::new(FloatingToggle::new()));
    let target = element.clone();
    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let mut toggle = state.get();
            if let Some(visible) = toggle.observe(entry.is_intersecting()) {
                if visible {
                    let _ = target.remove_attribute("hidden");
                } else {
                    let _ = target.set_attribute("hidden", "");
                }
            }
            state.set(toggle);
        }
    });
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| LexiError::from_js(ErrorCode::Dom, "IntersectionObserver unavailable", &e))?;

    root.append_child(&element)
        .map_err(|e| LexiError::from_js(ErrorCode::Dom, "Failed to insert floating toggle", &e))?;
    observer.observe(primary);

    Ok(Floating {
        element,
        observer,
        _callback: callback,
    })
}
