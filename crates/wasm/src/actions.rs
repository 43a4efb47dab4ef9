//! Print and copy-citation for the current section.

use crate::reader::WebNavigator;
use js_sys::{Array, Function, Promise, Reflect};
use lexi_core::citation::accessed_today;
use log::{error, warn};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlDocument, HtmlElement, HtmlTextAreaElement, Window};

const TOAST_MS: i32 = 3000;
const TOAST_FADE_MS: i32 = 300;

/// Heading text and markup of the current section, if it is in the page.
fn current_section(nav: &WebNavigator) -> Option<(Option<String>, String)> {
    let index = nav.current_index();
    let view = nav.view();
    let section = view.section(index)?;
    Some((view.section_heading(index), section.inner_html()))
}

fn section_not_found(nav: &WebNavigator) {
    let labels = nav.labels();
    let message = if labels.section_not_found.is_empty() {
        labels.error.clone()
    } else {
        labels.section_not_found.clone()
    };
    nav.announce(&message);
}

/// Opens a print window holding only the current section.
pub fn print_current_section(nav: &WebNavigator, window: &Window, document: &Document) {
    let Some((heading, section_html)) = current_section(nav) else {
        section_not_found(nav);
        return;
    };

    let popup = match window.open_with_url_and_target_and_features("", "_blank", "width=800,height=600") {
        Ok(Some(popup)) => popup,
        Ok(None) | Err(_) => {
            warn!("Print window could not be opened");
            nav.announce(&nav.labels().error);
            return;
        }
    };
    let Some(popup_document) = popup.document() else {
        nav.announce(&nav.labels().error);
        return;
    };

    let html = nav.print_document(heading.as_deref(), &document.title(), &section_html);
    let Ok(popup_document) = popup_document.dyn_into::<HtmlDocument>() else {
        nav.announce(&nav.labels().error);
        return;
    };
    if let Err(e) = popup_document.write(&Array::of1(&JsValue::from_str(&html))) {
        error!("Failed to write print document: {:?}", e);
        nav.announce(&nav.labels().error);
        return;
    }
    let _ = popup_document.close();

    let print_window = popup.clone();
    let on_load = Closure::once_into_js(move || {
        let _ = print_window.focus();
        let _ = print_window.print();
        let _ = print_window.close();
    });
    popup.set_onload(Some(on_load.unchecked_ref()));

    nav.announce(&nav.labels().print_success);
}

/// Copies a citation of the current section to the clipboard.
pub fn copy_citation(nav: &Rc<WebNavigator>, window: &Window, document: &Document) {
    let Some((heading, _)) = current_section(nav) else {
        section_not_found(nav);
        return;
    };
    let citation = nav.citation(heading.as_deref(), &document.title(), &accessed_today());

    let nav = Rc::clone(nav);
    let window = window.clone();
    let document = document.clone();
    spawn_local(async move {
        let copied = match clipboard_write(&window, &citation).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Clipboard write failed, falling back: {:?}", e);
                fallback_copy(&document, &citation)
            }
        };
        if copied {
            let message = nav.labels().citation_copied.clone();
            nav.announce(&message);
            show_toast(&window, &document, &message);
        } else {
            nav.announce(&nav.labels().error);
        }
    });
}

/// `navigator.clipboard.writeText(text)`, looked up dynamically so older
/// browsers without the API take the fallback path.
async fn clipboard_write(window: &Window, text: &str) -> Result<(), JsValue> {
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write_text.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Copies through an off-screen textarea and `execCommand("copy")`.
fn fallback_copy(document: &Document, text: &str) -> bool {
    let Some(body) = document.body() else {
        return false;
    };
    let Some(area) = document
        .create_element("textarea")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    else {
        return false;
    };
    area.set_value(text);
    let style = area.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", "-999999px");
    let _ = style.set_property("top", "-999999px");
    if body.append_child(&area).is_err() {
        return false;
    }
    let _ = area.focus();
    area.select();

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .map(|doc| doc.exec_command("copy").unwrap_or(false))
        .unwrap_or(false);
    let _ = body.remove_child(&area);
    copied
}

/// A short-lived confirmation message in the corner of the page.
fn show_toast(window: &Window, document: &Document, message: &str) {
    let (Some(body), Ok(toast)) = (document.body(), document.create_element("div")) else {
        return;
    };
    toast.set_class_name("lexi-temp-message");
    toast.set_text_content(Some(message));
    let _ = toast.set_attribute(
        "style",
        "position: fixed; top: 20px; right: 20px; background: #28a745; color: white; \
         padding: 10px 15px; border-radius: 4px; z-index: 10000; font-size: 14px; \
         box-shadow: 0 2px 10px rgba(0,0,0,0.2); transition: opacity 0.3s ease;",
    );
    if body.append_child(&toast).is_err() {
        return;
    }

    let fade_window = window.clone();
    let fade = Closure::once_into_js(move || {
        if let Some(el) = toast.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property("opacity", "0");
        }
        let remove = Closure::once_into_js(move || toast.remove());
        let _ = fade_window.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            TOAST_FADE_MS,
        );
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(fade.unchecked_ref(), TOAST_MS);
}
