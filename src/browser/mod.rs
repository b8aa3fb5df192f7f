//! Thin wrappers over the `window` APIs the app touches.
//!
//! Everything here is best-effort: a missing window or a rejected call turns
//! into an empty value or `false`, never a panic.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn location_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub(crate) fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub(crate) fn location_pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Rewrite the address bar without navigating or adding a history entry.
pub(crate) fn replace_url(url: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
        log::warn!("history.replaceState failed: {e:?}");
    }
}

/// Full navigation, leaving the current view.
pub(crate) fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::warn!("navigation to {url} failed: {e:?}");
    }
}

pub(crate) fn push_url(url: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
        log::warn!("history.pushState failed: {e:?}");
    }
}

pub(crate) fn open_in_new_tab(url: &str) -> bool {
    web_sys::window()
        .map(|w| w.open_with_url_and_target(url, "_blank").is_ok())
        .unwrap_or(false)
}

pub(crate) fn open_popup(url: &str) -> bool {
    web_sys::window()
        .map(|w| {
            w.open_with_url_and_target_and_features(url, "_blank", "popup,width=1200,height=800")
                .is_ok()
        })
        .unwrap_or(false)
}

/// Fire-and-forget `navigator.clipboard.writeText`. Returns `false` when the
/// API is missing; asynchronous rejections are only logged.
pub(crate) fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(navigator) = js_sys::Reflect::get(window.as_ref(), &"navigator".into()) else {
        return false;
    };
    let Ok(clipboard) = js_sys::Reflect::get(&navigator, &"clipboard".into()) else {
        return false;
    };
    if clipboard.is_undefined() || clipboard.is_null() {
        return false;
    }
    let Some(write_text) = js_sys::Reflect::get(&clipboard, &"writeText".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
    else {
        return false;
    };

    match write_text.call1(&clipboard, &JsValue::from_str(text)) {
        Ok(result) => {
            if let Ok(promise) = result.dyn_into::<js_sys::Promise>() {
                let on_error = Closure::once(move |e: JsValue| {
                    log::warn!("clipboard write rejected: {e:?}");
                });
                let _ = promise.catch(&on_error);
                on_error.forget();
            }
            true
        }
        Err(e) => {
            log::warn!("clipboard write failed: {e:?}");
            false
        }
    }
}
