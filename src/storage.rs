//! `storage` — Best-effort persistence of the raw inventory text.
//!
//! The checker itself is a pure function; the only thing worth remembering
//! between sessions is the inventory specification the user typed, as raw
//! text. Persistence is strictly best-effort: every failure path degrades
//! to "nothing saved" / "nothing loaded" with at most a `warn!`, and must
//! never abort or alter a check.
//!
//! - **Native:** a plain UTF-8 file. The default location is
//!   `$TILECHECK_INVENTORY` if set, else `$HOME/.tilecheck-tiles`, else
//!   `.tilecheck-tiles` in the working directory.
//! - **WASM:** `localStorage` under a fixed key, falling back to a cookie
//!   (365-day expiry) when `localStorage` is unavailable or throws, the
//!   way browsers in private modes sometimes do.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use log::warn;

/// Storage key for the inventory text (localStorage key / cookie name).
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "tilecheck.inventory";

/// Cookie lifetime for the fallback store, in days.
#[cfg(target_arch = "wasm32")]
const COOKIE_EXPIRY_DAYS: f64 = 365.0;

/// Resolve the default native store path.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn default_store_path() -> PathBuf {
    if let Some(path) = std::env::var_os("TILECHECK_INVENTORY") {
        return PathBuf::from(path);
    }
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(".tilecheck-tiles"),
        None => PathBuf::from(".tilecheck-tiles"),
    }
}

/// Load previously saved inventory text, if any.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn load_inventory(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("could not load inventory from '{}': {e}", path.display());
            None
        }
    }
}

/// Save inventory text. Returns whether the write succeeded.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_inventory(path: &Path, text: &str) -> bool {
    match std::fs::write(path, text) {
        Ok(()) => true,
        Err(e) => {
            warn!("could not save inventory to '{}': {e}", path.display());
            false
        }
    }
}

/// Save inventory text to `localStorage`, or to a cookie when storage is
/// unavailable.
#[cfg(target_arch = "wasm32")]
pub fn save_inventory(text: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(STORAGE_KEY, text).is_ok() {
            return;
        }
    }
    if !set_cookie(STORAGE_KEY, text) {
        warn!("inventory not persisted: neither localStorage nor cookies available");
    }
}

/// Load previously saved inventory text from `localStorage`, then from the
/// cookie fallback.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn load_inventory() -> Option<String> {
    if let Some(storage) = local_storage() {
        if let Ok(Some(text)) = storage.get_item(STORAGE_KEY) {
            return Some(text);
        }
    }
    get_cookie(STORAGE_KEY)
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn set_cookie(key: &str, value: &str) -> bool {
    let Some(document) = html_document() else {
        return false;
    };
    let expires = js_sys::Date::new_0();
    expires.set_time(expires.get_time() + COOKIE_EXPIRY_DAYS * 24.0 * 60.0 * 60.0 * 1000.0);
    let cookie = format!(
        "{}={}; expires={}; path=/",
        js_sys::encode_uri_component(key),
        js_sys::encode_uri_component(value),
        expires.to_utc_string()
    );
    document.set_cookie(&cookie).is_ok()
}

#[cfg(target_arch = "wasm32")]
fn get_cookie(key: &str) -> Option<String> {
    let document = html_document()?;
    let cookies = document.cookie().ok()?;
    for pair in cookies.split("; ") {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let decoded_name = js_sys::decode_uri_component(name)
            .ok()
            .and_then(|n| n.as_string());
        if decoded_name.as_deref() == Some(key) {
            return js_sys::decode_uri_component(value)
                .ok()
                .and_then(|v| v.as_string());
        }
    }
    None
}
