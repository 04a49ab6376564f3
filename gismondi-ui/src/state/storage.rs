//! Browser Storage
//!
//! `window.localStorage` as the session store, object URLs as image
//! previews, and the configurable API base URL.

use gismondi::api::DEFAULT_API_BASE;
use gismondi::classify::PreviewRegistry;
use gismondi::session::{KeyValueStore, StoreError};

/// Local storage key holding a custom API base URL
pub const API_URL_KEY: &str = "gismondi_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn js_error(value: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", value))
}

/// Session store backed by `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage =
            local_storage().ok_or_else(|| StoreError::Unavailable("localStorage unavailable".into()))?;
        storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let storage =
            local_storage().ok_or_else(|| StoreError::Unavailable("localStorage unavailable".into()))?;
        storage.remove_item(key).map_err(js_error)
    }
}

/// Image previews as `blob:` object URLs
#[derive(Debug, Default)]
pub struct ObjectUrls;

impl PreviewRegistry<web_sys::File> for ObjectUrls {
    fn create(&mut self, file: &web_sys::File) -> Option<String> {
        web_sys::Url::create_object_url_with_blob(file).ok()
    }

    fn revoke(&mut self, url: &str) {
        if web_sys::Url::revoke_object_url(url).is_err() {
            web_sys::console::warn_1(&format!("Failed to revoke preview {}", url).into());
        }
    }
}

/// API base URL from local storage, or the compiled default
pub fn get_api_base() -> String {
    let url = LocalStorage
        .get(API_URL_KEY)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Persist a custom API base URL; a blank value restores the default
pub fn set_api_base(url: &str) {
    let mut storage = LocalStorage;
    let result = if url.trim().is_empty() {
        storage.remove(API_URL_KEY)
    } else {
        storage.set(API_URL_KEY, url.trim())
    };
    if let Err(e) = result {
        web_sys::console::error_1(&format!("Failed to save API URL: {}", e).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gismondi::session::{Session, ROLE_KEY, TOKEN_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let mut store = LocalStorage;
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(ROLE_KEY, "doctor").unwrap();

        let session = Session::load(&mut store);
        assert_eq!(session.token.as_deref(), Some("abc"));

        Session::clear(&mut store).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[wasm_bindgen_test]
    fn api_base_falls_back_to_default() {
        set_api_base("");
        assert_eq!(get_api_base(), DEFAULT_API_BASE);

        set_api_base("http://clinica.local/");
        assert_eq!(get_api_base(), "http://clinica.local");
        set_api_base("");
    }
}
