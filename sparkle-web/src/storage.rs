//! `localStorage` implementation of the studio storage seam.
use sparkle_game::StudioStorage;
use wasm_bindgen::JsValue;

use crate::dom;

/// Web storage backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebStorageError {
    fn storage(err: &JsValue) -> Self {
        Self::Storage(dom::js_error_message(err))
    }
}

impl LocalStorageBackend {
    fn handle() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage()
            .map_err(|err| WebStorageError::Unavailable(dom::js_error_message(&err)))
    }
}

impl StudioStorage for LocalStorageBackend {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::handle()?
            .get_item(key)
            .map_err(|err| WebStorageError::storage(&err))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|err| WebStorageError::storage(&err))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::handle()?
            .remove_item(key)
            .map_err(|err| WebStorageError::storage(&err))
    }
}
