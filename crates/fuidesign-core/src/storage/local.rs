//! Browser `localStorage` implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Storage backed by `window.localStorage`.
///
/// Not Send/Sync: WASM is single-threaded and the handle is a JS object.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Acquire the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { inner })
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Io(format!("localStorage error: {:?}", err))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let len = self.inner.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self.inner.key(i).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
