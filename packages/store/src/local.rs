//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the web platform. Entries
//! are per-origin and survive reloads, which is what lets the client restore a
//! technician's session without logging in again.
//!
//! The `Storage` handle is looked up on every call. When it is unavailable
//! (private browsing, disabled storage) reads return `None` and writes are
//! logged and dropped.

use tracing::warn;
use web_sys::Storage;

use crate::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            warn!("localStorage unavailable, {key} not saved");
            return;
        };
        if storage.set_item(key, value).is_err() {
            warn!("localStorage rejected write of {key}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
