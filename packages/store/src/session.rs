//! # Session persistence
//!
//! [`SessionStore`] saves the logged-in technician under a single well-known
//! key ([`SESSION_KEY`]) and restores it on the next page load. It holds no
//! session itself; the controller owns the live [`Session`].
//!
//! A stored value that no longer deserializes is treated as absent: the key is
//! deleted and `restore` returns `None`. The caller never sees the parse error.
//!
//! There is no expiry and no encryption. A restored session is trusted as-is.

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Session;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized [`Session`].
pub const SESSION_KEY: &str = "viiveo_user";

#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize `session` and write it under [`SESSION_KEY`].
    pub fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => self.storage.set(SESSION_KEY, &json),
            Err(e) => warn!("Failed to serialize session: {e}"),
        }
    }

    /// Read back the saved session, discarding it if it is corrupt.
    pub fn restore(&self) -> Option<Session> {
        let raw = self.storage.get(SESSION_KEY)?;
        match decode(&raw) {
            Ok(session) => {
                debug!("Restored session for {}", session.email);
                Some(session)
            }
            Err(e) => {
                warn!("Discarding unreadable stored session: {e}");
                self.storage.remove(SESSION_KEY);
                None
            }
        }
    }

    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}

/// Only a JSON object is a stored session; serde would also accept a sequence.
fn decode(raw: &str) -> serde_json::Result<Session> {
    match serde_json::from_str::<Value>(raw)? {
        object @ Value::Object(_) => serde_json::from_value(object),
        other => Err(serde::de::Error::custom(format!(
            "expected an object, found {other}"
        ))),
    }
}
