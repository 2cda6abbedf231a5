//! # Key-value persistence seam
//!
//! [`KeyValueStore`] is the minimal interface the session layer needs from
//! per-origin persistent storage. It is synchronous because the browser's
//! `localStorage` is.
//!
//! Implementations live in sibling modules:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStorage`] | tests, and anywhere nothing should outlive the process |
//! | [`crate::FileStorage`] | native builds, one file per key under the data directory |
//! | `LocalStorage` | web builds (`wasm32` + `web` feature) |
//!
//! Backends never fail loudly: a read that cannot be served is `None`, a write
//! that cannot be performed is logged and dropped.

/// Persistent string storage keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
