//! # Request correlation
//!
//! Every call to the API is registered here before it is sent and gets a
//! [`RequestId`] from a monotonic counter. The wire callback name is the
//! caller's prefix followed by that id (`cbLogin1`, `cbMissions2`, ...), so
//! two calls can never share a name, even within the same millisecond.
//!
//! Registration returns a [`Ticket`]. Dropping the ticket removes the entry,
//! which covers success, failure, timeout and a cancelled (dropped) call alike.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outstanding calls, keyed by id, with their callback names.
#[derive(Debug, Default)]
pub struct PendingRequests {
    last_id: Cell<u64>,
    entries: RefCell<HashMap<RequestId, String>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new call whose callback name starts with `prefix`.
    pub fn register(&self, prefix: &str) -> Ticket<'_> {
        let id = RequestId(self.last_id.get() + 1);
        self.last_id.set(id.0);

        let callback = format!("{prefix}{id}");
        self.entries.borrow_mut().insert(id, callback.clone());

        Ticket {
            registry: self,
            id,
            callback,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Registration of one outstanding call. Deregisters on drop.
#[derive(Debug)]
pub struct Ticket<'a> {
    registry: &'a PendingRequests,
    id: RequestId,
    callback: String,
}

impl Ticket<'_> {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn callback(&self) -> &str {
        &self.callback
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        self.registry.entries.borrow_mut().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_names_are_unique() {
        let pending = PendingRequests::new();
        let a = pending.register("cbMissions");
        let b = pending.register("cbMissions");

        assert_ne!(a.callback(), b.callback());
        assert!(a.id() < b.id());
        assert_eq!(a.callback(), "cbMissions1");
        assert_eq!(b.callback(), "cbMissions2");
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_drop_deregisters() {
        let pending = PendingRequests::new();
        let ticket = pending.register("cbLogin");
        assert_eq!(ticket.callback(), "cbLogin1");
        assert_eq!(pending.len(), 1);

        drop(ticket);

        assert!(pending.is_empty());
    }

    #[test]
    fn test_ids_keep_increasing_after_cleanup() {
        let pending = PendingRequests::new();
        drop(pending.register("cbLogin"));
        let next = pending.register("cbLogin");
        assert_eq!(next.callback(), "cbLogin2");
    }
}
