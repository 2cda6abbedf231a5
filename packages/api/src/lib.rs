//! # API crate: client side of the Viiveo mission API
//!
//! Everything the client needs to talk to the remote API lives here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`MissionsClient`]: builds queries, correlates answers, applies the deadline, decodes replies |
//! | [`pending`] | [`PendingRequests`]: monotonic request ids and callback names, cleaned up on drop |
//! | [`transport`] | The [`Transport`] seam with the `reqwest` transport and the [`Backend`] switch |
//! | [`demo`] | [`DemoBackend`]: simulated API answering from a seeded mission list |
//! | [`timer`] | Platform `sleep` and `timeout` (`gloo-timers` on wasm, `tokio` natively) |
//!
//! Payload types are re-exported from the `store` crate so callers need only one import.

pub mod client;
pub mod demo;
mod error;
pub mod pending;
pub mod timer;
pub mod transport;

pub use client::{LoginReply, MissionsClient, MissionsReply, UpdateReply};
pub use demo::DemoBackend;
pub use error::ApiError;
pub use pending::{PendingRequests, RequestId, Ticket};
pub use transport::{Backend, HttpTransport, Transport};

pub use store::{Mission, MissionStatus, Session};
