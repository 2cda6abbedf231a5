pub mod config;
pub mod models;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::ClientConfig;
pub use models::{Mission, MissionStatus, Session};
pub use session::{SessionStore, SESSION_KEY};
pub use storage::KeyValueStore;
