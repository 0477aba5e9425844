//! Process-local caches.
//!
//! Both caches live for the lifetime of the process: there is no eviction,
//! expiry, or size bound. They are concurrent maps, so handlers share them
//! through `Arc` without an outer lock, and no map guard is held across an
//! `.await`.

pub mod chats;
pub mod documents;

pub use chats::{ChatStore, TurnId};
pub use documents::DocumentCache;
