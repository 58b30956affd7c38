//! Roster - an in-process, concurrency-safe user registry
//!
//! This library provides a keyed store of user records guarded by a
//! reader/writer lock, with create/get/update/delete/list/search
//! operations and pluggable operation notifications.

pub mod error;
pub mod notify;
pub mod store;
pub mod test_utils;
pub mod user;

// Re-export the public surface at the crate root
pub use error::StoreError;
pub use notify::{Notifier, NullNotifier, StderrNotifier};
pub use store::UserStore;
pub use user::{NewUser, SearchFilter, User, UserUpdate};
