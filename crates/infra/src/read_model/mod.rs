//! Read-side storage backing the order-line lookup port.

pub mod catalog;
pub mod store;

pub use catalog::InMemoryCatalog;
pub use store::{InMemoryStore, KeyValueStore};
