//! Infrastructure layer: catalog storage, fixtures, process configuration.

pub mod config;
pub mod fixtures;
pub mod read_model;

pub use config::{AppConfig, ConfigError};
pub use fixtures::{CatalogFixture, FixtureError};
pub use read_model::{InMemoryCatalog, InMemoryStore, KeyValueStore};
