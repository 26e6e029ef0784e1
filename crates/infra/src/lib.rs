//! Infrastructure layer: document store adapters and process configuration.

pub mod config;
pub mod document_store;

pub use config::{AppConfig, ConfigError};
pub use document_store::{DocumentStore, Filter, InMemoryDocumentStore, PostgresDocumentStore, StoreError};
