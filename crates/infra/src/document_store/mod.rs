//! Collection-oriented document store boundary.
//!
//! Handlers see only the [`DocumentStore`] trait. Two implementations exist:
//! an in-memory store for tests/dev and a Postgres (JSONB) store for production.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use r#trait::{
    stamp_new_document, DocumentStore, Filter, StoreError, StoreResult, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
