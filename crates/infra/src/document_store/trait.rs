use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use agencysite_core::{DocumentId, Document};

/// Field holding the store-assigned identifier inside a stored document.
pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Document store operation error.
///
/// These are **infrastructure errors** (connectivity, query execution, encoding).
/// None of them are retried by the store; callers decide what to do.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool closed/timed out, network, TLS).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed to execute an operation.
    #[error("store query failed: {0}")]
    Query(String),

    /// A document could not be encoded for, or decoded from, the store.
    #[error("document serialization failed: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Exact-match filter on top-level document fields.
///
/// An empty filter matches every document in a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Document,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a single field equal to `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_document(&self) -> &Document {
        &self.fields
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

/// Collection-oriented document store.
///
/// Implementations must:
/// - return documents from `find` in insertion order
/// - return at most `limit` documents when a limit is given
/// - assign a fresh identifier on every `insert`
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `doc` into `collection` and return its new identifier.
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<DocumentId>;

    /// Find documents in `collection` matching `filter`.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>>;

    /// Names of collections that currently hold at least one document.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Backend label for diagnostics (e.g. `postgres`).
    fn backend(&self) -> &'static str;

    /// Logical database name, if the backend has one.
    fn database_name(&self) -> Option<String> {
        None
    }

    /// Release backend resources at process shutdown.
    async fn close(&self) {}
}

#[async_trait::async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<DocumentId> {
        (**self).insert(collection, doc).await
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        (**self).find(collection, filter, limit).await
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        (**self).list_collections().await
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    fn database_name(&self) -> Option<String> {
        (**self).database_name()
    }

    async fn close(&self) {
        (**self).close().await
    }
}

/// Stamp a document about to be inserted with its id and timestamps.
///
/// Caller-supplied values for these fields are overwritten.
pub fn stamp_new_document(mut doc: Document, id: DocumentId, now: DateTime<Utc>) -> Document {
    let ts = Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true));
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc.insert(CREATED_AT_FIELD.to_string(), ts.clone());
    doc.insert(UPDATED_AT_FIELD.to_string(), ts);
    doc
}
