use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use agencysite_core::{DocumentId, Document};

use super::r#trait::{stamp_new_document, DocumentStore, Filter, StoreError, StoreResult};

/// In-memory document store.
///
/// Intended for tests/dev. Collections are plain vectors, so `find` is a linear scan.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub const BACKEND: &'static str = "in-memory";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::new();
        let doc = stamp_new_document(doc, id, Utc::now());

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        collections.entry(collection.to_string()).or_default().push(doc);

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };

        Ok(docs
            .iter()
            .filter(|d| filter.matches(d))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn backend(&self) -> &'static str {
        Self::BACKEND
    }
}
