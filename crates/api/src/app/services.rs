//! Store wiring and the operations handlers call.
//!
//! Every operation makes at most one store round trip and runs registry
//! validation before (writes) or projection after (reads) it.

use std::sync::Arc;

use agencysite_core::{project_as, validate, DocumentId, Document, Entity, EntityKind};
use agencysite_infra::{AppConfig, DocumentStore, Filter, InMemoryDocumentStore, PostgresDocumentStore, StoreError};

use crate::app::dto::Diagnostics;
use crate::app::errors::ApiError;

/// Number of collections listed by the diagnostics report.
const DIAGNOSTIC_COLLECTIONS: usize = 10;
/// Store error text in the diagnostics report is cut to this many characters.
const DIAGNOSTIC_ERROR_CHARS: usize = 50;

pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    config: AppConfig,
}

/// Connect the store selected by `config`.
///
/// With `DATABASE_URL` set this is the Postgres store; otherwise an in-memory
/// store that loses everything on restart.
pub async fn build_services(config: AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn DocumentStore> = match config.database_url.as_deref() {
        Some(url) => Arc::new(PostgresDocumentStore::connect(url, config.database_name.clone()).await?),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory document store");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    Ok(AppServices::new(store, config))
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// Validate a lead payload and insert it. The store is not touched if validation fails.
    pub async fn create_lead(&self, payload: &Document) -> Result<DocumentId, ApiError> {
        let record = validate(EntityKind::Lead, payload)?;
        let id = self
            .store
            .insert(EntityKind::Lead.collection_name(), record.into_document())
            .await?;
        tracing::info!(lead_id = %id, "lead captured");
        Ok(id)
    }

    /// List records of kind `E` in store order.
    ///
    /// `limit` of zero means no limit. A single malformed document fails the whole
    /// request rather than being skipped.
    pub async fn list<E: Entity>(&self, limit: Option<usize>) -> Result<Vec<E>, ApiError> {
        let limit = limit.filter(|&l| l > 0);
        let docs = self
            .store
            .find(E::KIND.collection_name(), &Filter::all(), limit)
            .await?;

        docs.iter()
            .map(project_as::<E>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::from)
    }

    /// Fetch the record of kind `E` whose `slug` matches.
    pub async fn get_by_slug<E: Entity>(&self, slug: &str) -> Result<E, ApiError> {
        let docs = self
            .store
            .find(E::KIND.collection_name(), &Filter::eq("slug", slug), Some(1))
            .await?;

        let doc = docs.first().ok_or(ApiError::NotFound(E::KIND))?;
        Ok(project_as(doc)?)
    }

    /// Store reachability report. Never fails; problems are reported inline.
    pub async fn diagnostics(&self) -> Diagnostics {
        let in_memory = self.store.backend() == InMemoryDocumentStore::BACKEND;
        let mut report = Diagnostics {
            backend: "✅ Running".to_string(),
            store: self.store.backend().to_string(),
            database: "❌ Not Available".to_string(),
            database_url: set_or_not(self.config.database_url.is_some()),
            database_name: set_or_not(
                self.config.database_name.is_some() || self.store.database_name().is_some(),
            ),
            connection_status: "Not Connected".to_string(),
            collections: vec![],
        };

        match self.store.list_collections().await {
            Ok(mut collections) => {
                collections.truncate(DIAGNOSTIC_COLLECTIONS);
                report.collections = collections;
                if in_memory {
                    report.database = "⚠️  In-memory store (DATABASE_URL not set)".to_string();
                } else {
                    report.database = "✅ Connected & Working".to_string();
                    report.connection_status = "Connected".to_string();
                }
            }
            Err(err) => {
                tracing::warn!("diagnostics could not list collections: {err}");
                let detail: String = err.to_string().chars().take(DIAGNOSTIC_ERROR_CHARS).collect();
                report.database = format!("⚠️  Connected but Error: {detail}");
            }
        }

        report
    }

    /// Release the store at process shutdown.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

fn set_or_not(present: bool) -> String {
    if present { "✅ Set" } else { "❌ Not Set" }.to_string()
}
