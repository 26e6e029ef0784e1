//! Postgres-backed document store.
//!
//! All collections share one `documents` table; each row holds a JSONB body.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | PoolClosed, PoolTimedOut, Io, Tls | `Unavailable` |
//! | Database (any SQLSTATE) | `Query` |
//! | ColumnDecode, Decode, Encode | `Serialization` |
//! | Other | `Query` |

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::{instrument, Span};

use agencysite_core::{DocumentId, Document};

use super::r#trait::{stamp_new_document, DocumentStore, Filter, StoreError, StoreResult};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Postgres-backed document store.
///
/// ## Ordering
///
/// Rows carry a `BIGSERIAL` sequence; `find` orders by it, so results come back in
/// insertion order.
///
/// ## Filtering
///
/// Filters use JSONB containment (`body @> $filter`), which for top-level scalar
/// fields is exact equality.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: Arc<PgPool>,
    database_name: Option<String>,
}

impl PostgresDocumentStore {
    /// Wrap an existing pool. Does not touch the schema.
    pub fn new(pool: PgPool, database_name: Option<String>) -> Self {
        Self {
            pool: Arc::new(pool),
            database_name,
        }
    }

    /// Connect a pool to `database_url` and make sure the `documents` table exists.
    #[instrument(skip(database_url), err)]
    pub async fn connect(database_url: &str, database_name: Option<String>) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self::new(pool, database_name);
        store.ensure_schema().await?;
        tracing::info!("document store connected");
        Ok(store)
    }

    /// Create the `documents` table and its index if they are missing.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq         BIGSERIAL PRIMARY KEY,
                id          UUID NOT NULL UNIQUE,
                collection  TEXT NOT NULL,
                body        JSONB NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS documents_collection_seq_idx ON documents (collection, seq)")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self, doc), fields(collection = %collection), err)]
    async fn insert(&self, collection: &str, doc: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::new();
        let now = Utc::now();
        let body = stamp_new_document(doc, id, now);

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(collection)
        .bind(Json(&body))
        .bind(now)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(id)
    }

    #[instrument(
        skip(self, filter),
        fields(collection = %collection, limit = ?limit, returned = tracing::field::Empty),
        err
    )]
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        // LIMIT NULL means no limit.
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows = sqlx::query(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq ASC
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Json(filter.as_document()))
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find", e))?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let Json(body): Json<serde_json::Value> = row
                .try_get("body")
                .map_err(|e| map_sqlx_error("find", e))?;
            match body {
                serde_json::Value::Object(doc) => docs.push(doc),
                other => {
                    return Err(StoreError::Serialization(format!(
                        "document body in `{collection}` is not an object: {}",
                        json_type(&other)
                    )));
                }
            }
        }

        Span::current().record("returned", docs.len());
        Ok(docs)
    }

    #[instrument(skip(self), err)]
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT collection FROM documents ORDER BY collection")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_collections", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("collection")
                    .map_err(|e| map_sqlx_error("list_collections", e))
            })
            .collect()
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn database_name(&self) -> Option<String> {
        self.database_name.clone()
    }

    /// Close the pool; in-flight queries finish first.
    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("document store closed");
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Map a sqlx error into the store taxonomy.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
            StoreError::Query(format!(
                "database error in {operation} ({code}): {}",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring a connection in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::ColumnDecode { index, source } => StoreError::Serialization(format!(
            "failed to decode column {index} in {operation}: {source}"
        )),
        sqlx::Error::Decode(e) | sqlx::Error::Encode(e) => {
            StoreError::Serialization(format!("codec error in {operation}: {e}"))
        }
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error("find", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("insert", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn row_not_found_maps_to_query() {
        let err = map_sqlx_error("find", sqlx::Error::RowNotFound);
        match err {
            StoreError::Query(msg) => assert!(msg.contains("find")),
            other => panic!("expected Query, got {other:?}"),
        }
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    /// Connects to `DATABASE_URL`; run with `cargo test -- --ignored`.
    async fn live_store() -> PostgresDocumentStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        PostgresDocumentStore::connect(&url, None).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn find_orders_limits_and_filters() {
        let store = live_store().await;
        // Fresh collection per run so reruns do not see old rows.
        let collection = format!("post-{}", DocumentId::new());

        for i in 0..5 {
            store
                .insert(&collection, doc(serde_json::json!({ "slug": format!("post-{i}"), "n": i })))
                .await
                .unwrap();
        }

        let all = store.find(&collection, &Filter::all(), None).await.unwrap();
        let slugs: Vec<_> = all.iter().map(|d| d["slug"].clone()).collect();
        assert_eq!(
            slugs,
            (0..5).map(|i| serde_json::json!(format!("post-{i}"))).collect::<Vec<_>>()
        );
        assert!(all[0]["_id"].is_string());
        assert!(all[0]["created_at"].is_string());

        let limited = store.find(&collection, &Filter::all(), Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1]["slug"], serde_json::json!("post-1"));

        let hit = store
            .find(&collection, &Filter::eq("slug", "post-3"), Some(1))
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0]["n"], serde_json::json!(3));

        let miss = store
            .find(&collection, &Filter::eq("slug", "nope"), Some(1))
            .await
            .unwrap();
        assert!(miss.is_empty());

        assert!(store.list_collections().await.unwrap().contains(&collection));
        store.close().await;
    }

    #[test]
    fn io_errors_map_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_sqlx_error("connect", sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }
}
