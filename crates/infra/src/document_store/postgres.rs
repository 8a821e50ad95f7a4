//! Postgres-backed document store.
//!
//! Each [`Collection`] maps to its own table holding the raw JSON document:
//!
//! ```sql
//! CREATE TABLE contact_submissions (
//!     id          TEXT PRIMARY KEY,
//!     document    JSONB NOT NULL,
//!     inserted_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | Any other | `Query` |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Connection` |
//! | Other | N/A | `Query` |

use std::time::Duration;

use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::r#trait::{document_id, Collection, DocumentStore, StoreError};

/// Postgres-backed document store.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the per-collection tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id          TEXT PRIMARY KEY,
                    document    JSONB NOT NULL,
                    inserted_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#,
                table = collection.as_str(),
            );
            sqlx::query(&ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[instrument(skip(self, document), fields(collection = %collection), err)]
    async fn insert(&self, collection: Collection, document: JsonValue) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();
        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2)",
            collection.as_str()
        );

        sqlx::query(&sql)
            .bind(&id)
            .bind(sqlx::types::Json(&document))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(collection = %collection), err)]
    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) AS total FROM {}", collection.as_str());

        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| map_sqlx_error("count", e))?;

        // COUNT(*) is never negative.
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Duplicate(msg),
                _ => StoreError::Query(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Connection(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Connection(format!("timed out acquiring a connection in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Connection(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Connection(format!("tls error in {operation}: {e}")),
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}
