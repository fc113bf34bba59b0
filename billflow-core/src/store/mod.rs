use sqlx::PgPool;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{DocumentKind, RawRow};

/// Read-only access to the two document collections.
///
/// The reporting engine never writes; abstracting the source keeps the
/// aggregation pipeline testable against in-memory fixtures.
#[allow(async_fn_in_trait)]
pub trait RecordSource: Send + Sync {
    /// Fetches every raw row of one document kind.
    async fn fetch_rows(&self, kind: DocumentKind) -> Result<Vec<RawRow>, StoreError>;
}

/// Postgres-backed record source. Rows live in a `documents` table as
/// `jsonb` cell arrays, written by the upstream application.
#[derive(Clone)]
pub struct PgRecordSource {
    pool: PgPool,
}

impl PgRecordSource {
    pub fn new(pool: PgPool) -> Self {
        PgRecordSource { pool }
    }
}

impl RecordSource for PgRecordSource {
    async fn fetch_rows(&self, kind: DocumentKind) -> Result<Vec<RawRow>, StoreError> {
        let rows: Vec<serde_json::Value> =
            sqlx::query_scalar("SELECT cells FROM documents WHERE kind = $1 ORDER BY id")
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| match &e {
                    // 42P01: relation does not exist
                    sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01") => {
                        StoreError::SourceNotFound(kind.as_str().to_string())
                    }
                    _ => StoreError::Query(e),
                })?;

        debug!("fetched {} {} rows", rows.len(), kind.as_str());

        Ok(rows
            .into_iter()
            .map(|value| value.as_array().cloned().unwrap_or_default())
            .collect())
    }
}
