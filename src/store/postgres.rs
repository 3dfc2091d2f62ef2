use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::db::calculation_queries;
use crate::errors::StoreError;
use crate::external::connection_resolver::ConnectionResolver;
use crate::models::{CalculationRecord, HistoryEntry};
use crate::store::RecordStore;

/// Postgres-backed record store.
///
/// The pool is built on first use from the resolved connection string, so
/// startup never blocks on the secret store or the database.
pub struct PgRecordStore {
    resolver: Arc<ConnectionResolver>,
    pool: RwLock<Option<PgPool>>,
    connect_timeout: Duration,
}

impl PgRecordStore {
    pub fn new(resolver: Arc<ConnectionResolver>, connect_timeout: Duration) -> Self {
        Self {
            resolver,
            pool: RwLock::new(None),
            connect_timeout,
        }
    }

    async fn pool(&self) -> Result<PgPool, StoreError> {
        if let Some(pool) = self.pool.read().await.as_ref() {
            return Ok(pool.clone());
        }

        let mut guard = self.pool.write().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        let conn = self.resolver.resolve().await?;
        let connected = match PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(self.connect_timeout)
            .connect(&conn)
            .await
        {
            Ok(pool) => match calculation_queries::ensure_table(&pool).await {
                Ok(()) => Ok(pool),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match connected {
            Ok(pool) => {
                info!("Connected to record store");
                *guard = Some(pool.clone());
                Ok(pool)
            }
            Err(e) => {
                drop(guard);
                Err(self.classify(e).await)
            }
        }
    }

    /// Rejected credentials drop both the cached secret and the pool so the
    /// next call starts from a fresh lookup.
    async fn classify(&self, err: sqlx::Error) -> StoreError {
        if !is_auth_failure(&err) {
            return StoreError::Db(err);
        }
        warn!("Record store rejected credentials: {}", err);
        self.resolver.invalidate().await;
        *self.pool.write().await = None;
        StoreError::Unauthorized
    }
}

// SQLSTATE class 28: invalid authorization specification.
fn is_auth_failure(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| code.starts_with("28"))
            .unwrap_or(false),
        _ => false,
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn save(&self, record: &CalculationRecord) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        match calculation_queries::insert(&pool, record).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.classify(e).await),
        }
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let pool = self.pool().await?;
        match calculation_queries::fetch_history(&pool).await {
            Ok(entries) => Ok(entries),
            Err(e) => Err(self.classify(e).await),
        }
    }
}
