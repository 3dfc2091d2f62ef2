pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, ConnectionSource};
use crate::external::connection_resolver::ConnectionResolver;
use crate::external::secret_provider::SecretError;
use crate::state::AppState;
use crate::store::{InMemoryRecordStore, PgRecordStore, RecordStore};

/// Connection string selecting the process-local store.
pub const MEMORY_STORE_URL: &str = "memory://";

/// Picks the record store for the configured connection source. Nothing
/// is fetched or connected here; that happens on first use.
pub fn build_record_store(config: &Config) -> Result<Option<Arc<dyn RecordStore>>, SecretError> {
    if !config.persistence.is_enabled() {
        info!("Persistence disabled");
        return Ok(None);
    }

    let store: Arc<dyn RecordStore> = match &config.connection {
        None => return Ok(None),
        Some(ConnectionSource::Direct(conn)) if conn == MEMORY_STORE_URL => {
            info!("Using in-memory record store");
            Arc::new(InMemoryRecordStore::new())
        }
        Some(source) => {
            let resolver = ConnectionResolver::from_source(source, config.store_timeout)?;
            info!("Using Postgres record store (table {})", config::TABLE_NAME);
            Arc::new(PgRecordStore::new(Arc::new(resolver), config.store_timeout))
        }
    };
    Ok(Some(store))
}

pub fn build_state(config: Config) -> Result<AppState, SecretError> {
    let record_store = build_record_store(&config)?;
    Ok(AppState::new(config, record_store))
}
