use std::sync::Arc;

use crate::config::{Config, PersistenceMode, ResponseFormat};
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no connection source is configured.
    pub record_store: Option<Arc<dyn RecordStore>>,
}

impl AppState {
    pub fn new(config: Config, record_store: Option<Arc<dyn RecordStore>>) -> Self {
        Self {
            config: Arc::new(config),
            record_store,
        }
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.config.response_format
    }

    pub fn persistence(&self) -> PersistenceMode {
        self.config.persistence
    }
}
