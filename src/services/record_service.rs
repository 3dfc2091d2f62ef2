use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::PersistenceMode;
use crate::errors::{AppError, StoreError};
use crate::models::{CalculationRecord, HistoryEntry, RoiCalculation};
use crate::store::RecordStore;

/// Writes a calculation according to the deployment's persistence mode.
///
/// Returns the stored record, or `None` when nothing was written. In
/// `BestEffort` mode a store failure is logged and the caller still gets
/// `Ok(None)`; in `Required` mode it becomes `StoreUnavailable`.
pub async fn persist(
    store: Option<&Arc<dyn RecordStore>>,
    mode: PersistenceMode,
    timeout: Duration,
    calculation: &RoiCalculation,
) -> Result<Option<CalculationRecord>, AppError> {
    let store = match (mode, store) {
        (PersistenceMode::Disabled, _) | (_, None) => return Ok(None),
        (_, Some(store)) => store,
    };

    let record = CalculationRecord::new(calculation);
    match with_timeout(timeout, store.save(&record)).await {
        Ok(()) => {
            info!("Saved calculation {} (roi={:.2})", record.id, record.roi);
            Ok(Some(record))
        }
        Err(e) if mode == PersistenceMode::Required => Err(e.into()),
        Err(e) => {
            warn!("Failed to save calculation, continuing without persistence: {}", e);
            Ok(None)
        }
    }
}

pub async fn list_history(
    store: &Arc<dyn RecordStore>,
    timeout: Duration,
) -> Result<Vec<HistoryEntry>, AppError> {
    let entries = with_timeout(timeout, store.list_history()).await?;
    Ok(entries)
}

async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, StoreError>
where
    F: std::future::Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| StoreError::Timeout(timeout))?
}
