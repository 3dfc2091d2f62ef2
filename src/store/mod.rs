use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::{CalculationRecord, HistoryEntry};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;

/// Append-only table of calculations.
///
/// Writes are independent inserts, so implementations must tolerate
/// concurrent `save` calls without any coordination between callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save(&self, record: &CalculationRecord) -> Result<(), StoreError>;

    /// Every stored record projected to `(timestamp, roi)`, in the store's
    /// native scan order. Each call runs a fresh scan.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, StoreError>;
}
