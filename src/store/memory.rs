use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{CalculationRecord, HistoryEntry};
use crate::store::RecordStore;

/// Process-local record store used in development and tests.
/// Scans are ordered by `(timestamp, id)`.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: DashMap<Uuid, CalculationRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> Vec<CalculationRecord> {
        let mut records: Vec<CalculationRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        records
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, record: &CalculationRecord) -> Result<(), StoreError> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.records().iter().map(HistoryEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoiCalculation;
    use std::sync::Arc;

    fn record(roi: f64) -> CalculationRecord {
        CalculationRecord::new(&RoiCalculation { investment: 100.0, gains: 100.0 + roi, roi })
    }

    #[tokio::test]
    async fn test_history_is_stable_across_scans() {
        let store = InMemoryRecordStore::new();
        for roi in [10.0, -5.0, 0.0] {
            store.save(&record(roi)).await.unwrap();
        }

        let first = store.list_history().await.unwrap();
        let second = store.list_history().await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_scan_is_ordered_by_timestamp_not_insertion() {
        let store = InMemoryRecordStore::new();
        let now = chrono::Utc::now();
        let mut late = record(1.0);
        late.timestamp = now;
        let mut early = record(2.0);
        early.timestamp = now - chrono::Duration::seconds(30);

        store.save(&late).await.unwrap();
        store.save(&early).await.unwrap();

        let rois: Vec<f64> = store.list_history().await.unwrap().iter().map(|e| e.roi).collect();
        assert_eq!(rois, vec![2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_all_kept() {
        let store = Arc::new(InMemoryRecordStore::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.save(&record(i as f64)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.len(), 50);
        assert_eq!(store.list_history().await.unwrap().len(), 50);
    }
}
