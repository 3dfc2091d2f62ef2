use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Result of a single ROI calculation, before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiCalculation {
    pub investment: f64,
    pub gains: f64,
    pub roi: f64,
}

impl RoiCalculation {
    /// `ROI: 50.00%`
    pub fn to_text(&self) -> String {
        format!("ROI: {:.2}%", self.roi)
    }
}

/// One persisted calculation. `roi` is stored alongside its inputs and is
/// never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CalculationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub investment: f64,
    pub gains: f64,
    pub roi: f64,
}

impl CalculationRecord {
    pub(crate) fn new(calculation: &RoiCalculation) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            investment: calculation.investment,
            gains: calculation.gains,
            roi: calculation.roi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub roi: f64,
}

impl From<&CalculationRecord> for HistoryEntry {
    fn from(record: &CalculationRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            roi: record.roi,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RoiQuery {
    pub investment: Option<String>,
    pub gains: Option<String>,
    /// Set to false to skip writing this calculation.
    pub persist: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rounds_to_two_decimals() {
        let calc = RoiCalculation { investment: 3.0, gains: 4.0, roi: 33.333333 };
        assert_eq!(calc.to_text(), "ROI: 33.33%");
    }

    #[test]
    fn test_new_record_copies_calculation() {
        let calc = RoiCalculation { investment: 1000.0, gains: 1500.0, roi: 50.0 };
        let a = CalculationRecord::new(&calc);
        let b = CalculationRecord::new(&calc);

        assert_eq!(a.roi, 50.0);
        assert_eq!(a.investment, 1000.0);
        assert_ne!(a.id, b.id);
        assert_eq!(HistoryEntry::from(&a).roi, 50.0);
    }

    #[test]
    fn test_history_entry_serializes_iso_timestamp() {
        let entry = HistoryEntry {
            timestamp: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            roi: -50.0,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["timestamp"], "2024-03-01T12:00:00Z");
        assert_eq!(json["roi"], -50.0);
    }
}
