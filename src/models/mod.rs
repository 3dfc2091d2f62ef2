mod calculation;
mod payback;

pub use calculation::{CalculationRecord, HistoryEntry, RoiCalculation, RoiQuery};
pub use payback::{PaybackPeriod, PaybackQuery};
