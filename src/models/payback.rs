use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaybackPeriod {
    pub initial_investment: f64,
    pub annual_cash_flow: f64,
    pub years: f64,
}

impl PaybackPeriod {
    pub fn to_text(&self) -> String {
        format!("Payback Period: {:.2} years", self.years)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaybackQuery {
    pub initial_investment: Option<String>,
    pub annual_cash_flow: Option<String>,
}
