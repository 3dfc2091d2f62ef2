use crate::errors::AppError;
use crate::models::PaybackPeriod;
use crate::services::roi_service::parse_finite;

/// Years needed for a constant annual cash flow to repay the initial
/// investment.
pub fn compute_payback(
    initial_investment_raw: Option<&str>,
    annual_cash_flow_raw: Option<&str>,
) -> Result<PaybackPeriod, AppError> {
    let initial_raw =
        initial_investment_raw.ok_or(AppError::MissingParameter("initial_investment"))?;
    let cash_flow_raw =
        annual_cash_flow_raw.ok_or(AppError::MissingParameter("annual_cash_flow"))?;

    let invalid = |field: &'static str| AppError::InvalidNumber {
        field,
        investment: initial_raw.to_string(),
        gains: cash_flow_raw.to_string(),
    };
    let initial_investment = parse_finite(initial_raw).ok_or_else(|| invalid("initial_investment"))?;
    let annual_cash_flow = parse_finite(cash_flow_raw).ok_or_else(|| invalid("annual_cash_flow"))?;

    if annual_cash_flow == 0.0 {
        return Err(AppError::InvalidCashFlow);
    }

    let years = initial_investment / annual_cash_flow;
    if !years.is_finite() {
        return Err(AppError::ResultOutOfRange);
    }

    Ok(PaybackPeriod {
        initial_investment,
        annual_cash_flow,
        years,
    })
}
