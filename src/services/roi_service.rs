use crate::errors::AppError;
use crate::models::RoiCalculation;

/// Validates the raw query values and computes
/// `roi = (gains - investment) / investment * 100`.
///
/// Checks run in a fixed order: presence, then number parsing, then
/// `investment > 0`, then `gains >= 0`. Non-finite values ("inf", "NaN")
/// are rejected as invalid numbers, and a ratio that overflows `f64` is
/// rejected as `ResultOutOfRange`.
pub fn compute_roi(
    investment_raw: Option<&str>,
    gains_raw: Option<&str>,
) -> Result<RoiCalculation, AppError> {
    let investment_raw = investment_raw.ok_or(AppError::MissingParameter("investment"))?;
    let gains_raw = gains_raw.ok_or(AppError::MissingParameter("gains"))?;

    let invalid = |field: &'static str| AppError::InvalidNumber {
        field,
        investment: investment_raw.to_string(),
        gains: gains_raw.to_string(),
    };
    let investment = parse_finite(investment_raw).ok_or_else(|| invalid("investment"))?;
    let gains = parse_finite(gains_raw).ok_or_else(|| invalid("gains"))?;

    if investment <= 0.0 {
        return Err(AppError::InvalidInvestment);
    }
    if gains < 0.0 {
        return Err(AppError::InvalidGains);
    }

    let net_profit = gains - investment;
    let roi = net_profit / investment * 100.0;
    if !roi.is_finite() {
        return Err(AppError::ResultOutOfRange);
    }

    Ok(RoiCalculation { investment, gains, roi })
}

pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
