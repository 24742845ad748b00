//! Year-by-year projection engines
//!
//! The income projection is the leaf stage; the cash flow projection consumes
//! its rows and threads running cash through the years.

mod state;
mod income;
mod cash_flow;

pub use state::CashFlowState;
pub use income::{project_income, IncomeProjection, IncomeYear};
pub use cash_flow::{cash_flow_from_income, project_cash_flow, CashFlowProjection, CashFlowYear};

use crate::error::{ProjectionError, Result};

/// Decimal places kept for monetary amounts
pub const MONEY_DECIMALS: i32 = 2;

/// Decimal places kept for margins and ratios
pub const RATIO_DECIMALS: i32 = 4;

/// Round half away from zero to a fixed number of decimal places
///
/// Values too large to scale already carry no fractional digits and are
/// returned unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Fail on the first named figure of a year that is not finite
pub(crate) fn ensure_finite(year: u32, fields: &[(&str, f64)]) -> Result<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(ProjectionError::overflow(format!("{} in year {}", name, year))),
        None => Ok(()),
    }
}

pub(crate) fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_DECIMALS)
}

pub(crate) fn round_ratio(value: f64) -> f64 {
    round_to(value, RATIO_DECIMALS)
}
