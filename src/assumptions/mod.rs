//! Business assumptions driving the income and cash flow projections

mod income;
mod cash_flow;

pub use income::{IncomeAssumptions, MAX_PROJECTION_YEARS};
pub use cash_flow::CashFlowAssumptions;

use crate::error::{ProjectionError, Result};

/// Reject NaN and infinities
fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::invalid(field, "must be a finite number"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, "cannot be negative"));
    }
    Ok(())
}

fn require_at_least(field: &str, value: f64, min: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < min {
        return Err(ProjectionError::invalid(field, format!("must be at least {}", min)));
    }
    Ok(())
}

fn require_fraction(field: &str, value: f64) -> Result<()> {
    require_non_negative(field, value)?;
    if value > 1.0 {
        return Err(ProjectionError::invalid(field, "must be between 0 and 1"));
    }
    Ok(())
}
