//! Income statement assumptions

use serde::{Deserialize, Serialize};

use super::{require_at_least, require_fraction, require_non_negative};
use crate::error::{ProjectionError, Result};

/// Longest horizon a single projection will run
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Assumptions for the income statement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeAssumptions {
    /// Year-0 revenue; never reported itself, only grown from
    pub current_revenue: f64,

    /// Annual growth, compounded on the prior year's revenue
    pub revenue_growth_rate: f64,

    /// Cost of goods sold as a fraction of revenue
    pub cogs_as_percent_of_revenue: f64,

    /// Flat operating expenses charged every year
    pub operating_expenses: f64,

    /// Tax rate applied to positive EBIT
    pub tax_rate: f64,

    /// Projection horizon in years
    pub years: u32,
}

impl IncomeAssumptions {
    /// Check domain invariants before any projection runs
    pub fn validate(&self) -> Result<()> {
        if self.years < 1 {
            return Err(ProjectionError::invalid("years", "must be at least 1"));
        }
        if self.years > MAX_PROJECTION_YEARS {
            return Err(ProjectionError::invalid(
                "years",
                format!("cannot exceed {}", MAX_PROJECTION_YEARS),
            ));
        }

        require_non_negative("current_revenue", self.current_revenue)?;
        // -100% growth wipes revenue out; anything lower would turn it negative
        require_at_least("revenue_growth_rate", self.revenue_growth_rate, -1.0)?;
        require_non_negative("cogs_as_percent_of_revenue", self.cogs_as_percent_of_revenue)?;
        require_non_negative("operating_expenses", self.operating_expenses)?;
        require_fraction("tax_rate", self.tax_rate)
    }

    /// Multiplier applied to revenue each year
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.revenue_growth_rate
    }
}
