//! Cash flow assumptions layered on top of the income assumptions

use serde::{Deserialize, Serialize};

use super::{require_finite, require_non_negative, IncomeAssumptions};
use crate::error::Result;

/// Assumptions for the cash flow projection and health analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowAssumptions {
    /// Income statement drivers; the cash flow engine reprojects from these
    #[serde(rename = "income_assumptions", alias = "pyg_assumptions")]
    pub income: IncomeAssumptions,

    /// Working capital held as a fraction of revenue
    pub working_capital_percent_of_revenue: f64,

    /// Cash on hand before year 1
    pub initial_cash_balance: f64,

    /// Depreciation as a fraction of revenue (added back to operating cash)
    pub depreciation_rate: f64,

    /// Capital expenditure, flat per year
    pub capex_per_year: f64,

    /// New debt raised, flat per year
    pub debt_issued_per_year: f64,

    /// Debt principal repaid, flat per year
    pub debt_repayment_per_year: f64,
}

impl CashFlowAssumptions {
    /// Check the income invariants plus the cash flow specific ones
    pub fn validate(&self) -> Result<()> {
        self.income.validate()?;

        require_non_negative(
            "working_capital_percent_of_revenue",
            self.working_capital_percent_of_revenue,
        )?;
        require_finite("initial_cash_balance", self.initial_cash_balance)?;
        require_non_negative("depreciation_rate", self.depreciation_rate)?;
        require_non_negative("capex_per_year", self.capex_per_year)?;
        require_non_negative("debt_issued_per_year", self.debt_issued_per_year)?;
        require_non_negative("debt_repayment_per_year", self.debt_repayment_per_year)
    }

    /// Working capital tied up before the first projected year
    ///
    /// Based on the pre-growth revenue, so year 1 already sees a working
    /// capital build when revenue grows.
    pub fn opening_working_capital(&self) -> f64 {
        self.working_capital_percent_of_revenue * self.income.current_revenue
    }

    /// Net financing flow, identical every year
    pub fn net_financing(&self) -> f64 {
        self.debt_issued_per_year - self.debt_repayment_per_year
    }
}
