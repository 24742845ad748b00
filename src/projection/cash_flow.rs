//! Cash flow projection built on top of the income projection

use log::debug;
use serde::{Deserialize, Serialize};

use super::income::{project_income, IncomeProjection, IncomeYear};
use super::{ensure_finite, round_money};
use super::state::CashFlowState;
use crate::assumptions::CashFlowAssumptions;
use crate::error::Result;

/// One projected year of the cash flow statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    /// Projection year (1-indexed)
    pub year: u32,
    /// Previous year's ending cash, or the initial balance in year 1
    pub beginning_cash: f64,
    pub cash_from_operations: f64,
    pub cash_from_investing: f64,
    pub cash_from_financing: f64,
    pub ending_cash: f64,
    /// Operating plus investing cash; financing excluded
    pub free_cash_flow: f64,
}

/// Complete cash flow projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub summary: String,
    pub years: Vec<CashFlowYear>,
}

impl CashFlowYear {
    fn ensure_finite(&self) -> Result<()> {
        ensure_finite(self.year, &[
            ("beginning_cash", self.beginning_cash),
            ("cash_from_operations", self.cash_from_operations),
            ("cash_from_investing", self.cash_from_investing),
            ("cash_from_financing", self.cash_from_financing),
            ("ending_cash", self.ending_cash),
            ("free_cash_flow", self.free_cash_flow),
        ])
    }
}

impl CashFlowProjection {
    /// Whether the cash balance goes negative in any projected year
    pub fn has_cash_shortfall(&self) -> bool {
        self.years.iter().any(|y| y.ending_cash < 0.0)
    }
}

/// Project cash balances and free cash flow
///
/// Recomputes the income projection from the embedded income assumptions.
pub fn project_cash_flow(assumptions: &CashFlowAssumptions) -> Result<CashFlowProjection> {
    assumptions.validate()?;
    let income = project_income(&assumptions.income)?;
    cash_flow_from_income(assumptions, &income)
}

/// Run the cash flow recurrence over an already computed income projection
///
/// `income` must have been projected from `assumptions.income`. Fails with
/// `Overflow` when a running balance leaves the finite range.
pub fn cash_flow_from_income(
    assumptions: &CashFlowAssumptions,
    income: &IncomeProjection,
) -> Result<CashFlowProjection> {
    let mut state = CashFlowState::from_assumptions(assumptions);
    let mut years = Vec::with_capacity(income.projections.len());

    for income_year in &income.projections {
        let row = calculate_year(assumptions, &mut state, income_year);
        row.ensure_finite()?;
        years.push(row);
    }

    let summary = summarize(&years);
    Ok(CashFlowProjection { summary, years })
}

/// Calculate one year's flows and advance the running balances
fn calculate_year(
    assumptions: &CashFlowAssumptions,
    state: &mut CashFlowState,
    income_year: &IncomeYear,
) -> CashFlowYear {
    let beginning_cash = state.cash;

    let working_capital = assumptions.working_capital_percent_of_revenue * income_year.revenue;
    let delta_working_capital = working_capital - state.prev_working_capital;
    let depreciation = assumptions.depreciation_rate * income_year.revenue;

    let operations = income_year.net_income + depreciation - delta_working_capital;
    let investing = -assumptions.capex_per_year;
    let financing = assumptions.net_financing();

    let ending_cash = beginning_cash + operations + investing + financing;
    let free_cash_flow = operations + investing;

    debug!(
        "cash flow year {}: cfo={:.2} cfi={:.2} cff={:.2} ending={:.2}",
        income_year.year, operations, investing, financing, ending_cash
    );

    state.advance(ending_cash, working_capital);

    CashFlowYear {
        year: income_year.year,
        beginning_cash: round_money(beginning_cash),
        cash_from_operations: round_money(operations),
        cash_from_investing: round_money(investing),
        cash_from_financing: round_money(financing),
        ending_cash: round_money(ending_cash),
        free_cash_flow: round_money(free_cash_flow),
    }
}

fn summarize(years: &[CashFlowYear]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!(
            "Cash balance evolves from {:.2} to {:.2}.",
            first.beginning_cash, last.ending_cash
        ),
        _ => "No years projected.".to_string(),
    }
}
