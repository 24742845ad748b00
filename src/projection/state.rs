//! Running state threaded through the cash flow recurrence

use crate::assumptions::CashFlowAssumptions;

/// Balances carried from one projected year into the next
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowState {
    /// Cash on hand at the start of the current year
    pub cash: f64,

    /// Working capital at the end of the previous year
    pub prev_working_capital: f64,
}

impl CashFlowState {
    /// Opening balances before year 1
    pub fn from_assumptions(assumptions: &CashFlowAssumptions) -> Self {
        Self {
            cash: assumptions.initial_cash_balance,
            prev_working_capital: assumptions.opening_working_capital(),
        }
    }

    /// Roll the year's closing balances forward
    pub fn advance(&mut self, ending_cash: f64, working_capital: f64) {
        // Carried unrounded; only the reported rows are rounded
        self.cash = ending_cash;
        self.prev_working_capital = working_capital;
    }
}
