//! Scenario runner for batch and sensitivity analyses
//!
//! Every scenario is an independent health analysis, so batches are spread
//! across threads with rayon.

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{analyze_financial_health, FinancialHealthReport, RiskLevel};
use crate::assumptions::CashFlowAssumptions;
use crate::error::Result;

/// Analyse many independent scenarios in parallel
///
/// Results come back in input order; a failing scenario does not affect the
/// others.
pub fn run_batch(scenarios: &[CashFlowAssumptions]) -> Vec<Result<FinancialHealthReport>> {
    scenarios.par_iter().map(analyze_financial_health).collect()
}

/// Headline figures for one point of a sensitivity sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Value the swept assumption took
    pub parameter_value: f64,
    pub risk_level: Option<RiskLevel>,
    pub average_net_margin: Option<f64>,
    pub average_fcf_to_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioOutcome {
    fn from_result(parameter_value: f64, result: Result<FinancialHealthReport>) -> Self {
        match result {
            Ok(report) => Self {
                parameter_value,
                risk_level: Some(report.risk_level),
                average_net_margin: Some(report.average_net_margin),
                average_fcf_to_revenue: Some(report.average_fcf_to_revenue),
                error: None,
            },
            Err(e) => Self {
                parameter_value,
                risk_level: None,
                average_net_margin: None,
                average_fcf_to_revenue: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Sweeps one assumption at a time over a fixed base case
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(base);
/// for outcome in runner.growth_sensitivity(&[0.0, 0.05, 0.10]) {
///     println!("{} -> {:?}", outcome.parameter_value, outcome.risk_level);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: CashFlowAssumptions,
}

impl ScenarioRunner {
    pub fn new(base_assumptions: CashFlowAssumptions) -> Self {
        Self { base_assumptions }
    }

    /// Analyse the unmodified base case
    pub fn run_base(&self) -> Result<FinancialHealthReport> {
        analyze_financial_health(&self.base_assumptions)
    }

    /// Vary the revenue growth rate
    pub fn growth_sensitivity(&self, growth_rates: &[f64]) -> Vec<ScenarioOutcome> {
        self.sweep(growth_rates, |assumptions, rate| {
            assumptions.income.revenue_growth_rate = rate;
        })
    }

    /// Vary annual capital expenditure
    pub fn capex_sensitivity(&self, capex_levels: &[f64]) -> Vec<ScenarioOutcome> {
        self.sweep(capex_levels, |assumptions, capex| {
            assumptions.capex_per_year = capex;
        })
    }

    /// Apply each value to a copy of the base case and analyse it
    pub fn sweep<F>(&self, values: &[f64], apply: F) -> Vec<ScenarioOutcome>
    where
        F: Fn(&mut CashFlowAssumptions, f64) + Sync,
    {
        values
            .par_iter()
            .map(|&value| {
                let mut assumptions = self.base_assumptions.clone();
                apply(&mut assumptions, value);
                ScenarioOutcome::from_result(value, analyze_financial_health(&assumptions))
            })
            .collect()
    }

    pub fn assumptions(&self) -> &CashFlowAssumptions {
        &self.base_assumptions
    }
}
