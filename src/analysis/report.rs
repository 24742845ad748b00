//! Financial health report assembly

use log::info;
use serde::{Deserialize, Serialize};

use super::indicators::{mean_of_present, FinancialIndicatorYear};
use super::risk::{recommendations, RiskLevel};
use crate::assumptions::CashFlowAssumptions;
use crate::error::Result;
use crate::projection::{cash_flow_from_income, project_income};

/// Ratios, risk classification and recommendations for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthReport {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub indicators: Vec<FinancialIndicatorYear>,
    pub risk_level: RiskLevel,
    pub average_net_margin: f64,
    pub average_fcf_to_revenue: f64,
}

/// Derive per-year ratios, average them, classify risk and recommend actions
///
/// The income projection is computed once and the cash flow recurrence runs
/// over it, so both views describe the same years.
pub fn analyze_financial_health(assumptions: &CashFlowAssumptions) -> Result<FinancialHealthReport> {
    assumptions.validate()?;

    let income = project_income(&assumptions.income)?;
    let cash_flow = cash_flow_from_income(assumptions, &income)?;

    let indicators = income
        .projections
        .iter()
        .zip(&cash_flow.years)
        .map(|(income_year, cash_flow_year)| {
            FinancialIndicatorYear::from_years(income_year, cash_flow_year)
        })
        .collect::<Result<Vec<_>>>()?;

    let average_net_margin =
        mean_of_present(indicators.iter().map(|i| i.net_margin), "average net margin")?;
    let average_fcf_to_revenue = mean_of_present(
        indicators.iter().map(|i| i.fcf_to_revenue),
        "average free cash flow to revenue",
    )?;

    let risk_level = RiskLevel::classify(average_fcf_to_revenue);
    let recommendations = recommendations(
        average_net_margin,
        average_fcf_to_revenue,
        cash_flow.has_cash_shortfall(),
    );

    info!(
        "health analysis over {} years: risk={} recommendations={}",
        indicators.len(),
        risk_level,
        recommendations.len()
    );

    Ok(FinancialHealthReport {
        summary: summarize(average_net_margin, average_fcf_to_revenue, risk_level),
        recommendations,
        indicators,
        risk_level,
        average_net_margin,
        average_fcf_to_revenue,
    })
}

fn summarize(avg_net_margin: f64, avg_fcf_to_revenue: f64, risk: RiskLevel) -> String {
    format!(
        "Average net margin: {:.2}%, free cash flow: {:.2}%, risk: {}",
        avg_net_margin * 100.0,
        avg_fcf_to_revenue * 100.0,
        risk
    )
}
