//! Finance Platform - Multi-year financial projections from a handful of business assumptions
//!
//! This library provides:
//! - Income statement projections (revenue, costs, net income)
//! - Cash flow projections (operating, investing, financing, free cash flow)
//! - Financial health analysis (per-year ratios, risk classification, recommendations)
//! - Batch and sensitivity scenario runs
//! - A warp HTTP surface over the above
//!
//! Every computation is pure: identical assumptions always give identical output.

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod analysis;
pub mod scenario;
pub mod api;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use assumptions::{IncomeAssumptions, CashFlowAssumptions};
pub use projection::{
    project_income, project_cash_flow, IncomeProjection, IncomeYear, CashFlowProjection,
    CashFlowYear,
};
pub use analysis::{analyze_financial_health, FinancialHealthReport, FinancialIndicatorYear, RiskLevel};
pub use scenario::ScenarioRunner;
