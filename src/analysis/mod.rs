//! Financial health analysis over the projected statements

mod indicators;
mod risk;
mod report;

pub use indicators::{mean_of_present, FinancialIndicatorYear};
pub use risk::{recommendations, RiskLevel};
pub use report::{analyze_financial_health, FinancialHealthReport};
