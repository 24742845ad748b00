//! Risk classification and recommendation rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Average FCF-to-revenue below this is at least medium risk
pub const MEDIUM_RISK_FCF_THRESHOLD: f64 = 0.05;

/// Average net margin below this triggers a pricing review
pub const LOW_NET_MARGIN_THRESHOLD: f64 = 0.05;

/// Average FCF-to-revenue below this triggers a working capital review
pub const LOW_FCF_THRESHOLD: f64 = 0.03;

pub const REVIEW_PRICING: &str = "Review pricing and expenses.";
pub const OPTIMIZE_WORKING_CAPITAL: &str = "Optimize working capital and CAPEX.";
pub const EVALUATE_FINANCING: &str = "Evaluate short-term financing.";
pub const HEALTHY: &str = "Company shows healthy cash generation.";

/// Qualitative risk label, ordered from least to most risky
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify from the average free cash flow to revenue ratio
    pub fn classify(avg_fcf_to_revenue: f64) -> Self {
        if avg_fcf_to_revenue < 0.0 {
            RiskLevel::High
        } else if avg_fcf_to_revenue < MEDIUM_RISK_FCF_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the recommendation list
///
/// Rules are checked independently in a fixed order; the healthy message is
/// returned only when none of them fire.
pub fn recommendations(
    avg_net_margin: f64,
    avg_fcf_to_revenue: f64,
    cash_shortfall: bool,
) -> Vec<String> {
    let mut recs = Vec::new();

    if avg_net_margin < LOW_NET_MARGIN_THRESHOLD {
        recs.push(REVIEW_PRICING.to_string());
    }
    if avg_fcf_to_revenue < LOW_FCF_THRESHOLD {
        recs.push(OPTIMIZE_WORKING_CAPITAL.to_string());
    }
    if cash_shortfall {
        recs.push(EVALUATE_FINANCING.to_string());
    }

    if recs.is_empty() {
        recs.push(HEALTHY.to_string());
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(RiskLevel::classify(-0.0001), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(0.0499), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(0.05), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.4), RiskLevel::Low);
    }

    #[test]
    fn test_lower_fcf_never_lowers_risk() {
        let mut previous = RiskLevel::Low;
        let mut fcf = 0.5;
        while fcf > -0.5 {
            let level = RiskLevel::classify(fcf);
            assert!(level >= previous, "risk dropped at fcf={}", fcf);
            previous = level;
            fcf -= 0.01;
        }
        assert_eq!(previous, RiskLevel::High);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(RiskLevel::High.to_string(), "high");
    }

    #[test]
    fn test_healthy_only_when_nothing_fires() {
        assert_eq!(recommendations(0.2, 0.2, false), vec![HEALTHY.to_string()]);
    }

    #[test]
    fn test_rules_fire_in_order() {
        let recs = recommendations(0.01, 0.01, true);
        assert_eq!(
            recs,
            vec![
                REVIEW_PRICING.to_string(),
                OPTIMIZE_WORKING_CAPITAL.to_string(),
                EVALUATE_FINANCING.to_string(),
            ]
        );

        let recs = recommendations(0.2, 0.2, true);
        assert_eq!(recs, vec![EVALUATE_FINANCING.to_string()]);

        let recs = recommendations(0.2, 0.02, false);
        assert_eq!(recs, vec![OPTIMIZE_WORKING_CAPITAL.to_string()]);
    }
}
