//! Per-year financial indicators

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::projection::{round_to, CashFlowYear, IncomeYear, RATIO_DECIMALS};

/// Ratios are kept to four decimals, so one unit is a basis point
const BASIS_POINTS: f64 = 10_000.0;

/// Largest ratio, in basis points, that can be averaged exactly
const MAX_BASIS_POINTS: f64 = 1.0e30;

/// Ratios for one projected year
///
/// A ratio is `None` when its denominator is zero for that year; it is never
/// replaced by a placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialIndicatorYear {
    pub year: u32,
    pub revenue: f64,
    pub net_income: f64,
    pub free_cash_flow: f64,
    pub operating_cash_flow: f64,
    pub ebit_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub fcf_to_revenue: Option<f64>,
    pub ocf_to_net_income: Option<f64>,
}

impl FinancialIndicatorYear {
    /// Combine the income and cash flow rows of the same year
    ///
    /// Fails with `Overflow` when a tiny denominator pushes a ratio out of
    /// the finite range.
    pub fn from_years(income: &IncomeYear, cash_flow: &CashFlowYear) -> Result<Self> {
        let has_revenue = income.revenue > 0.0;
        let has_net_income = income.net_income != 0.0;

        let year = Self {
            year: income.year,
            revenue: income.revenue,
            net_income: income.net_income,
            free_cash_flow: cash_flow.free_cash_flow,
            operating_cash_flow: cash_flow.cash_from_operations,
            ebit_margin: ratio(income.ebit, income.revenue, has_revenue),
            net_margin: ratio(income.net_income, income.revenue, has_revenue),
            fcf_to_revenue: ratio(cash_flow.free_cash_flow, income.revenue, has_revenue),
            ocf_to_net_income: ratio(
                cash_flow.cash_from_operations,
                income.net_income,
                has_net_income,
            ),
        };

        let ratios = [
            ("ebit_margin", year.ebit_margin),
            ("net_margin", year.net_margin),
            ("fcf_to_revenue", year.fcf_to_revenue),
            ("ocf_to_net_income", year.ocf_to_net_income),
        ];
        if let Some((name, _)) = ratios.iter().find(|(_, r)| r.is_some_and(|v| !v.is_finite())) {
            return Err(ProjectionError::overflow(format!("{} in year {}", name, year.year)));
        }
        Ok(year)
    }
}

fn ratio(numerator: f64, denominator: f64, defined: bool) -> Option<f64> {
    defined.then(|| round_to(numerator / denominator, RATIO_DECIMALS))
}

/// Arithmetic mean of the ratios that are present
///
/// Values are summed as whole basis points and divided once, so a mean that
/// is exactly a threshold compares equal to it. Fails with `InsufficientData`
/// when every value is absent.
pub fn mean_of_present<I>(values: I, metric: &str) -> Result<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut total: i128 = 0;
    let mut count = 0usize;

    for value in values.into_iter().flatten() {
        let units = (value * BASIS_POINTS).round();
        if !(units.abs() < MAX_BASIS_POINTS) {
            return Err(ProjectionError::overflow(metric));
        }
        total = total
            .checked_add(units as i128)
            .ok_or_else(|| ProjectionError::overflow(metric))?;
        count += 1;
    }

    if count == 0 {
        return Err(ProjectionError::insufficient(metric));
    }
    Ok(total as f64 / (count as f64 * BASIS_POINTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::risk::{recommendations, RiskLevel, HEALTHY};
    use approx::assert_abs_diff_eq;

    fn income_year(revenue: f64, ebit: f64, net_income: f64) -> IncomeYear {
        IncomeYear {
            year: 1,
            revenue,
            cogs: 0.0,
            gross_profit: revenue,
            operating_expenses: revenue - ebit,
            ebit,
            tax: ebit - net_income,
            net_income,
            net_margin: 0.0,
        }
    }

    fn cash_flow_year(operations: f64, free_cash_flow: f64) -> CashFlowYear {
        CashFlowYear {
            year: 1,
            beginning_cash: 0.0,
            cash_from_operations: operations,
            cash_from_investing: free_cash_flow - operations,
            cash_from_financing: 0.0,
            ending_cash: free_cash_flow,
            free_cash_flow,
        }
    }

    #[test]
    fn test_all_ratios_present() {
        let year = FinancialIndicatorYear::from_years(
            &income_year(1100.0, 560.0, 420.0),
            &cash_flow_year(465.0, 415.0),
        )
        .unwrap();
        assert_abs_diff_eq!(year.ebit_margin.unwrap(), 0.5091, epsilon = 1e-9);
        assert_abs_diff_eq!(year.net_margin.unwrap(), 0.3818, epsilon = 1e-9);
        assert_abs_diff_eq!(year.fcf_to_revenue.unwrap(), 0.3773, epsilon = 1e-9);
        assert_abs_diff_eq!(year.ocf_to_net_income.unwrap(), 1.1071, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_revenue_drops_revenue_ratios() {
        let year = FinancialIndicatorYear::from_years(
            &income_year(0.0, -100.0, -100.0),
            &cash_flow_year(-80.0, -130.0),
        )
        .unwrap();
        assert_eq!(year.ebit_margin, None);
        assert_eq!(year.net_margin, None);
        assert_eq!(year.fcf_to_revenue, None);
        assert_abs_diff_eq!(year.ocf_to_net_income.unwrap(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_net_income_drops_only_ocf_ratio() {
        let year = FinancialIndicatorYear::from_years(
            &income_year(1000.0, 0.0, 0.0),
            &cash_flow_year(50.0, 20.0),
        )
        .unwrap();
        assert_eq!(year.ocf_to_net_income, None);
        // A zero ratio is still a defined ratio
        assert_eq!(year.ebit_margin, Some(0.0));
        assert_eq!(year.net_margin, Some(0.0));
        assert_abs_diff_eq!(year.fcf_to_revenue.unwrap(), 0.02, epsilon = 1e-9);
    }

    #[test]
    fn test_mean_skips_absent_values() {
        let mean = mean_of_present([Some(0.1), None, Some(0.3)], "net margin").unwrap();
        assert_abs_diff_eq!(mean, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_ratio_overflow_is_an_error() {
        let err = FinancialIndicatorYear::from_years(
            &income_year(0.01, 0.01, 0.01),
            &cash_flow_year(1.0e307, 1.0e307),
        )
        .unwrap_err();
        assert_eq!(err, ProjectionError::overflow("fcf_to_revenue in year 1"));
    }

    #[test]
    fn test_mean_is_exact_at_threshold() {
        // Sums to exactly 3000 basis points over six years
        let margins = [0.0401, 0.0372, 0.07, 0.0214, 0.0775, 0.0538];
        let mean = mean_of_present(margins.map(Some), "free cash flow").unwrap();
        assert_eq!(mean, 0.05);
        assert_eq!(RiskLevel::classify(mean), RiskLevel::Low);
        assert_eq!(recommendations(mean, mean, false), vec![HEALTHY.to_string()]);
    }

    #[test]
    fn test_mean_of_unbounded_ratio_is_an_error() {
        let err = mean_of_present([Some(0.1), Some(1.0e300)], "net margin").unwrap_err();
        assert_eq!(err, ProjectionError::overflow("net margin"));
    }

    #[test]
    fn test_mean_of_nothing_is_an_error() {
        let err = mean_of_present([None, None], "net margin").unwrap_err();
        assert_eq!(err, ProjectionError::insufficient("net margin"));

        assert!(mean_of_present(Vec::<Option<f64>>::new(), "fcf").is_err());
    }
}
