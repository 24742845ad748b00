//! Income statement projection

use log::debug;
use serde::{Deserialize, Serialize};

use super::{ensure_finite, round_money, round_ratio};
use crate::assumptions::IncomeAssumptions;
use crate::error::Result;

/// One projected year of the income statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeYear {
    /// Projection year (1-indexed)
    pub year: u32,
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub operating_expenses: f64,
    pub ebit: f64,
    /// Never negative; losses carry no tax credit
    pub tax: f64,
    pub net_income: f64,
    /// Net income over revenue, 0 when there is no revenue
    pub net_margin: f64,
}

impl IncomeYear {
    /// Project a single year from the prior year's reported revenue
    fn project(year: u32, prior_revenue: f64, assumptions: &IncomeAssumptions) -> Self {
        let revenue = prior_revenue * assumptions.growth_factor();
        let cogs = revenue * assumptions.cogs_as_percent_of_revenue;
        let gross_profit = revenue - cogs;
        let operating_expenses = assumptions.operating_expenses;
        let ebit = gross_profit - operating_expenses;
        let tax = (ebit * assumptions.tax_rate).max(0.0);
        let net_income = ebit - tax;
        let net_margin = if revenue > 0.0 { net_income / revenue } else { 0.0 };

        Self {
            year,
            revenue: round_money(revenue),
            cogs: round_money(cogs),
            gross_profit: round_money(gross_profit),
            operating_expenses: round_money(operating_expenses),
            ebit: round_money(ebit),
            tax: round_money(tax),
            net_income: round_money(net_income),
            net_margin: round_ratio(net_margin),
        }
    }

    fn ensure_finite(&self) -> Result<()> {
        ensure_finite(self.year, &[
            ("revenue", self.revenue),
            ("cogs", self.cogs),
            ("gross_profit", self.gross_profit),
            ("ebit", self.ebit),
            ("tax", self.tax),
            ("net_income", self.net_income),
            ("net_margin", self.net_margin),
        ])
    }
}

/// Complete income statement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProjection {
    pub summary: String,
    pub projections: Vec<IncomeYear>,
}

/// Project revenue, costs and net income over the assumed horizon
///
/// Year 1 grows the base revenue; every later year grows the previous
/// year's reported revenue, so growth compounds on rounded figures.
pub fn project_income(assumptions: &IncomeAssumptions) -> Result<IncomeProjection> {
    assumptions.validate()?;

    let mut projections = Vec::with_capacity(assumptions.years as usize);
    let mut prior_revenue = assumptions.current_revenue;

    for year in 1..=assumptions.years {
        let row = IncomeYear::project(year, prior_revenue, assumptions);
        row.ensure_finite()?;
        debug!(
            "income year {}: revenue={:.2} ebit={:.2} net_income={:.2}",
            row.year, row.revenue, row.ebit, row.net_income
        );
        prior_revenue = row.revenue;
        projections.push(row);
    }

    let summary = summarize(&projections, assumptions.years);
    Ok(IncomeProjection { summary, projections })
}

fn summarize(projections: &[IncomeYear], years: u32) -> String {
    match (projections.first(), projections.last()) {
        (Some(first), Some(last)) => format!(
            "Projected revenue grows from {:.2} to {:.2} over {} years.",
            first.revenue, last.revenue, years
        ),
        _ => "No years projected.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use approx::assert_abs_diff_eq;

    fn base() -> IncomeAssumptions {
        IncomeAssumptions {
            current_revenue: 1000.0,
            revenue_growth_rate: 0.10,
            cogs_as_percent_of_revenue: 0.40,
            operating_expenses: 100.0,
            tax_rate: 0.25,
            years: 2,
        }
    }

    #[test]
    fn test_two_year_example() {
        let result = project_income(&base()).unwrap();
        assert_eq!(result.projections.len(), 2);

        let y1 = &result.projections[0];
        assert_eq!(y1.year, 1);
        assert_abs_diff_eq!(y1.revenue, 1100.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.cogs, 440.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.gross_profit, 660.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.operating_expenses, 100.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.ebit, 560.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.tax, 140.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.net_income, 420.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y1.net_margin, 0.3818, epsilon = 1e-9);

        let y2 = &result.projections[1];
        assert_eq!(y2.year, 2);
        assert_abs_diff_eq!(y2.revenue, 1210.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y2.cogs, 484.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y2.ebit, 626.00, epsilon = 1e-9);
        assert_abs_diff_eq!(y2.tax, 156.50, epsilon = 1e-9);
        assert_abs_diff_eq!(y2.net_income, 469.50, epsilon = 1e-9);
        assert_abs_diff_eq!(y2.net_margin, 0.388, epsilon = 1e-9);

        assert_eq!(
            result.summary,
            "Projected revenue grows from 1100.00 to 1210.00 over 2 years."
        );
    }

    #[test]
    fn test_years_are_sequential() {
        let assumptions = IncomeAssumptions { years: 12, ..base() };
        let result = project_income(&assumptions).unwrap();

        let indices: Vec<u32> = result.projections.iter().map(|y| y.year).collect();
        assert_eq!(indices, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_revenue_compounds_on_prior_year() {
        let assumptions = IncomeAssumptions {
            current_revenue: 12_345.67,
            revenue_growth_rate: 0.073,
            years: 8,
            ..base()
        };
        let result = project_income(&assumptions).unwrap();

        assert_abs_diff_eq!(
            result.projections[0].revenue,
            12_345.67 * 1.073,
            epsilon = 0.006
        );
        for pair in result.projections.windows(2) {
            assert_abs_diff_eq!(pair[1].revenue, pair[0].revenue * 1.073, epsilon = 0.006);
        }
    }

    #[test]
    fn test_loss_pays_no_tax() {
        // Gross profit of 50 against 100 of opex
        let assumptions = IncomeAssumptions {
            current_revenue: 100.0,
            revenue_growth_rate: 0.0,
            cogs_as_percent_of_revenue: 0.5,
            operating_expenses: 100.0,
            tax_rate: 0.3,
            years: 3,
        };
        let result = project_income(&assumptions).unwrap();

        for year in &result.projections {
            assert_abs_diff_eq!(year.ebit, -50.0, epsilon = 1e-9);
            assert_eq!(year.tax, 0.0);
            assert_abs_diff_eq!(year.net_income, -50.0, epsilon = 1e-9);
            assert_abs_diff_eq!(year.net_margin, -0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let assumptions = IncomeAssumptions { current_revenue: 0.0, ..base() };
        let result = project_income(&assumptions).unwrap();

        for year in &result.projections {
            assert_eq!(year.revenue, 0.0);
            assert_eq!(year.net_margin, 0.0);
            assert_abs_diff_eq!(year.net_income, -100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_years_fails_fast() {
        let assumptions = IncomeAssumptions { years: 0, ..base() };
        assert!(project_income(&assumptions).is_err());
    }

    #[test]
    fn test_runaway_growth_is_an_error() {
        // Revenue reaches 1e303 in year 3 and overflows in year 4
        let assumptions = IncomeAssumptions {
            revenue_growth_rate: 1.0e100,
            years: 5,
            ..base()
        };
        let err = project_income(&assumptions).unwrap_err();
        assert_eq!(err, ProjectionError::overflow("revenue in year 4"));
    }

    #[test]
    fn test_huge_finite_revenue_still_projects() {
        let assumptions = IncomeAssumptions {
            current_revenue: 1.0e307,
            revenue_growth_rate: 0.0,
            cogs_as_percent_of_revenue: 0.5,
            years: 2,
            ..base()
        };
        let result = project_income(&assumptions).unwrap();
        assert_eq!(result.projections[1].revenue, 1.0e307);
        assert!(result.projections.iter().all(|y| y.net_income.is_finite()));
    }

    #[test]
    fn test_idempotent() {
        let first = project_income(&base()).unwrap();
        let second = project_income(&base()).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
