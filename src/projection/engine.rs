//! Core projection engine for monthly net-worth projections

use crate::plan::{AssetKind, FinancialInputs, PlanError};
use crate::returns::ReturnAssumptions;

use super::rows::{ProjectionResult, ProjectionRow};

/// Future value of an ordinary annuity: a constant monthly `contribution`
/// compounding at monthly `rate` for `months` periods, contribution applied
/// at period end.
///
/// The closed form `c * ((1+r)^m - 1) / r` is undefined at r = 0; the
/// limiting value `c * m` is substituted so a zero rate yields the plain
/// sum of contributions instead of a division error.
pub fn annuity_future_value(contribution: f64, rate: f64, months: u32) -> f64 {
    if rate == 0.0 {
        contribution * months as f64
    } else {
        contribution * ((1.0 + rate).powi(months as i32) - 1.0) / rate
    }
}

/// Main projection engine.
///
/// Holds the per-asset monthly return assumptions; each call to
/// [`project`](ProjectionEngine::project) is a pure computation over one
/// set of inputs.
pub struct ProjectionEngine {
    assumptions: ReturnAssumptions,
}

impl ProjectionEngine {
    /// Create an engine with the given return assumptions
    pub fn new(assumptions: ReturnAssumptions) -> Self {
        Self { assumptions }
    }

    /// Return assumptions in use
    pub fn assumptions(&self) -> &ReturnAssumptions {
        &self.assumptions
    }

    /// Run the projection for one set of inputs.
    ///
    /// Produces exactly `horizon_months` rows, months 1..=horizon in order.
    /// The balance carries forward with no floor: a negative net flow drives
    /// it unboundedly negative and the projection still runs to the horizon.
    pub fn project(&self, inputs: &FinancialInputs) -> Result<ProjectionResult, PlanError> {
        inputs.validate()?;

        let flow = inputs.net_monthly_flow();
        let mut result =
            ProjectionResult::with_capacity(inputs.horizon_months, flow, inputs.savings_target);

        let mut balance = 0.0;
        for month in 1..=inputs.horizon_months {
            balance += flow;

            let mut asset_values = [0.0; 5];
            for kind in AssetKind::ALL {
                asset_values[kind.index()] = annuity_future_value(
                    inputs.contributions.get(kind),
                    self.assumptions.rate(kind),
                    month,
                );
            }

            let net_worth = balance + asset_values.iter().sum::<f64>();
            result.add_row(ProjectionRow {
                month,
                balance,
                asset_values,
                net_worth,
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Contributions, Expenses};
    use approx::assert_relative_eq;

    /// Inputs with a given non-negative net flow and no contributions:
    /// income is grossed up so that after 20% tax the flow comes out exactly.
    fn flow_only_inputs(flow: f64, horizon: u32) -> FinancialInputs {
        FinancialInputs {
            gross_monthly_income: flow / 0.8,
            tax_rate_pct: 20.0,
            expenses: zero_expenses(),
            contributions: zero_contributions(),
            horizon_months: horizon,
            savings_target: 0.0,
        }
    }

    fn zero_expenses() -> Expenses {
        Expenses {
            housing: 0.0,
            food: 0.0,
            transport: 0.0,
            utilities: 0.0,
            entertainment: 0.0,
            other: 0.0,
        }
    }

    fn zero_contributions() -> Contributions {
        Contributions {
            stocks: 0.0,
            bonds: 0.0,
            real_estate: 0.0,
            crypto: 0.0,
            fixed_deposit: 0.0,
        }
    }

    #[test]
    fn test_annuity_closed_form() {
        // 500 * ((1.01^2 - 1) / 0.01) = 1005
        assert_relative_eq!(annuity_future_value(500.0, 0.01, 2), 1005.0, epsilon = 1e-9);
        assert_relative_eq!(annuity_future_value(500.0, 0.01, 1), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_annuity_zero_rate_is_plain_sum() {
        assert_relative_eq!(annuity_future_value(250.0, 0.0, 7), 1750.0);
        assert_relative_eq!(annuity_future_value(0.0, 0.0, 7), 0.0);
    }

    #[test]
    fn test_annuity_zero_contribution_regardless_of_rate() {
        for rate in [-0.05, 0.0, 0.02, 1.0] {
            assert_relative_eq!(annuity_future_value(0.0, rate, 24), 0.0);
        }
    }

    #[test]
    fn test_annuity_negative_rate() {
        // (0.99^2 - 1) / -0.01 = 1.99
        assert_relative_eq!(annuity_future_value(100.0, -0.01, 2), 199.0, epsilon = 1e-9);
    }

    #[test]
    fn test_row_count_and_ordering() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        for horizon in [1, 12, 60] {
            let result = engine
                .project(&FinancialInputs {
                    horizon_months: horizon,
                    ..Default::default()
                })
                .unwrap();
            assert_eq!(result.rows.len(), horizon as usize);
            for (i, row) in result.rows.iter().enumerate() {
                assert_eq!(row.month, i as u32 + 1);
            }
        }
    }

    #[test]
    fn test_net_worth_identity() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let result = engine.project(&FinancialInputs::default()).unwrap();
        for row in &result.rows {
            let expected = row.balance + row.asset_values.iter().sum::<f64>();
            assert_relative_eq!(row.net_worth, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_balance_recurrence() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let inputs = FinancialInputs {
            horizon_months: 24,
            ..Default::default()
        };
        let flow = inputs.net_monthly_flow();
        let result = engine.project(&inputs).unwrap();

        assert_relative_eq!(result.rows[0].balance, flow, epsilon = 1e-9);
        for pair in result.rows.windows(2) {
            assert_relative_eq!(pair[1].balance, pair[0].balance + flow, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_flow_only_scenario() {
        // f=2000, all contributions 0, H=3 => balance and net worth are
        // 2000, 4000, 6000
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let result = engine.project(&flow_only_inputs(2000.0, 3)).unwrap();

        let expected = [(1, 2000.0), (2, 4000.0), (3, 6000.0)];
        for ((month, value), row) in expected.iter().zip(&result.rows) {
            assert_eq!(row.month, *month);
            assert_relative_eq!(row.balance, *value, epsilon = 1e-9);
            assert_relative_eq!(row.net_worth, *value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_stocks_annuity_scenario() {
        // 500/mo at 1%/mo: month 1 = 500.00, month 2 = 1005.00
        let mut assumptions = ReturnAssumptions::from_rates([0.0; 5]);
        assumptions.set_rate(AssetKind::Stocks, 0.01);
        let engine = ProjectionEngine::new(assumptions);

        let inputs = FinancialInputs {
            contributions: Contributions {
                stocks: 500.0,
                ..zero_contributions()
            },
            horizon_months: 2,
            ..Default::default()
        };
        let result = engine.project(&inputs).unwrap();

        assert_relative_eq!(result.rows[0].asset(AssetKind::Stocks), 500.0, epsilon = 1e-9);
        assert_relative_eq!(result.rows[1].asset(AssetKind::Stocks), 1005.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_rate_asset_accumulates_linearly() {
        let mut assumptions = ReturnAssumptions::fallbacks();
        assumptions.set_rate(AssetKind::Bonds, 0.0);
        let engine = ProjectionEngine::new(assumptions);

        let inputs = FinancialInputs {
            contributions: Contributions {
                bonds: 300.0,
                ..zero_contributions()
            },
            horizon_months: 12,
            ..Default::default()
        };
        let result = engine.project(&inputs).unwrap();

        for row in &result.rows {
            assert_relative_eq!(row.asset(AssetKind::Bonds), 300.0 * row.month as f64);
        }
    }

    #[test]
    fn test_monotone_net_worth_under_positive_flows() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let inputs = FinancialInputs {
            horizon_months: 60,
            ..Default::default()
        };
        assert!(inputs.net_monthly_flow() > 0.0);
        let result = engine.project(&inputs).unwrap();

        for pair in result.rows.windows(2) {
            assert!(pair[1].net_worth >= pair[0].net_worth);
        }
    }

    #[test]
    fn test_negative_flow_runs_full_horizon_without_floor() {
        // A negative flow comes from valid inputs: zero income with large
        // expenses. Income itself is never negative.
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let inputs = FinancialInputs {
            gross_monthly_income: 0.0,
            tax_rate_pct: 20.0,
            expenses: Expenses {
                housing: 5000.0,
                ..zero_expenses()
            },
            contributions: zero_contributions(),
            horizon_months: 60,
            savings_target: 0.0,
        };
        assert_relative_eq!(inputs.net_monthly_flow(), -5000.0);

        let result = engine.project(&inputs).unwrap();
        assert_eq!(result.rows.len(), 60);
        assert_relative_eq!(result.rows[59].balance, -300_000.0, epsilon = 1e-9);
        assert_relative_eq!(result.rows[59].net_worth, -300_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_rejects_invalid_inputs() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let inputs = FinancialInputs {
            horizon_months: 0,
            ..Default::default()
        };
        assert!(engine.project(&inputs).is_err());
    }

    #[test]
    fn test_summary_months_to_target() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let mut inputs = flow_only_inputs(2000.0, 12);
        inputs.savings_target = 5000.0;
        let result = engine.project(&inputs).unwrap();

        let summary = result.summary();
        assert_eq!(summary.total_months, 12);
        // 2000/mo reaches 5000 in month 3
        assert_eq!(summary.months_to_target, Some(3));
        assert_relative_eq!(summary.final_net_worth, 24_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_summary_total_invested_is_final_asset_value() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let result = engine.project(&FinancialInputs::default()).unwrap();

        let final_assets: f64 = result.rows.last().unwrap().asset_values.iter().sum();
        assert_relative_eq!(result.summary().total_invested, final_assets, epsilon = 1e-9);
        // Accumulated value, not plain contributions: with positive rates it
        // exceeds the 800/mo * 12 contributed
        assert!(result.summary().total_invested > 9600.0);
    }

    #[test]
    fn test_summary_target_not_reached() {
        let engine = ProjectionEngine::new(ReturnAssumptions::fallbacks());
        let mut inputs = flow_only_inputs(100.0, 3);
        inputs.savings_target = 1_000_000.0;
        let result = engine.project(&inputs).unwrap();
        assert_eq!(result.summary().months_to_target, None);
    }
}
