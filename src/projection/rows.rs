//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::plan::AssetKind;

/// A single row of projection output for one month.
/// Rows are built once by the engine and read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Running cash balance: previous balance plus the net monthly flow
    pub balance: f64,

    /// Accumulated value per asset class, indexed per `AssetKind::ALL`
    pub asset_values: [f64; 5],

    /// Total net worth: balance plus all asset values
    pub net_worth: f64,
}

impl ProjectionRow {
    /// Accumulated value for a specific asset class
    pub fn asset(&self, kind: AssetKind) -> f64 {
        self.asset_values[kind.index()]
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows, month 1 through the horizon
    pub rows: Vec<ProjectionRow>,

    /// Net monthly cash flow applied to the balance each month
    pub net_monthly_flow: f64,

    /// Savings target the plan is measured against
    pub savings_target: f64,
}

impl ProjectionResult {
    pub(crate) fn with_capacity(
        horizon_months: u32,
        net_monthly_flow: f64,
        savings_target: f64,
    ) -> Self {
        Self {
            rows: Vec::with_capacity(horizon_months as usize),
            net_monthly_flow,
            savings_target,
        }
    }

    pub(crate) fn add_row(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    /// Final projected net worth (0 for an empty projection)
    pub fn final_net_worth(&self) -> f64 {
        self.rows.last().map(|r| r.net_worth).unwrap_or(0.0)
    }

    /// Summary statistics over the full projection
    pub fn summary(&self) -> ProjectionSummary {
        let final_balance = self.rows.last().map(|r| r.balance).unwrap_or(0.0);
        let final_net_worth = self.final_net_worth();
        let total_invested: f64 = self
            .rows
            .last()
            .map(|r| r.asset_values.iter().sum())
            .unwrap_or(0.0);

        // First month at which net worth reaches the savings target
        let months_to_target = self
            .rows
            .iter()
            .find(|r| r.net_worth >= self.savings_target)
            .map(|r| r.month);

        ProjectionSummary {
            total_months: self.rows.len() as u32,
            final_balance,
            final_net_worth,
            total_invested,
            savings_target: self.savings_target,
            months_to_target,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_balance: f64,
    pub final_net_worth: f64,
    /// Accumulated value across all asset classes at the horizon
    pub total_invested: f64,
    pub savings_target: f64,
    /// First month net worth reaches the target, if it does within the horizon
    pub months_to_target: Option<u32>,
}
