//! Financial inputs for a single projection run

use serde::{Deserialize, Serialize};

use super::{AssetKind, PlanError};

/// Maximum projection horizon in months
pub const MAX_HORIZON_MONTHS: u32 = 60;

/// Named monthly expense amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expenses {
    pub housing: f64,
    pub food: f64,
    pub transport: f64,
    pub utilities: f64,
    pub entertainment: f64,
    pub other: f64,
}

impl Expenses {
    /// Total monthly expenses
    pub fn total(&self) -> f64 {
        self.housing + self.food + self.transport + self.utilities + self.entertainment + self.other
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("expenses.housing", self.housing),
            ("expenses.food", self.food),
            ("expenses.transport", self.transport),
            ("expenses.utilities", self.utilities),
            ("expenses.entertainment", self.entertainment),
            ("expenses.other", self.other),
        ]
    }
}

impl Default for Expenses {
    fn default() -> Self {
        Self {
            housing: 1200.0,
            food: 500.0,
            transport: 300.0,
            utilities: 200.0,
            entertainment: 200.0,
            other: 200.0,
        }
    }
}

/// Monthly contribution amounts per asset class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributions {
    pub stocks: f64,
    pub bonds: f64,
    pub real_estate: f64,
    pub crypto: f64,
    pub fixed_deposit: f64,
}

impl Contributions {
    /// Total monthly investment contributions
    pub fn total(&self) -> f64 {
        self.stocks + self.bonds + self.real_estate + self.crypto + self.fixed_deposit
    }

    /// Contribution for a specific asset class
    pub fn get(&self, kind: AssetKind) -> f64 {
        match kind {
            AssetKind::Stocks => self.stocks,
            AssetKind::Bonds => self.bonds,
            AssetKind::RealEstate => self.real_estate,
            AssetKind::Crypto => self.crypto,
            AssetKind::FixedDeposit => self.fixed_deposit,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("contributions.stocks", self.stocks),
            ("contributions.bonds", self.bonds),
            ("contributions.real_estate", self.real_estate),
            ("contributions.crypto", self.crypto),
            ("contributions.fixed_deposit", self.fixed_deposit),
        ]
    }
}

impl Default for Contributions {
    fn default() -> Self {
        Self {
            stocks: 500.0,
            bonds: 300.0,
            real_estate: 0.0,
            crypto: 0.0,
            fixed_deposit: 0.0,
        }
    }
}

/// Complete set of inputs for one projection run.
/// Immutable once handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// Gross monthly income before tax
    pub gross_monthly_income: f64,

    /// Tax rate as a percentage in [0, 100]
    pub tax_rate_pct: f64,

    /// Named monthly expenses
    pub expenses: Expenses,

    /// Monthly contributions per asset class
    pub contributions: Contributions,

    /// Projection horizon in whole months (1..=60)
    pub horizon_months: u32,

    /// Savings target used for the months-to-target summary
    pub savings_target: f64,
}

impl FinancialInputs {
    /// Monthly income after tax
    pub fn after_tax_income(&self) -> f64 {
        self.gross_monthly_income * (1.0 - self.tax_rate_pct / 100.0)
    }

    /// Net monthly cash flow: after-tax income minus expenses minus
    /// investment contributions. May be negative.
    pub fn net_monthly_flow(&self) -> f64 {
        self.after_tax_income() - self.expenses.total() - self.contributions.total()
    }

    /// Validate all inputs against their documented ranges.
    /// Out-of-range values fail here rather than being clamped.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.gross_monthly_income.is_finite() || self.gross_monthly_income < 0.0 {
            return Err(PlanError::invalid(
                "gross_monthly_income",
                format!("must be a non-negative amount, got {}", self.gross_monthly_income),
            ));
        }
        if !self.tax_rate_pct.is_finite() || !(0.0..=100.0).contains(&self.tax_rate_pct) {
            return Err(PlanError::invalid(
                "tax_rate_pct",
                format!("must be in [0, 100], got {}", self.tax_rate_pct),
            ));
        }
        for (field, amount) in self.expenses.fields() {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PlanError::invalid(
                    field,
                    format!("must be a non-negative amount, got {}", amount),
                ));
            }
        }
        for (field, amount) in self.contributions.fields() {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PlanError::invalid(
                    field,
                    format!("must be a non-negative amount, got {}", amount),
                ));
            }
        }
        if self.horizon_months < 1 || self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(PlanError::invalid(
                "horizon_months",
                format!("must be in [1, {}], got {}", MAX_HORIZON_MONTHS, self.horizon_months),
            ));
        }
        if !self.savings_target.is_finite() || self.savings_target < 0.0 {
            return Err(PlanError::invalid(
                "savings_target",
                format!("must be a non-negative amount, got {}", self.savings_target),
            ));
        }
        Ok(())
    }
}

impl Default for FinancialInputs {
    fn default() -> Self {
        Self {
            gross_monthly_income: 5000.0,
            tax_rate_pct: 20.0,
            expenses: Expenses::default(),
            contributions: Contributions::default(),
            horizon_months: 12,
            savings_target: 10_000.0,
        }
    }
}
