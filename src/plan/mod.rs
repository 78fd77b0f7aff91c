//! Plan inputs: income, expenses, asset contributions, and validation

mod asset;
mod inputs;

pub use asset::AssetKind;
pub use inputs::{Contributions, Expenses, FinancialInputs, MAX_HORIZON_MONTHS};

use thiserror::Error;

/// Errors raised when a plan cannot be computed
#[derive(Debug, Error)]
pub enum PlanError {
    /// An input value is outside its documented range.
    /// Validation is explicit: out-of-range values are rejected, not clamped.
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },
}

impl PlanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
