//! Finance Planner - budgeting and investment projection engine
//!
//! This library provides:
//! - Validated plan inputs (income, tax, expenses, asset contributions)
//! - Monthly return estimation from an external quote source with fixed fallbacks
//! - Month-by-month net-worth projection across five asset classes
//! - Advice forwarding to chat-completion and conversational-agent services

pub mod advice;
pub mod plan;
pub mod projection;
pub mod returns;
pub mod session;

// Re-export commonly used types
pub use plan::{AssetKind, Contributions, Expenses, FinancialInputs, PlanError};
pub use projection::{ProjectionEngine, ProjectionResult, ProjectionRow};
pub use returns::{AlphaVantageClient, QuoteSource, ReturnAssumptions};
pub use session::PlanRunner;
