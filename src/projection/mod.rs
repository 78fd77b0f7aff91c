//! Net-worth projection engine

mod engine;
mod rows;

pub use engine::{annuity_future_value, ProjectionEngine};
pub use rows::{ProjectionResult, ProjectionRow, ProjectionSummary};
