//! Plan runner for one-shot and batch projections
//!
//! Resolves return assumptions once, then allows running many projections
//! without re-fetching quotes. Each run is pure: the runner holds no
//! per-request state, so a fresh runner per user session gives explicit
//! lifecycle and teardown.

use rayon::prelude::*;

use crate::plan::{FinancialInputs, PlanError};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::returns::{QuoteSource, ReturnAssumptions};

/// Pre-resolved plan runner
///
/// # Example
/// ```ignore
/// let runner = PlanRunner::from_source(&AlphaVantageClient::new(api_key));
/// let result = runner.run(&inputs)?;
/// ```
#[derive(Debug, Clone)]
pub struct PlanRunner {
    assumptions: ReturnAssumptions,
}

impl PlanRunner {
    /// Runner using the fixed fallback rates (no network)
    pub fn new() -> Self {
        Self {
            assumptions: ReturnAssumptions::fallbacks(),
        }
    }

    /// Runner with pre-built assumptions
    pub fn with_assumptions(assumptions: ReturnAssumptions) -> Self {
        Self { assumptions }
    }

    /// Runner with rates resolved from a live quote source.
    /// Classes with no estimate available keep their fallback rate.
    pub fn from_source(source: &dyn QuoteSource) -> Self {
        Self {
            assumptions: ReturnAssumptions::from_source(source),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &FinancialInputs) -> Result<ProjectionResult, PlanError> {
        let engine = ProjectionEngine::new(self.assumptions.clone());
        engine.project(inputs)
    }

    /// Run projections for multiple plans in parallel.
    /// Projection is pure computation, so the fan-out is safe.
    pub fn run_batch(
        &self,
        plans: &[FinancialInputs],
    ) -> Vec<Result<ProjectionResult, PlanError>> {
        plans.par_iter().map(|inputs| self.run(inputs)).collect()
    }

    /// Assumptions in use, for inspection or customization
    pub fn assumptions(&self) -> &ReturnAssumptions {
        &self.assumptions
    }

    /// Mutable access to the assumptions for scenario overrides
    pub fn assumptions_mut(&mut self) -> &mut ReturnAssumptions {
        &mut self.assumptions
    }
}

impl Default for PlanRunner {
    fn default() -> Self {
        Self::new()
    }
}
