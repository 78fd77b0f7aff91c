//! Downstream advice collaborators
//!
//! Builds the financial-summary prompt and forwards it to third-party chat
//! services: an OpenAI-compatible chat-completion endpoint and a
//! conversational-agent platform. These are opaque collaborators; any
//! failure surfaces as a distinguishable "advice unavailable" error and
//! never as a crash or a projection failure.

mod agent;
mod chat_completion;

pub use agent::{AgentMessage, AgentSession, AgentState, AgentTransport, BotpressClient};
pub use chat_completion::{ChatCompletionClient, ChatMessage};

use thiserror::Error;

use crate::plan::FinancialInputs;
use crate::projection::ProjectionResult;

/// Errors from the advice collaborators. Failures are retained for display,
/// never auto-retried.
#[derive(Debug, Clone, Error)]
pub enum AdviceError {
    #[error("advice unavailable: transport error: {0}")]
    Transport(String),

    #[error("advice unavailable: HTTP {0}")]
    Status(u16),

    #[error("advice unavailable: malformed response: {0}")]
    MalformedResponse(String),

    #[error("advice unavailable: operation not valid in session state {0}")]
    BadState(&'static str),
}

/// Render the financial-summary prompt sent to the advice services
pub fn build_advice_prompt(inputs: &FinancialInputs, result: &ProjectionResult) -> String {
    format!(
        "Financial summary:\n\
         Gross income: ${:.2}\n\
         Tax rate: {}%\n\
         After-tax income: ${:.2}\n\
         Expenses: ${:.2}\n\
         Investments: ${:.2}\n\
         Net cash flow: ${:.2}/mo\n\
         Savings target: ${:.2}\n\
         Projected net worth: ${:.2}\n\
         \n\
         Provide advice on expense control, investment balance, and achieving the savings target.\n",
        inputs.gross_monthly_income,
        inputs.tax_rate_pct,
        inputs.after_tax_income(),
        inputs.expenses.total(),
        inputs.contributions.total(),
        inputs.net_monthly_flow(),
        inputs.savings_target,
        result.final_net_worth(),
    )
}
