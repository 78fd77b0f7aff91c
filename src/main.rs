//! Finance Planner CLI
//!
//! Command-line interface for running budget and net-worth projections

use anyhow::Context;
use clap::Parser;

use finance_planner::{
    advice::build_advice_prompt,
    plan::{Contributions, Expenses, FinancialInputs},
    AlphaVantageClient, AssetKind, PlanRunner,
};

/// Project net worth from monthly income, expenses, and investment
/// contributions across five asset classes.
#[derive(Debug, Parser)]
#[command(name = "finance_planner", version)]
struct Args {
    /// Gross monthly income before tax
    #[arg(long, default_value_t = 5000.0)]
    income: f64,

    /// Tax rate in percent (0-100)
    #[arg(long, default_value_t = 20.0)]
    tax_rate: f64,

    /// Housing / rent per month
    #[arg(long, default_value_t = 1200.0)]
    housing: f64,

    /// Food / groceries per month
    #[arg(long, default_value_t = 500.0)]
    food: f64,

    /// Transport per month
    #[arg(long, default_value_t = 300.0)]
    transport: f64,

    /// Utilities per month
    #[arg(long, default_value_t = 200.0)]
    utilities: f64,

    /// Entertainment per month
    #[arg(long, default_value_t = 200.0)]
    entertainment: f64,

    /// Other expenses per month
    #[arg(long, default_value_t = 200.0)]
    other_expenses: f64,

    /// Monthly stock contribution
    #[arg(long, default_value_t = 500.0)]
    stocks: f64,

    /// Monthly bond contribution
    #[arg(long, default_value_t = 300.0)]
    bonds: f64,

    /// Monthly real estate contribution
    #[arg(long, default_value_t = 0.0)]
    real_estate: f64,

    /// Monthly crypto contribution
    #[arg(long, default_value_t = 0.0)]
    crypto: f64,

    /// Monthly fixed deposit contribution
    #[arg(long, default_value_t = 0.0)]
    fixed_deposit: f64,

    /// Projection horizon in months (1-60)
    #[arg(long, default_value_t = 12)]
    months: u32,

    /// Savings target
    #[arg(long, default_value_t = 10000.0)]
    savings_target: f64,

    /// Alpha Vantage API key for live return estimates
    /// (falls back to the ALPHAVANTAGE_API_KEY environment variable;
    /// without a key, fixed fallback rates are used)
    #[arg(long)]
    api_key: Option<String>,

    /// Write the full projection table to this CSV file
    #[arg(long)]
    output: Option<std::path::PathBuf>,

    /// Print the advice prompt that would be sent to a chat service
    #[arg(long)]
    show_prompt: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let inputs = FinancialInputs {
        gross_monthly_income: args.income,
        tax_rate_pct: args.tax_rate,
        expenses: Expenses {
            housing: args.housing,
            food: args.food,
            transport: args.transport,
            utilities: args.utilities,
            entertainment: args.entertainment,
            other: args.other_expenses,
        },
        contributions: Contributions {
            stocks: args.stocks,
            bonds: args.bonds,
            real_estate: args.real_estate,
            crypto: args.crypto,
            fixed_deposit: args.fixed_deposit,
        },
        horizon_months: args.months,
        savings_target: args.savings_target,
    };

    let api_key = args
        .api_key
        .or_else(|| std::env::var("ALPHAVANTAGE_API_KEY").ok());

    let runner = match api_key {
        Some(key) => {
            let source = AlphaVantageClient::new(key);
            PlanRunner::from_source(&source)
        }
        None => PlanRunner::new(),
    };

    let result = runner.run(&inputs)?;

    println!("Finance Planner v0.1.0");
    println!("======================\n");

    println!("Summary:");
    println!("  Income (gross):   ${:>12.2}", inputs.gross_monthly_income);
    println!("  After-tax income: ${:>12.2}", inputs.after_tax_income());
    println!("  Expenses:         ${:>12.2}", inputs.expenses.total());
    println!("  Investments:      ${:>12.2}", inputs.contributions.total());
    println!("  Net cash flow:    ${:>12.2}/mo", inputs.net_monthly_flow());
    println!();

    println!("Monthly return assumptions:");
    for kind in AssetKind::ALL {
        println!(
            "  {:<13} {:>8.4}%",
            kind.as_str(),
            runner.assumptions().rate(kind) * 100.0
        );
    }
    println!();

    // Print the table (first 24 months to console)
    println!("Projection ({} months):", result.rows.len());
    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Balance", "Stocks", "Bonds", "RealEstate", "Crypto", "FixedDep", "NetWorth"
    );
    println!("{}", "-".repeat(98));
    for row in result.rows.iter().take(24) {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month,
            row.balance,
            row.asset(AssetKind::Stocks),
            row.asset(AssetKind::Bonds),
            row.asset(AssetKind::RealEstate),
            row.asset(AssetKind::Crypto),
            row.asset(AssetKind::FixedDeposit),
            row.net_worth,
        );
    }
    if result.rows.len() > 24 {
        println!("... ({} more months)", result.rows.len() - 24);
    }

    let summary = result.summary();
    println!();
    println!("  Final balance:   ${:.2}", summary.final_balance);
    println!("  Final net worth: ${:.2}", summary.final_net_worth);
    match summary.months_to_target {
        Some(month) => println!(
            "  Savings target of ${:.2} reached in month {}",
            summary.savings_target, month
        ),
        None => println!(
            "  Savings target of ${:.2} not reached within {} months",
            summary.savings_target, summary.total_months
        ),
    }

    if let Some(path) = args.output {
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        writer.write_record([
            "Month",
            "Balance",
            "Stocks",
            "Bonds",
            "RealEstate",
            "Crypto",
            "FixedDeposit",
            "NetWorth",
        ])?;
        for row in &result.rows {
            writer.write_record([
                row.month.to_string(),
                format!("{:.8}", row.balance),
                format!("{:.8}", row.asset(AssetKind::Stocks)),
                format!("{:.8}", row.asset(AssetKind::Bonds)),
                format!("{:.8}", row.asset(AssetKind::RealEstate)),
                format!("{:.8}", row.asset(AssetKind::Crypto)),
                format!("{:.8}", row.asset(AssetKind::FixedDeposit)),
                format!("{:.8}", row.net_worth),
            ])?;
        }
        writer.flush()?;
        println!("\nFull results written to: {}", path.display());
    }

    if args.show_prompt {
        println!("\nAdvice prompt:\n{}", build_advice_prompt(&inputs, &result));
    }

    Ok(())
}
