use anyhow::Result;
use clap::Parser;
use fpick::cli::prompt;
use fpick::core::config::AppConfig;
use fpick::core::date::{DateRange, parse_user_date};
use fpick::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the fund-id configuration file
    #[arg(long)]
    funds_path: Option<String>,

    /// Path to the candidate portfolios file
    #[arg(long)]
    portfolios_path: Option<String>,

    /// Override the price API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Investment start date (DD-MM-YYYY); prompted for when omitted
    #[arg(long)]
    start_date: Option<String>,

    /// Investment end date (DD-MM-YYYY); prompted for when omitted
    #[arg(long)]
    end_date: Option<String>,

    /// Investment amount; prompted for when omitted
    #[arg(long)]
    amount: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = evaluate(cli).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Evaluation failed");
    }
    result
}

async fn evaluate(cli: Cli) -> Result<()> {
    let config = AppConfig::load(
        cli.funds_path.as_deref(),
        cli.portfolios_path.as_deref(),
        cli.base_url.as_deref(),
    )?;

    let (range, amount) = match (&cli.start_date, &cli.end_date, cli.amount) {
        (Some(start), Some(end), Some(amount)) => {
            anyhow::ensure!(amount > 0, "the investment amount must be positive");
            let range = DateRange::new(parse_user_date(start)?, parse_user_date(end)?)?;
            (range, amount as f64)
        }
        _ => prompt::request_eval_input(&console::Term::stdout())?,
    };

    fpick::run(&config, &range, amount).await?;
    Ok(())
}
