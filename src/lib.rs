pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::date::DateRange;
use crate::core::error::EvalError;
use crate::core::portfolio::{EvaluationResult, Portfolio, portfolio_profit, select_best};
use crate::core::quote::{FundId, FundPriceTable, FundQuote, QuoteProvider, price_funds};
use anyhow::Result;
use async_trait::async_trait;
use comfy_table::Cell;
use indicatif::ProgressBar;
use tracing::{debug, info};

// Ticks the progress bar as each fund's quote arrives.
struct ProgressProvider<'a> {
    inner: &'a dyn QuoteProvider,
    pb: ProgressBar,
}

#[async_trait]
impl QuoteProvider for ProgressProvider<'_> {
    async fn fetch_quote(
        &self,
        fund_id: &FundId,
        range: &DateRange,
    ) -> Result<FundQuote, EvalError> {
        let result = self.inner.fetch_quote(fund_id, range).await;
        self.pb.inc(1);
        result
    }
}

/// Prices every configured fund over the date range, evaluates each
/// candidate portfolio and reports the most profitable one.
pub async fn run(config: &AppConfig, range: &DateRange, amount: f64) -> Result<EvaluationResult> {
    info!(
        candidates = config.portfolios.len(),
        funds = config.funds.len(),
        %range,
        "Evaluating candidate portfolios"
    );

    let provider = providers::FintualProvider::new(&config.base_url)?;

    let pb = ui::new_progress_bar(config.funds.len() as u64);
    let progress_provider = ProgressProvider {
        inner: &provider,
        pb: pb.clone(),
    };
    let prices = price_funds(&config.funds, range, &progress_provider).await?;
    pb.finish_and_clear();
    debug!(?prices, "Priced all funds");

    let result = select_best(&config.portfolios, &prices, amount)?;
    display_results(&config.portfolios, &prices, amount, &result)?;
    Ok(result)
}

fn display_results(
    portfolios: &[Portfolio],
    prices: &FundPriceTable,
    amount: f64,
    best: &EvaluationResult,
) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Candidate"),
        ui::header_cell("Allocation"),
        ui::header_cell("Profit"),
    ]);

    for (index, portfolio) in portfolios.iter().enumerate() {
        let profit = portfolio_profit(portfolio, prices, amount)?;
        let marker = if *portfolio == best.portfolio { " *" } else { "" };
        table.add_row(vec![
            Cell::new(format!("#{}{marker}", index + 1)),
            Cell::new(portfolio.to_string()),
            ui::profit_cell(profit),
        ]);
    }
    println!("{table}");

    println!(
        "{} {} {} {}",
        ui::style_text("The best portfolio is", ui::StyleType::ResultLabel),
        best.portfolio,
        ui::style_text("with profit", ui::StyleType::ResultLabel),
        ui::style_text(&format!("{:.2}", best.profit), ui::StyleType::ResultValue),
    );
    Ok(())
}
