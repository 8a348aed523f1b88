//! Interactive input for the evaluation parameters.
//!
//! Invalid input re-prompts instead of aborting, but the loop is bounded:
//! after `MAX_ATTEMPTS` bad entries the run fails with an error.

use crate::cli::ui::{StyleType, style_text};
use crate::core::date::{DateRange, parse_user_date};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use console::Term;

const MAX_ATTEMPTS: usize = 3;

/// Parses a positive whole-number investment amount.
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: u64 = input
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid whole number", input.trim()))?;
    anyhow::ensure!(amount > 0, "the investment amount must be positive");
    Ok(amount as f64)
}

fn prompt_line(term: &Term, prompt: &str) -> Result<String> {
    term.write_str(&format!("{prompt}: "))?;
    Ok(term.read_line()?)
}

fn report_invalid(term: &Term, error: &anyhow::Error) -> Result<()> {
    term.write_line(&style_text(
        &format!("Error: {error}. Please try again."),
        StyleType::Error,
    ))?;
    Ok(())
}

fn request_valid_date(term: &Term, prompt: &str) -> Result<NaiveDate> {
    for _ in 0..MAX_ATTEMPTS {
        let input = prompt_line(term, prompt)?;
        match parse_user_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => report_invalid(term, &e)?,
        }
    }
    bail!("Too many invalid date entries")
}

fn request_valid_amount(term: &Term, prompt: &str) -> Result<f64> {
    for _ in 0..MAX_ATTEMPTS {
        let input = prompt_line(term, prompt)?;
        match parse_amount(&input) {
            Ok(amount) => return Ok(amount),
            Err(e) => report_invalid(term, &e)?,
        }
    }
    bail!("Too many invalid amount entries")
}

/// Collects the evaluation window and investment amount from the terminal.
/// Dates are entered in DD-MM-YYYY form and the start must come strictly
/// before the end; an out-of-order pair re-prompts both dates.
pub fn request_eval_input(term: &Term) -> Result<(DateRange, f64)> {
    for _ in 0..MAX_ATTEMPTS {
        let start = request_valid_date(term, "Enter the investment start date (DD-MM-YYYY)")?;
        let end = request_valid_date(term, "Enter the investment end date (DD-MM-YYYY)")?;
        match DateRange::new(start, end) {
            Ok(range) => {
                let amount = request_valid_amount(term, "Enter the investment amount")?;
                return Ok((range, amount));
            }
            Err(e) => report_invalid(term, &e)?,
        }
    }
    bail!("Too many invalid date ranges")
}
