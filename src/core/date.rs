//! Date handling at the two boundaries: users type `DD-MM-YYYY`, the price
//! API speaks `YYYY-MM-DD`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fmt::Display;

const USER_DATE_FORMAT: &str = "%d-%m-%Y";
const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date entered by the user in `DD-MM-YYYY` form.
pub fn parse_user_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), USER_DATE_FORMAT)
        .with_context(|| format!("'{input}' is not a valid DD-MM-YYYY date"))
}

/// Formats a date back into the user-facing `DD-MM-YYYY` form.
pub fn format_user_date(date: NaiveDate) -> String {
    date.format(USER_DATE_FORMAT).to_string()
}

/// The evaluation window. The start is strictly before the end; the
/// constructor is the only way to build one, so the ordering holds
/// everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        anyhow::ensure!(
            start < end,
            "start date {} must be before end date {}",
            format_user_date(start),
            format_user_date(end)
        );
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date in the API's `YYYY-MM-DD` form.
    pub fn api_start(&self) -> String {
        self.start.format(API_DATE_FORMAT).to_string()
    }

    /// End date in the API's `YYYY-MM-DD` form.
    pub fn api_end(&self) -> String {
        self.end.format(API_DATE_FORMAT).to_string()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_user_date(self.start),
            format_user_date(self.end)
        )
    }
}
