//! Core evaluation logic and its data contracts

pub mod config;
pub mod date;
pub mod error;
pub mod log;
pub mod portfolio;
pub mod quote;

// Re-export main types for cleaner imports
pub use date::DateRange;
pub use error::EvalError;
pub use portfolio::{EvaluationResult, Portfolio, portfolio_profit, select_best};
pub use quote::{FundId, FundPriceTable, FundQuote, QuoteProvider, price_funds};
