//! Candidate portfolios and the profit selection algorithm.

use crate::core::error::EvalError;
use crate::core::quote::FundPriceTable;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

/// An allocation of investment weights across funds. Weights nominally sum
/// to 1.0, but that is a convention of the configuration files, not a rule
/// the evaluation enforces: profit is computed from whatever weights are
/// given.
///
/// Backed by a `BTreeMap` so a portfolio always displays its funds in the
/// same order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Portfolio(pub BTreeMap<String, f64>);

impl Portfolio {
    pub fn weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(fund, weight)| (fund.as_str(), *weight))
    }
}

impl Display for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = self.0.iter().peekable();
        write!(f, "{{")?;
        while let Some((fund, weight)) = parts.next() {
            write!(f, "{fund}: {weight}")?;
            if parts.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, "}}")
    }
}

/// The winning portfolio and its profit, the terminal output of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub profit: f64,
    pub portfolio: Portfolio,
}

/// Computes the profit a portfolio would have produced over the evaluation
/// window: the investment is split across funds by weight, buys quota units
/// at the initial price, sells them at the final price, and profit is the
/// total proceeds minus the original stake.
pub fn portfolio_profit(
    portfolio: &Portfolio,
    prices: &FundPriceTable,
    investment_amount: f64,
) -> Result<f64, EvalError> {
    let mut proceeds = 0.0;
    for (fund, weight) in portfolio.weights() {
        let quote = prices.get(fund).ok_or_else(|| EvalError::MissingPriceData {
            fund: fund.to_string(),
        })?;
        if quote.initial_price <= 0.0 || !quote.initial_price.is_finite() {
            return Err(EvalError::InvalidPrice {
                fund: fund.to_string(),
                price: quote.initial_price,
            });
        }
        let quotas = investment_amount * weight / quote.initial_price;
        proceeds += quotas * quote.final_price;
    }
    Ok(proceeds - investment_amount)
}

/// Evaluates every candidate and returns the most profitable one.
///
/// The running best starts at a profit of zero with the first candidate as
/// placeholder, and a candidate replaces it only on strictly greater profit.
/// Two consequences of that baseline are part of the contract: when no
/// candidate is profitable the result pairs a profit of `0` with the first
/// portfolio, and equal positive profits resolve to the earliest candidate.
pub fn select_best(
    portfolios: &[Portfolio],
    prices: &FundPriceTable,
    investment_amount: f64,
) -> Result<EvaluationResult, EvalError> {
    let first = portfolios.first().ok_or(EvalError::EmptyPortfolios)?;

    let mut best_profit = 0.0;
    let mut best_portfolio = first;
    for portfolio in portfolios {
        let profit = portfolio_profit(portfolio, prices, investment_amount)?;
        debug!(%portfolio, profit, "Evaluated candidate");
        if profit > best_profit {
            best_profit = profit;
            best_portfolio = portfolio;
        }
    }

    Ok(EvaluationResult {
        profit: best_profit,
        portfolio: best_portfolio.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::FundQuote;
    use std::collections::HashMap;

    fn quote(initial: f64, fin: f64) -> FundQuote {
        FundQuote {
            initial_price: initial,
            final_price: fin,
        }
    }

    fn portfolio(weights: &[(&str, f64)]) -> Portfolio {
        Portfolio(
            weights
                .iter()
                .map(|(fund, weight)| (fund.to_string(), *weight))
                .collect(),
        )
    }

    fn sample_prices() -> FundPriceTable {
        HashMap::from([
            ("fund_1".to_string(), quote(100.0, 150.0)),
            ("fund_2".to_string(), quote(200.0, 250.0)),
        ])
    }

    #[test]
    fn test_profit_for_even_split() {
        // 5000/100 = 50 quotas at 150 -> 7500; 5000/200 = 25 at 250 -> 6250.
        let p = portfolio(&[("fund_1", 0.5), ("fund_2", 0.5)]);
        let profit = portfolio_profit(&p, &sample_prices(), 10_000.0).unwrap();
        assert_eq!(profit, 3750.0);
    }

    #[test]
    fn test_profit_accepts_weights_not_summing_to_one() {
        // Half the stake stays uninvested, so the formula reports a loss.
        let p = portfolio(&[("fund_1", 0.5)]);
        let profit = portfolio_profit(&p, &sample_prices(), 10_000.0).unwrap();
        assert_eq!(profit, -2500.0);
    }

    #[test]
    fn test_profit_missing_fund() {
        let p = portfolio(&[("unknown_fund", 1.0)]);
        let err = portfolio_profit(&p, &sample_prices(), 10_000.0).unwrap_err();
        match err {
            EvalError::MissingPriceData { fund } => assert_eq!(fund, "unknown_fund"),
            other => panic!("Expected MissingPriceData, got {other:?}"),
        }
    }

    #[test]
    fn test_profit_rejects_zero_initial_price() {
        let prices = HashMap::from([("fund_1".to_string(), quote(0.0, 150.0))]);
        let p = portfolio(&[("fund_1", 1.0)]);
        let err = portfolio_profit(&p, &prices, 10_000.0).unwrap_err();
        match err {
            EvalError::InvalidPrice { fund, price } => {
                assert_eq!(fund, "fund_1");
                assert_eq!(price, 0.0);
            }
            other => panic!("Expected InvalidPrice, got {other:?}"),
        }
    }

    #[test]
    fn test_profit_rejects_negative_initial_price() {
        let prices = HashMap::from([("fund_1".to_string(), quote(-10.0, 150.0))]);
        let p = portfolio(&[("fund_1", 1.0)]);
        assert!(matches!(
            portfolio_profit(&p, &prices, 10_000.0),
            Err(EvalError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_select_best_picks_highest_profit() {
        // fund_1 gains 50%, fund_2 gains 25%: all-in on fund_1 wins.
        let candidates = vec![
            portfolio(&[("fund_1", 0.5), ("fund_2", 0.5)]), // 3750
            portfolio(&[("fund_1", 1.0)]),                  // 5000
            portfolio(&[("fund_2", 1.0)]),                  // 2500
        ];

        let result = select_best(&candidates, &sample_prices(), 10_000.0).unwrap();

        assert_eq!(result.profit, 5000.0);
        assert_eq!(result.portfolio, candidates[1]);
    }

    #[test]
    fn test_select_best_second_of_two() {
        // Profits 3000 and 4000 respectively.
        let prices = HashMap::from([
            ("fund_1".to_string(), quote(100.0, 130.0)),
            ("fund_2".to_string(), quote(100.0, 140.0)),
        ]);
        let candidates = vec![
            portfolio(&[("fund_1", 1.0)]),
            portfolio(&[("fund_2", 1.0)]),
        ];

        let result = select_best(&candidates, &prices, 10_000.0).unwrap();

        assert_eq!(result.profit, 4000.0);
        assert_eq!(result.portfolio, candidates[1]);
    }

    #[test]
    fn selects_first_with_zero_profit_when_nothing_profitable() {
        // Both funds lose money. Historical behavior: the reported profit
        // stays at the zero baseline and the first candidate is returned,
        // even though zero is not that candidate's actual profit.
        let prices = HashMap::from([
            ("fund_1".to_string(), quote(100.0, 90.0)),
            ("fund_2".to_string(), quote(100.0, 80.0)),
        ]);
        let candidates = vec![
            portfolio(&[("fund_2", 1.0)]), // -2000
            portfolio(&[("fund_1", 1.0)]), // -1000, the lesser loss
        ];

        let result = select_best(&candidates, &prices, 10_000.0).unwrap();

        assert_eq!(result.profit, 0.0);
        assert_eq!(result.portfolio, candidates[0]);
    }

    #[test]
    fn test_select_best_tie_prefers_earliest() {
        let prices = HashMap::from([
            ("fund_1".to_string(), quote(100.0, 150.0)),
            ("fund_2".to_string(), quote(200.0, 300.0)),
        ]);
        // Both gain 50%, so both profit 5000.
        let candidates = vec![
            portfolio(&[("fund_1", 1.0)]),
            portfolio(&[("fund_2", 1.0)]),
        ];

        let result = select_best(&candidates, &prices, 10_000.0).unwrap();

        assert_eq!(result.profit, 5000.0);
        assert_eq!(result.portfolio, candidates[0]);
    }

    #[test]
    fn test_select_best_empty_input() {
        assert!(matches!(
            select_best(&[], &sample_prices(), 10_000.0),
            Err(EvalError::EmptyPortfolios)
        ));
    }

    #[test]
    fn test_select_best_propagates_pricing_errors() {
        let candidates = vec![
            portfolio(&[("fund_1", 1.0)]),
            portfolio(&[("no_such_fund", 1.0)]),
        ];
        assert!(matches!(
            select_best(&candidates, &sample_prices(), 10_000.0),
            Err(EvalError::MissingPriceData { .. })
        ));
    }

    #[test]
    fn test_portfolio_display_is_ordered() {
        let p = portfolio(&[("risky_norris", 0.7), ("conservative_clooney", 0.3)]);
        assert_eq!(
            p.to_string(),
            "{conservative_clooney: 0.3, risky_norris: 0.7}"
        );
    }

    #[test]
    fn test_single_candidate_matches_its_own_profit_when_positive() {
        let p = portfolio(&[("fund_1", 0.5), ("fund_2", 0.5)]);
        let direct = portfolio_profit(&p, &sample_prices(), 10_000.0).unwrap();
        let selected = select_best(std::slice::from_ref(&p), &sample_prices(), 10_000.0).unwrap();
        assert_eq!(selected.profit, direct);
        assert_eq!(selected.portfolio, p);
    }
}
