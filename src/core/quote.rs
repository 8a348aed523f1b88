//! Quote fetching abstractions and the per-fund pricing step.

use crate::core::date::DateRange;
use crate::core::error::EvalError;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::debug;

/// Opaque fund identifier. Configuration files use plain numbers for
/// Fintual ids, but nothing downstream depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum FundId {
    Numeric(u64),
    Text(String),
}

impl Display for FundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundId::Numeric(id) => write!(f, "{id}"),
            FundId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// Quota price of one fund at the two boundary dates of the evaluation
/// window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundQuote {
    pub initial_price: f64,
    pub final_price: f64,
}

/// Fund name to quote, built once per evaluation run and read-only after.
pub type FundPriceTable = HashMap<String, FundQuote>;

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(
        &self,
        fund_id: &FundId,
        range: &DateRange,
    ) -> Result<FundQuote, EvalError>;
}

/// Fetches the boundary quota prices for every configured fund.
///
/// Fetches are independent and run concurrently, but the first failure
/// aborts the whole operation: either every fund is priced or none are.
pub async fn price_funds(
    funds: &HashMap<String, FundId>,
    range: &DateRange,
    provider: &dyn QuoteProvider,
) -> Result<FundPriceTable, EvalError> {
    debug!(fund_count = funds.len(), %range, "Pricing funds");

    let fetches = funds.iter().map(|(name, id)| async move {
        let quote = provider.fetch_quote(id, range).await?;
        debug!(fund = %name, ?quote, "Priced fund");
        Ok::<_, EvalError>((name.clone(), quote))
    });

    Ok(try_join_all(fetches).await?.into_iter().collect())
}
