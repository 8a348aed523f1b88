use thiserror::Error;

/// Failures that can abort a portfolio evaluation run.
///
/// None of these are recovered locally: a single failed fetch or an
/// unpriceable portfolio aborts the whole evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("price service request failed for fund {fund_id}: {reason}")]
    RemoteService { fund_id: String, reason: String },

    #[error("malformed price service response for fund {fund_id}: {reason}")]
    MalformedResponse { fund_id: String, reason: String },

    #[error("no price data for fund '{fund}' referenced by a portfolio")]
    MissingPriceData { fund: String },

    #[error("fund '{fund}' has an unusable initial price ({price})")]
    InvalidPrice { fund: String, price: f64 },

    #[error("no candidate portfolios were provided")]
    EmptyPortfolios,
}
