use crate::core::date::DateRange;
use crate::core::error::EvalError;
use crate::core::quote::{FundId, FundQuote, QuoteProvider};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

// Response shape of GET /<fund_id>/days: a chronological list of daily
// price records.
#[derive(Debug, Deserialize)]
struct RealAssetDaysResponse {
    data: Vec<RealAssetDay>,
}

#[derive(Debug, Deserialize)]
struct RealAssetDay {
    attributes: RealAssetAttributes,
}

#[derive(Debug, Deserialize)]
struct RealAssetAttributes {
    price: f64,
}

/// Quote provider backed by the Fintual real-assets API.
///
/// One outbound request per `fetch_quote` call; no caching and no retries,
/// a failed fetch aborts the evaluation it belongs to.
pub struct FintualProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FintualProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(FintualProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder().user_agent("fpick/0.1").build()?,
        })
    }

    fn days_url(&self, fund_id: &FundId, range: &DateRange) -> String {
        format!(
            "{}/{}/days?from_date={}&to_date={}",
            self.base_url,
            fund_id,
            range.api_start(),
            range.api_end()
        )
    }
}

#[async_trait]
impl QuoteProvider for FintualProvider {
    #[instrument(
        name = "FintualQuoteFetch",
        skip(self, range),
        fields(fund_id = %fund_id)
    )]
    async fn fetch_quote(
        &self,
        fund_id: &FundId,
        range: &DateRange,
    ) -> Result<FundQuote, EvalError> {
        let url = self.days_url(fund_id, range);
        debug!("Requesting quota prices from {}", url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| EvalError::RemoteService {
                    fund_id: fund_id.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvalError::RemoteService {
                fund_id: fund_id.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body: RealAssetDaysResponse =
            response
                .json()
                .await
                .map_err(|e| EvalError::MalformedResponse {
                    fund_id: fund_id.to_string(),
                    reason: e.to_string(),
                })?;

        // First record is the window start, last is the window end.
        let (first, last) = match (body.data.first(), body.data.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(EvalError::MalformedResponse {
                    fund_id: fund_id.to_string(),
                    reason: "empty data array".to_string(),
                });
            }
        };

        Ok(FundQuote {
            initial_price: first.attributes.price,
            final_price: last.attributes.price,
        })
    }
}
