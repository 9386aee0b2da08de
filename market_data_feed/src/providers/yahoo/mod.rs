//! Yahoo Finance adapter: daily history via the chart endpoint, fundamentals
//! via the quote-summary endpoint.

mod response;

use async_trait::async_trait;
use reqwest::{Client, header};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    models::{period::Period, price_series::PriceSeries, reference::ReferenceData},
    providers::{
        ApiSnafu, ClientBuildSnafu, MarketDataProvider, ProviderError, ProviderInitError,
        ReqwestSnafu,
        yahoo::response::{ChartEnvelope, QuoteSummaryEnvelope},
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Env var that redirects all requests, used by tests to hit a stub server.
const BASE_URL_OVERRIDE_VAR: &str = "MARKET_DATA_BASE_URL";

/// The quote-summary modules carrying the reference fields the engine needs.
const QUOTE_SUMMARY_MODULES: &str = "summaryDetail,defaultKeyStatistics,financialData";

/// Market data provider backed by the public Yahoo Finance endpoints.
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Creates a new Yahoo provider.
    ///
    /// The endpoints reject requests without a browser-ish `User-Agent`, so
    /// one is installed as a default header. `MARKET_DATA_BASE_URL`
    /// overrides the endpoint base when set.
    pub fn new() -> Result<Self, ProviderInitError> {
        let base_url =
            get_env_var(BASE_URL_OVERRIDE_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Creates a provider pointed at an explicit endpoint base.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("Mozilla/5.0 (compatible; screener-engine/0.2)"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<PriceSeries, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("range", period.as_str()), ("interval", "1d")])
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu { symbol, message }.fail();
        }

        let envelope = response.json::<ChartEnvelope>().await.context(ReqwestSnafu)?;

        if let Some(error) = envelope.chart.error {
            return ApiSnafu {
                symbol,
                message: error.description,
            }
            .fail();
        }

        // No result block means no history for this symbol/period. That is
        // the defined "no data" case, not an error.
        let Some(result) = envelope
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        else {
            return Ok(PriceSeries::empty(symbol, period));
        };

        Ok(PriceSeries::new(symbol, period, result.into_points()))
    }

    async fn fetch_reference_data(&self, symbol: &str) -> Result<ReferenceData, ProviderError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES)])
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu { symbol, message }.fail();
        }

        let envelope = response
            .json::<QuoteSummaryEnvelope>()
            .await
            .context(ReqwestSnafu)?;

        if let Some(error) = envelope.quote_summary.error {
            return ApiSnafu {
                symbol,
                message: error.description,
            }
            .fail();
        }

        let normalized = envelope
            .quote_summary
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .map(|result| result.normalize())
            .unwrap_or_default();

        Ok(normalized)
    }
}
