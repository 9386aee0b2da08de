//! Wire structs for the Yahoo chart and quote-summary endpoints.
//!
//! Both endpoints wrap their payload in a `{ result, error }` envelope. The
//! chart payload is column-oriented: one array of timestamps plus parallel
//! arrays per OHLCV column, with `null` entries for halted sessions. The
//! quote-summary payload reports every numeric field as a `{ raw, fmt }`
//! object; [`QuoteSummaryResult::normalize`] flattens that onto the fixed
//! field names of [`ReferenceData`] so the engine never sees vendor keys.

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::models::{price_point::PricePoint, reference::ReferenceData};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<QuoteColumns>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResult {
    /// Flattens the column-oriented payload into row-oriented price points.
    ///
    /// Rows where any column is `null` (or where a parallel array is shorter
    /// than the timestamp array) are dropped, so the output only contains
    /// complete sessions. Order follows the timestamp array, which the API
    /// returns ascending.
    pub fn into_points(self) -> Vec<PricePoint> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };

        self.timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let timestamp = Utc.timestamp_opt(ts, 0).single()?;
                Some(PricePoint {
                    timestamp,
                    open: (*quote.open.get(i)?)?,
                    high: (*quote.high.get(i)?)?,
                    low: (*quote.low.get(i)?)?,
                    close: (*quote.close.get(i)?)?,
                    volume: (*quote.volume.get(i)?)?,
                })
            })
            .collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryBody,
}

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryBody {
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteSummaryResult {
    #[serde(rename = "summaryDetail")]
    pub summary_detail: Option<SummaryDetail>,
    #[serde(rename = "defaultKeyStatistics")]
    pub key_statistics: Option<KeyStatistics>,
    #[serde(rename = "financialData")]
    pub financial_data: Option<FinancialData>,
}

/// A `{ raw, fmt }` numeric wrapper. `raw` is absent for fields the vendor
/// knows about but has no value for, so it is optional too.
#[derive(Deserialize, Debug, Default)]
pub struct RawValue {
    pub raw: Option<f64>,
}

fn value(field: &Option<RawValue>) -> Option<f64> {
    field.as_ref().and_then(|v| v.raw)
}

#[derive(Deserialize, Debug, Default)]
pub struct SummaryDetail {
    #[serde(rename = "marketCap")]
    pub market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<RawValue>,
    pub beta: Option<RawValue>,
    #[serde(rename = "averageVolume")]
    pub average_volume: Option<RawValue>,
}

#[derive(Deserialize, Debug, Default)]
pub struct KeyStatistics {
    #[serde(rename = "sharesOutstanding")]
    pub shares_outstanding: Option<RawValue>,
    #[serde(rename = "priceToBook")]
    pub price_to_book: Option<RawValue>,
}

#[derive(Deserialize, Debug, Default)]
pub struct FinancialData {
    #[serde(rename = "debtToEquity")]
    pub debt_to_equity: Option<RawValue>,
    #[serde(rename = "returnOnEquity")]
    pub return_on_equity: Option<RawValue>,
    #[serde(rename = "profitMargins")]
    pub profit_margins: Option<RawValue>,
}

impl QuoteSummaryResult {
    /// Maps the vendor payload onto the fixed [`ReferenceData`] contract.
    ///
    /// Absent fields stay `None`; the dividend yield fraction is scaled to a
    /// percentage to match how the engine reports it.
    pub fn normalize(self) -> ReferenceData {
        let detail = self.summary_detail.unwrap_or_default();
        let stats = self.key_statistics.unwrap_or_default();
        let fin = self.financial_data.unwrap_or_default();

        ReferenceData {
            market_cap: value(&detail.market_cap),
            pe_ratio: value(&detail.trailing_pe),
            dividend_yield_pct: value(&detail.dividend_yield).map(|y| y * 100.0),
            beta: value(&detail.beta),
            shares_outstanding: value(&stats.shares_outstanding),
            avg_volume: value(&detail.average_volume),
            price_to_book: value(&stats.price_to_book),
            debt_to_equity: value(&fin.debt_to_equity),
            return_on_equity: value(&fin.return_on_equity),
            profit_margin: value(&fin.profit_margins),
        }
    }
}
