//! Fundamental reference fields for a symbol.

/// Reference (fundamental) data for one symbol.
///
/// Every field is `Option<f64>`: `None` is the explicit "unavailable" marker
/// for fields the vendor did not report. Zero is a legitimate value for some
/// fields (a stock can have a 0% dividend yield), so absence must never be
/// collapsed to `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    /// Market capitalization in dollars.
    pub market_cap: Option<f64>,
    /// Trailing price/earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Dividend yield as a percentage (e.g. 0.55 for 0.55%).
    pub dividend_yield_pct: Option<f64>,
    /// Beta versus the broad market.
    pub beta: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Average daily volume.
    pub avg_volume: Option<f64>,
    /// Price/book ratio.
    pub price_to_book: Option<f64>,
    /// Debt/equity ratio.
    pub debt_to_equity: Option<f64>,
    /// Return on equity as a fraction.
    pub return_on_equity: Option<f64>,
    /// Profit margin as a fraction.
    pub profit_margin: Option<f64>,
}
