//! Canonical in-memory representation of one daily OHLCV session.
//!
//! This struct is the standard output element for all
//! [`MarketDataProvider`](crate::providers::MarketDataProvider)
//! implementations, regardless of vendor.

use chrono::{DateTime, Utc};

/// A single daily price bar (OHLCV) for a given session.
///
/// Prices are non-negative; volume is the integer share count for the
/// session. Vendor-agnostic and used throughout the screening pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// The session timestamp (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the session.
    pub volume: u64,
}
