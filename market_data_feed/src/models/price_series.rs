//! A collection of daily price points for one symbol over one period.

use crate::models::{period::Period, price_point::PricePoint};

/// Ordered price history for a single symbol over one requested period.
///
/// Points are ascending by timestamp. The series may be empty when the
/// provider had no data for the symbol/period; downstream code treats empty
/// as a defined "no data" case, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// The symbol this history represents (e.g., "AAPL", "^GSPC").
    pub symbol: String,
    /// The lookback period that was requested.
    pub period: Period,
    /// The daily OHLCV points, ascending by timestamp.
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series from already-ordered points.
    pub fn new(symbol: impl Into<String>, period: Period, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            points,
        }
    }

    /// A series with no data, the fail-soft result for a missing symbol.
    pub fn empty(symbol: impl Into<String>, period: Period) -> Self {
        Self::new(symbol, period, Vec::new())
    }

    /// True when the provider returned no sessions.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of sessions in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Closing prices in session order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Session highs in session order.
    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    /// Session lows in session order.
    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    /// The most recent closing price, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Whether timestamps are strictly increasing.
    pub fn is_strictly_ordered(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn point(day: i64, close: f64) -> PricePoint {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PricePoint {
            timestamp: base + Duration::days(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn empty_series_has_no_last_close() {
        let s = PriceSeries::empty("AAPL", Period::OneYear);
        assert!(s.is_empty());
        assert_eq!(s.last_close(), None);
        assert!(s.is_strictly_ordered());
    }

    #[test]
    fn column_accessors_preserve_order() {
        let s = PriceSeries::new(
            "AAPL",
            Period::OneMonth,
            vec![point(0, 10.0), point(1, 11.0), point(2, 9.5)],
        );
        assert_eq!(s.closes(), vec![10.0, 11.0, 9.5]);
        assert_eq!(s.last_close(), Some(9.5));
        assert!(s.is_strictly_ordered());
    }

    #[test]
    fn duplicate_timestamps_are_not_strictly_ordered() {
        let s = PriceSeries::new("AAPL", Period::OneMonth, vec![point(0, 10.0), point(0, 11.0)]);
        assert!(!s.is_strictly_ordered());
    }
}
