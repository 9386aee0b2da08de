#![allow(dead_code)]

//! In-memory provider stub and series builders shared by the integration
//! tests.

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use market_data_feed::{
    models::{
        period::Period, price_point::PricePoint, price_series::PriceSeries,
        reference::ReferenceData,
    },
    providers::{ApiSnafu, MarketDataProvider, ProviderError},
};

/// Provider stub serving canned history and reference data from memory.
#[derive(Default)]
pub struct StaticProvider {
    history: HashMap<(String, Period), Vec<PricePoint>>,
    reference: HashMap<String, ReferenceData>,
    failing: HashSet<String>,
    reference_failing: HashSet<String>,
    history_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(
        mut self,
        symbol: &str,
        period: Period,
        points: Vec<PricePoint>,
    ) -> Self {
        self.history.insert((symbol.to_string(), period), points);
        self
    }

    pub fn with_closes(self, symbol: &str, period: Period, closes: &[f64]) -> Self {
        self.with_points(symbol, period, points_from_closes(closes))
    }

    pub fn with_reference(mut self, symbol: &str, reference: ReferenceData) -> Self {
        self.reference.insert(symbol.to_string(), reference);
        self
    }

    /// Makes every fetch for `symbol` return a provider error.
    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    /// Makes only the reference lookup for `symbol` fail; history keeps
    /// working.
    pub fn failing_reference(mut self, symbol: &str) -> Self {
        self.reference_failing.insert(symbol.to_string());
        self
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<PriceSeries, ProviderError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(symbol) {
            return ApiSnafu {
                symbol,
                message: "stubbed outage",
            }
            .fail();
        }
        let points = self
            .history
            .get(&(symbol.to_string(), period))
            .cloned()
            .unwrap_or_default();
        Ok(PriceSeries::new(symbol, period, points))
    }

    async fn fetch_reference_data(&self, symbol: &str) -> Result<ReferenceData, ProviderError> {
        if self.failing.contains(symbol) || self.reference_failing.contains(symbol) {
            return ApiSnafu {
                symbol,
                message: "stubbed outage",
            }
            .fail();
        }
        Ok(self.reference.get(symbol).cloned().unwrap_or_default())
    }
}

/// Builds daily points from `(high, low, close)` rows, one session apart.
pub fn points_from_rows(rows: &[(f64, f64, f64)]) -> Vec<PricePoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 16, 0, 0).unwrap();
    rows.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| PricePoint {
            timestamp: base + Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume: 1_000_000,
        })
        .collect()
}

/// Builds flat-range daily points where high = low = close.
pub fn points_from_closes(closes: &[f64]) -> Vec<PricePoint> {
    let rows: Vec<(f64, f64, f64)> = closes.iter().map(|&c| (c, c, c)).collect();
    points_from_rows(&rows)
}

/// A short series whose high peaks at 100 and whose last close sits
/// `drop_pct` percent below it.
pub fn points_with_drop(drop_pct: f64) -> Vec<PricePoint> {
    let bottom = 100.0 - drop_pct;
    points_from_rows(&[(100.0, 95.0, 98.0), (99.0, bottom, bottom)])
}
