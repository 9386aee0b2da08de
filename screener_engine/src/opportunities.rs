//! Buy-opportunity scan over a symbol universe.

use market_data_feed::providers::MarketDataProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::metrics::{MetricsCache, MetricsRecord, MetricsService};

/// One universe member: a symbol plus its caller-supplied sector label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseEntry {
    /// Ticker symbol (normalized to uppercase by the config layer).
    pub symbol: String,
    /// Sector grouping label; display-only, never derived by the engine.
    #[serde(default)]
    pub sector: String,
}

/// Thresholds for the opportunity scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScanConfig {
    /// Minimum percent drop from the recent high to qualify.
    pub min_drop_pct: f64,
    /// Maximum trailing P/E; symbols with no known P/E still qualify.
    pub max_pe: f64,
    /// Minimum market cap in dollars; symbols with unknown or zero market
    /// cap never qualify.
    pub min_market_cap: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_drop_pct: 30.0,
            max_pe: 50.0,
            min_market_cap: 0.0,
        }
    }
}

/// One qualifying symbol with the fields the host displays plus its score.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityCandidate {
    /// Ticker symbol.
    pub symbol: String,
    /// Sector label carried over from the universe entry.
    pub sector: String,
    /// Last close of the analysis series.
    pub current_price: f64,
    /// Highest high over the analysis series.
    pub year_high: f64,
    /// Percent drop from the drop-window high.
    pub drop_from_high_pct: f64,
    /// RSI at scan time.
    pub rsi: f64,
    /// Annualized volatility, percent.
    pub volatility_pct: f64,
    /// Trailing P/E if known.
    pub pe_ratio: Option<f64>,
    /// Dividend yield in percent if known.
    pub dividend_yield_pct: Option<f64>,
    /// Market cap in dollars (always known for a qualifying candidate).
    pub market_cap: f64,
    /// Composite opportunity score, higher is better.
    pub score: f64,
}

/// Composite opportunity score (higher = better candidate).
///
/// Depth of the drop (capped at 5 points), a value bonus for a P/E under
/// 20, and a one-point stability bonus for mega caps (> $10B).
pub fn opportunity_score(drop_from_high_pct: f64, pe_ratio: Option<f64>, market_cap: f64) -> f64 {
    let drop_score = (drop_from_high_pct / 10.0).min(5.0);
    let value_score = match pe_ratio {
        Some(pe) if pe < 20.0 => (20.0 - pe) / 2.0,
        _ => 0.0,
    };
    let size_score = if market_cap > 1e10 { 1.0 } else { 0.0 };
    drop_score + value_score + size_score
}

/// Scans a universe for buy candidates and ranks them by score.
///
/// Every symbol is evaluated independently through a pass-scoped
/// [`MetricsCache`]; a symbol with no price data is skipped, never aborting
/// the pass. Output is sorted descending by score with a stable sort, so
/// equal-score candidates keep their universe order.
pub async fn scan_opportunities<P: MarketDataProvider>(
    service: &MetricsService<P>,
    universe: &[UniverseEntry],
    scan: &ScanConfig,
) -> Vec<OpportunityCandidate> {
    let period = service.analysis_period();
    let mut cache = MetricsCache::new();
    let mut candidates = Vec::new();

    for entry in universe {
        let Some(metrics) = cache.get_or_fetch(service, &entry.symbol, period).await else {
            debug!(symbol = %entry.symbol, "skipping symbol with no price data");
            continue;
        };
        if let Some(candidate) = qualify(&metrics, entry, scan) {
            candidates.push(candidate);
        }
    }

    // Vec::sort_by is stable: ties keep universe order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    info!(
        scanned = universe.len(),
        qualified = candidates.len(),
        "opportunity scan complete"
    );
    candidates
}

/// Applies the scan thresholds to one metrics record.
fn qualify(
    metrics: &MetricsRecord,
    entry: &UniverseEntry,
    scan: &ScanConfig,
) -> Option<OpportunityCandidate> {
    if metrics.drop_from_high_pct < scan.min_drop_pct {
        return None;
    }
    if let Some(pe) = metrics.reference.pe_ratio {
        if pe > scan.max_pe {
            return None;
        }
    }
    let market_cap = metrics.reference.market_cap?;
    if market_cap <= 0.0 || market_cap < scan.min_market_cap {
        return None;
    }

    Some(OpportunityCandidate {
        symbol: metrics.symbol.clone(),
        sector: entry.sector.clone(),
        current_price: metrics.current_price,
        year_high: metrics.year_high,
        drop_from_high_pct: metrics.drop_from_high_pct,
        rsi: metrics.indicators.rsi,
        volatility_pct: metrics.volatility_pct,
        pe_ratio: metrics.reference.pe_ratio,
        dividend_yield_pct: metrics.reference.dividend_yield_pct,
        market_cap,
        score: opportunity_score(
            metrics.drop_from_high_pct,
            metrics.reference.pe_ratio,
            market_cap,
        ),
    })
}
