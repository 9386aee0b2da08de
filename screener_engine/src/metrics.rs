//! Per-symbol metrics assembly: indicators plus reference fundamentals.

use std::{collections::HashMap, num::NonZeroUsize};

use market_data_feed::{
    models::{period::Period, price_series::PriceSeries, reference::ReferenceData},
    providers::MarketDataProvider,
};
use tracing::{debug, warn};

use crate::{
    config::ScreenerConfig,
    error::EngineError,
    indicators::{
        BOLLINGER_STD_MULT, BOLLINGER_WINDOW, Bollinger, MACD_FAST_SPAN, MACD_SIGNAL_SPAN,
        MACD_SLOW_SPAN, Macd, Momentum, MovingAverages, STOCHASTIC_D_WINDOW, STOCHASTIC_K_WINDOW,
        SUPPORT_RESISTANCE_WINDOW, Stochastic, SupportResistance, annualized_volatility_pct,
        bollinger_bands, drop_from_high_pct, macd, max_value, min_value, momentum_snapshot,
        moving_averages, rsi, stochastic, support_resistance,
    },
};

/// Most-recent-value projection of every indicator over one price series.
///
/// Indicators that cannot be computed for the series length carry their
/// documented neutral default (RSI, stochastic, momentum) or `None` where
/// the scoring layer must skip the indicator instead.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// RSI, 0-100; 50 when the series is shorter than the window.
    pub rsi: f64,
    /// MACD lines; `None` for an empty series.
    pub macd: Option<Macd>,
    /// Bollinger bands; `None` when fewer than 20 sessions exist.
    pub bollinger: Option<Bollinger>,
    /// Stochastic %K/%D; neutral 50/50 when the series is too short.
    pub stochastic: Stochastic,
    /// Nearest support/resistance; `None` for an empty series.
    pub support_resistance: Option<SupportResistance>,
    /// 20/50/200-session SMAs, each `None` when unavailable.
    pub moving_averages: MovingAverages,
    /// 1/3/6-month percent momentum, 0 when the lookback is unavailable.
    pub momentum: Momentum,
}

impl IndicatorSnapshot {
    /// Computes every indicator over one series with the given RSI window.
    pub fn compute(series: &PriceSeries, rsi_window: NonZeroUsize) -> Self {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        Self {
            rsi: rsi(&closes, rsi_window),
            macd: macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN),
            bollinger: bollinger_bands(&closes, BOLLINGER_WINDOW, BOLLINGER_STD_MULT),
            stochastic: stochastic(
                &highs,
                &lows,
                &closes,
                STOCHASTIC_K_WINDOW,
                STOCHASTIC_D_WINDOW,
            ),
            support_resistance: support_resistance(
                &highs,
                &lows,
                &closes,
                SUPPORT_RESISTANCE_WINDOW,
            ),
            moving_averages: moving_averages(&closes),
            momentum: momentum_snapshot(&closes),
        }
    }
}

/// One symbol's complete metrics for one analysis period.
///
/// Constructed fresh per query and never mutated afterwards; callers own
/// any caching (see [`MetricsCache`]).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord {
    /// The symbol the record describes.
    pub symbol: String,
    /// Last close of the analysis series.
    pub current_price: f64,
    /// Highest high over the analysis series.
    pub year_high: f64,
    /// Lowest low over the analysis series.
    pub year_low: f64,
    /// Percent drop from the drop-window high, which is fetched over its
    /// own independently configured window.
    pub drop_from_high_pct: f64,
    /// Annualized volatility of daily returns, percent.
    pub volatility_pct: f64,
    /// Indicator snapshot over the analysis series.
    pub indicators: IndicatorSnapshot,
    /// Fundamental fields, each `None` when the vendor had no value.
    pub reference: ReferenceData,
}

/// Assembles [`MetricsRecord`]s through a [`MarketDataProvider`].
///
/// The service is stateless between calls; every record is a pure function
/// of the provider's responses plus the validated configuration captured at
/// construction.
pub struct MetricsService<P> {
    provider: P,
    rsi_window: NonZeroUsize,
    analysis_period: Period,
    drop_window: Period,
}

impl<P: MarketDataProvider> MetricsService<P> {
    /// Builds a service from a provider and a validated configuration.
    ///
    /// Fails fast on configuration the engine cannot run with; this is the
    /// only error surface in the engine.
    pub fn new(provider: P, config: &ScreenerConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            provider,
            rsi_window: config.rsi_window_typed()?,
            analysis_period: config.analysis_period,
            drop_window: config.drop_window,
        })
    }

    /// The analysis period the service fetches indicator context over.
    pub fn analysis_period(&self) -> Period {
        self.analysis_period
    }

    /// Read access to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches and assembles the metrics record for one symbol.
    ///
    /// Returns `None` when either the analysis series or the drop-window
    /// series is unavailable — never a partially populated record whose
    /// zeros could be mistaken for real values. A failed reference lookup
    /// only degrades the fundamental fields to unavailable.
    pub async fn get_metrics(&self, symbol: &str, period: Period) -> Option<MetricsRecord> {
        let series = self.fetch_series(symbol, period).await?;
        let drop_series = self.fetch_series(symbol, self.drop_window).await?;

        let reference = match self.provider.fetch_reference_data(symbol).await {
            Ok(reference) => reference,
            Err(error) => {
                warn!(symbol, %error, "reference lookup failed, marking fundamentals unavailable");
                ReferenceData::default()
            }
        };

        let closes = series.closes();
        let current_price = series.last_close()?;

        Some(MetricsRecord {
            symbol: symbol.to_string(),
            current_price,
            year_high: max_value(&series.highs())?,
            year_low: min_value(&series.lows())?,
            drop_from_high_pct: drop_from_high_pct(&drop_series.highs(), &drop_series.closes()),
            volatility_pct: annualized_volatility_pct(&closes),
            indicators: IndicatorSnapshot::compute(&series, self.rsi_window),
            reference,
        })
    }

    /// Fetches one series, absorbing both transport errors and empty
    /// results into the uniform "no data" case.
    async fn fetch_series(&self, symbol: &str, period: Period) -> Option<PriceSeries> {
        match self.provider.fetch_history(symbol, period).await {
            Ok(series) if series.is_empty() => {
                debug!(symbol, %period, "provider returned no sessions");
                None
            }
            Ok(series) => Some(series),
            Err(error) => {
                warn!(symbol, %period, %error, "history fetch failed, treating as no data");
                None
            }
        }
    }
}

/// Pass-scoped memo of metrics lookups keyed by `(symbol, period)`.
///
/// Negative results are cached too, so a symbol with no data is not
/// refetched within the same pass. Not meant to be shared across passes
/// with different configurations — the key deliberately excludes them.
#[derive(Default)]
pub struct MetricsCache {
    entries: HashMap<(String, Period), Option<MetricsRecord>>,
}

impl MetricsCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached lookup for `(symbol, period)`, fetching through
    /// the service on a miss.
    pub async fn get_or_fetch<P: MarketDataProvider>(
        &mut self,
        service: &MetricsService<P>,
        symbol: &str,
        period: Period,
    ) -> Option<MetricsRecord> {
        let key = (symbol.to_string(), period);
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let fetched = service.get_metrics(symbol, period).await;
        self.entries.insert(key, fetched.clone());
        fetched
    }
}
