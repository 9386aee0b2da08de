//! Price-level indicators: Bollinger bands and support/resistance.

use std::num::NonZeroUsize;

use crate::indicators::{max_value, min_value, rolling_std_last, sma_last};

/// Bollinger band snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bollinger {
    /// SMA plus `mult` standard deviations.
    pub upper: f64,
    /// The rolling SMA itself.
    pub middle: f64,
    /// SMA minus `mult` standard deviations.
    pub lower: f64,
}

/// Bollinger bands over a rolling `window` with a `mult`-deviation width.
///
/// Returns `None` when fewer than `window` closes exist (or the window
/// cannot support a sample deviation), so band rules are skipped rather
/// than evaluated against zero-width bands.
pub fn bollinger_bands(closes: &[f64], window: NonZeroUsize, mult: f64) -> Option<Bollinger> {
    let middle = sma_last(closes, window)?;
    let std = rolling_std_last(closes, window)?;
    Some(Bollinger {
        upper: middle + mult * std,
        middle,
        lower: middle - mult * std,
    })
}

/// Nearest support/resistance levels and their distance from the last close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportResistance {
    /// Largest rolling-low level below the current price.
    pub support: f64,
    /// Smallest rolling-high level above the current price.
    pub resistance: f64,
    /// Percent of current price between support and current price.
    pub support_distance_pct: f64,
    /// Percent of current price between current price and resistance.
    pub resistance_distance_pct: f64,
}

/// Nearest support and resistance from rolling extremes over `window`.
///
/// Candidate resistance levels are every rolling `window`-session high
/// across the series; the reported resistance is the smallest one above the
/// last close, falling back to 110% of the close when the series never
/// traded higher. Support mirrors that with rolling lows and a 90% fallback.
/// Returns `None` for an empty series (no current price to anchor on).
pub fn support_resistance(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    window: NonZeroUsize,
) -> Option<SupportResistance> {
    let current = *closes.last()?;
    let w = window.get();

    // windows(w) yields nothing when the series is shorter than the window,
    // which leaves the fallback levels in place.
    let resistance = highs
        .windows(w)
        .filter_map(max_value)
        .filter(|level| *level > current)
        .reduce(f64::min)
        .unwrap_or(current * 1.10);

    let support = lows
        .windows(w)
        .filter_map(min_value)
        .filter(|level| *level < current)
        .reduce(f64::max)
        .unwrap_or(current * 0.90);

    Some(SupportResistance {
        support,
        resistance,
        support_distance_pct: (current - support) / current * 100.0,
        resistance_distance_pct: (resistance - current) / current * 100.0,
    })
}
