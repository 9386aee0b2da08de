//! Trend indicators: MACD, simple moving averages, and price momentum.

use std::num::NonZeroUsize;

use crate::indicators::{ewm_mean, sma_last};

/// MACD snapshot: the MACD line, its signal line, and their difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    /// Fast EMA minus slow EMA.
    pub macd: f64,
    /// EMA of the MACD line.
    pub signal: f64,
    /// MACD line minus signal line.
    pub histogram: f64,
}

/// Moving Average Convergence Divergence with EMA spans
/// `fast`/`slow`/`signal`.
///
/// Returns the last value of each line; `None` for an empty series (the
/// EMAs are defined from the first close onward, so any non-empty series
/// produces a snapshot).
pub fn macd(
    closes: &[f64],
    fast: NonZeroUsize,
    slow: NonZeroUsize,
    signal: NonZeroUsize,
) -> Option<Macd> {
    if closes.is_empty() {
        return None;
    }

    let ema_fast = ewm_mean(closes, fast);
    let ema_slow = ewm_mean(closes, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ewm_mean(&line, signal);

    let macd_last = *line.last()?;
    let signal_last = *signal_line.last()?;
    Some(Macd {
        macd: macd_last,
        signal: signal_last,
        histogram: macd_last - signal_last,
    })
}

/// Last values of the 20/50/200-session simple moving averages.
///
/// A window longer than the series is reported as `None` (unavailable), so
/// the scoring layer can skip the associated rules instead of comparing
/// against a fabricated zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovingAverages {
    /// 20-session SMA.
    pub ma20: Option<f64>,
    /// 50-session SMA.
    pub ma50: Option<f64>,
    /// 200-session SMA.
    pub ma200: Option<f64>,
}

const MA_SHORT: NonZeroUsize = NonZeroUsize::new(20).unwrap();
const MA_MEDIUM: NonZeroUsize = NonZeroUsize::new(50).unwrap();
const MA_LONG: NonZeroUsize = NonZeroUsize::new(200).unwrap();

/// Computes the 20/50/200-session SMA snapshot.
pub fn moving_averages(closes: &[f64]) -> MovingAverages {
    MovingAverages {
        ma20: sma_last(closes, MA_SHORT),
        ma50: sma_last(closes, MA_MEDIUM),
        ma200: sma_last(closes, MA_LONG),
    }
}

/// Percent change between the last close and the close `lookback` sessions
/// earlier. Returns 0 when fewer than `lookback + 1` sessions exist.
pub fn momentum(closes: &[f64], lookback: NonZeroUsize) -> f64 {
    let lb = lookback.get();
    if closes.len() < lb + 1 {
        return 0.0;
    }
    let current = closes[closes.len() - 1];
    let past = closes[closes.len() - 1 - lb];
    (current / past - 1.0) * 100.0
}

/// Momentum over the standard 1/3/6-month session lookbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Momentum {
    /// Percent change over ~22 trading sessions.
    pub one_month_pct: f64,
    /// Percent change over ~66 trading sessions.
    pub three_month_pct: f64,
    /// Percent change over ~126 trading sessions.
    pub six_month_pct: f64,
}

const ONE_MONTH_SESSIONS: NonZeroUsize = NonZeroUsize::new(22).unwrap();
const THREE_MONTH_SESSIONS: NonZeroUsize = NonZeroUsize::new(66).unwrap();
const SIX_MONTH_SESSIONS: NonZeroUsize = NonZeroUsize::new(126).unwrap();

/// Computes the 1/3/6-month momentum snapshot.
pub fn momentum_snapshot(closes: &[f64]) -> Momentum {
    Momentum {
        one_month_pct: momentum(closes, ONE_MONTH_SESSIONS),
        three_month_pct: momentum(closes, THREE_MONTH_SESSIONS),
        six_month_pct: momentum(closes, SIX_MONTH_SESSIONS),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use crate::indicators::{MACD_FAST_SPAN, MACD_SIGNAL_SPAN, MACD_SLOW_SPAN};

    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn macd_of_empty_series_is_unavailable() {
        assert_eq!(macd(&[], MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN), None);
    }

    #[test]
    fn macd_of_flat_series_is_zero() {
        let closes = [42.0; 40];
        let m = macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN).unwrap();
        assert!(m.macd.abs() < 1e-9);
        assert!(m.signal.abs() < 1e-9);
        assert!(m.histogram.abs() < 1e-9);
    }

    #[test]
    fn macd_of_rising_series_is_bullish() {
        // fast EMA sits above slow EMA in a steady uptrend
        let closes: Vec<f64> = (1..=60).map(|i| 100.0 + i as f64).collect();
        let m = macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN).unwrap();
        assert!(m.macd > 0.0);
    }

    #[test]
    fn moving_averages_report_unavailable_windows() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        let mas = moving_averages(&closes);
        // mean of 6..=25
        assert_eq!(mas.ma20, Some(15.5));
        assert_eq!(mas.ma50, None);
        assert_eq!(mas.ma200, None);
    }

    #[test]
    fn momentum_matches_hand_computed_change() {
        let value = momentum(&[100.0, 110.0, 121.0], nz(2));
        assert!((value - 21.0).abs() < 1e-12);
    }

    #[test]
    fn momentum_of_short_series_is_zero() {
        assert_eq!(momentum(&[100.0, 110.0], nz(2)), 0.0);
        assert_eq!(momentum(&[], nz(22)), 0.0);
    }

    #[test]
    fn momentum_snapshot_degrades_per_lookback() {
        // 30 sessions: 1-month momentum defined, 3/6-month default to zero
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let m = momentum_snapshot(&closes);
        assert!(m.one_month_pct > 0.0);
        assert_eq!(m.three_month_pct, 0.0);
        assert_eq!(m.six_month_pct, 0.0);
    }
}
