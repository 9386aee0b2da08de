//! Stateless indicator math over daily price columns.
//!
//! Every function here is a pure transform of its input slices and is
//! independently callable. Series that are too short for an indicator's
//! lookback window degrade to that indicator's documented neutral default
//! (or `None` where the scoring layer must skip the indicator entirely);
//! nothing in this module returns an error for a data condition.
//!
//! Rolling means are plain arithmetic means over the trailing window and the
//! rolling standard deviation is the sample deviation (ddof = 1), matching
//! the upstream dashboard's numbers. RSI deliberately uses the simple
//! rolling mean of gains/losses rather than Wilder's smoothing; see
//! [`oscillators::rsi`].

pub mod levels;
pub mod oscillators;
pub mod trend;
pub mod volatility;

pub use levels::{Bollinger, SupportResistance, bollinger_bands, support_resistance};
pub use oscillators::{Stochastic, rsi, stochastic};
pub use trend::{
    Macd, Momentum, MovingAverages, macd, momentum, momentum_snapshot, moving_averages,
};
pub use volatility::{annualized_volatility_pct, drop_from_high_pct};

use std::num::NonZeroUsize;

/// Trading sessions per year, used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default RSI lookback window.
pub const DEFAULT_RSI_WINDOW: NonZeroUsize = NonZeroUsize::new(14).unwrap();

/// Bollinger band lookback window.
pub const BOLLINGER_WINDOW: NonZeroUsize = NonZeroUsize::new(20).unwrap();

/// Bollinger band width in standard deviations.
pub const BOLLINGER_STD_MULT: f64 = 2.0;

/// Stochastic %K lookback window.
pub const STOCHASTIC_K_WINDOW: NonZeroUsize = NonZeroUsize::new(14).unwrap();

/// Stochastic %D smoothing window over %K.
pub const STOCHASTIC_D_WINDOW: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Support/resistance rolling extreme window.
pub const SUPPORT_RESISTANCE_WINDOW: NonZeroUsize = NonZeroUsize::new(20).unwrap();

/// MACD fast EMA span.
pub const MACD_FAST_SPAN: NonZeroUsize = NonZeroUsize::new(12).unwrap();

/// MACD slow EMA span.
pub const MACD_SLOW_SPAN: NonZeroUsize = NonZeroUsize::new(26).unwrap();

/// MACD signal-line EMA span.
pub const MACD_SIGNAL_SPAN: NonZeroUsize = NonZeroUsize::new(9).unwrap();

pub(crate) fn mean(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty());
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean of the trailing `window` values, `None` when the slice is
/// shorter than the window.
pub(crate) fn sma_last(values: &[f64], window: NonZeroUsize) -> Option<f64> {
    let w = window.get();
    if values.len() < w {
        return None;
    }
    Some(mean(&values[values.len() - w..]))
}

/// Sample standard deviation (ddof = 1) of the trailing `window` values.
///
/// `None` when the slice is shorter than the window or the window cannot
/// support a sample deviation (< 2).
pub(crate) fn rolling_std_last(values: &[f64], window: NonZeroUsize) -> Option<f64> {
    let w = window.get();
    if w < 2 || values.len() < w {
        return None;
    }
    let tail = &values[values.len() - w..];
    let m = mean(tail);
    let var = tail.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (w as f64 - 1.0);
    Some(var.sqrt())
}

/// Exponential weighted mean with span semantics, one output per input.
///
/// This is the adjusted form (weights normalized over the points seen so
/// far), so early values are unbiased instead of anchored at the first
/// sample. `alpha = 2 / (span + 1)`.
pub(crate) fn ewm_mean(values: &[f64], span: NonZeroUsize) -> Vec<f64> {
    let alpha = 2.0 / (span.get() as f64 + 1.0);
    let decay = 1.0 - alpha;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    values
        .iter()
        .map(|&x| {
            numerator = x + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

pub(crate) fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub(crate) fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}
