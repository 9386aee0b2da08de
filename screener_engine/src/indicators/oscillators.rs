//! Bounded oscillators: RSI and the stochastic oscillator.

use std::num::NonZeroUsize;

use crate::indicators::{max_value, mean, min_value};

/// The RSI value reported when the series cannot support the window.
pub const NEUTRAL_RSI: f64 = 50.0;

/// The %K/%D value reported when the series cannot support the windows.
pub const NEUTRAL_STOCHASTIC: f64 = 50.0;

/// Relative Strength Index over a trailing `window` of price deltas.
///
/// Average gain and average loss are simple rolling means of the positive
/// and negative deltas (not Wilder's exponential smoothing — kept for
/// compatibility with the upstream dashboard's numbers).
/// `RSI = 100 - 100/(1 + avg_gain/avg_loss)`.
///
/// Fewer than `window + 1` closes returns [`NEUTRAL_RSI`]. A window with no
/// losses has unbounded relative strength and returns 100.
pub fn rsi(closes: &[f64], window: NonZeroUsize) -> f64 {
    let w = window.get();
    if closes.len() < w + 1 {
        return NEUTRAL_RSI;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let tail = &deltas[deltas.len() - w..];

    let avg_gain = tail.iter().filter(|d| **d > 0.0).sum::<f64>() / w as f64;
    let avg_loss = -tail.iter().filter(|d| **d < 0.0).sum::<f64>() / w as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Stochastic oscillator snapshot: %K and its %D smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stochastic {
    /// %K, 0-100.
    pub k: f64,
    /// %D, the rolling mean of %K over the smoothing window, 0-100.
    pub d: f64,
}

impl Stochastic {
    /// The neutral snapshot for series too short to compute %K and %D.
    pub const NEUTRAL: Stochastic = Stochastic {
        k: NEUTRAL_STOCHASTIC,
        d: NEUTRAL_STOCHASTIC,
    };
}

/// Stochastic oscillator over `k_window` highs/lows with a `d_window` %D.
///
/// `%K = 100 * (close - min(low)) / (max(high) - min(low))` over the
/// trailing `k_window`; `%D` is the mean of the last `d_window` %K values.
/// Returns [`Stochastic::NEUTRAL`] when fewer than `k_window + d_window - 1`
/// sessions exist. A window where every session traded at one price has no
/// range, so its %K is reported as the neutral 50.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_window: NonZeroUsize,
    d_window: NonZeroUsize,
) -> Stochastic {
    let kw = k_window.get();
    let dw = d_window.get();
    let n = closes.len().min(highs.len()).min(lows.len());
    if n < kw + dw - 1 {
        return Stochastic::NEUTRAL;
    }

    let k_at = |i: usize| {
        let lowest = min_value(&lows[i + 1 - kw..=i]).unwrap_or(NEUTRAL_STOCHASTIC);
        let highest = max_value(&highs[i + 1 - kw..=i]).unwrap_or(NEUTRAL_STOCHASTIC);
        let range = highest - lowest;
        if range == 0.0 {
            NEUTRAL_STOCHASTIC
        } else {
            100.0 * (closes[i] - lowest) / range
        }
    };

    let k_tail: Vec<f64> = (n - dw..n).map(k_at).collect();
    Stochastic {
        k: k_tail[dw - 1],
        d: mean(&k_tail),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use proptest::prelude::*;

    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn short_series_returns_neutral_rsi() {
        // 5 closes against a 14-session window
        let closes = [10.0, 12.0, 11.0, 13.0, 20.0];
        assert_eq!(rsi(&closes, nz(14)), NEUTRAL_RSI);
        assert_eq!(rsi(&[], nz(14)), NEUTRAL_RSI);
    }

    #[test]
    fn all_gains_saturate_at_100() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(rsi(&closes, nz(14)), 100.0);
    }

    #[test]
    fn flat_series_has_no_losses() {
        let closes = [10.0; 20];
        assert_eq!(rsi(&closes, nz(14)), 100.0);
    }

    #[test]
    fn rsi_matches_hand_computed_window() {
        // window 2 over deltas [+2, -1]: avg_gain 1.0, avg_loss 0.5, RS 2
        let value = rsi(&[10.0, 12.0, 11.0], nz(2));
        assert!((value - (100.0 - 100.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn rsi_uses_only_the_trailing_window() {
        // the huge early gain falls outside the 2-delta window
        let value = rsi(&[1.0, 100.0, 100.0, 99.0, 98.0], nz(2));
        assert_eq!(value, 0.0);
    }

    #[test]
    fn stochastic_short_series_is_neutral() {
        let s = stochastic(&[10.0], &[8.0], &[9.0], nz(14), nz(3));
        assert_eq!(s, Stochastic::NEUTRAL);
    }

    #[test]
    fn stochastic_matches_hand_computed_window() {
        let highs = [10.0, 11.0, 12.0];
        let lows = [8.0, 9.0, 10.0];
        let closes = [9.0, 10.0, 11.5];
        // %K = 100*(11.5-8)/(12-8) = 87.5, %D over a 1-session window = %K
        let s = stochastic(&highs, &lows, &closes, nz(3), nz(1));
        assert!((s.k - 87.5).abs() < 1e-12);
        assert!((s.d - 87.5).abs() < 1e-12);
    }

    #[test]
    fn flat_window_reports_neutral_k() {
        let s = stochastic(&[5.0; 4], &[5.0; 4], &[5.0; 4], nz(3), nz(2));
        assert_eq!(s.k, NEUTRAL_STOCHASTIC);
        assert_eq!(s.d, NEUTRAL_STOCHASTIC);
    }

    proptest! {
        #[test]
        fn rsi_stays_within_bounds(closes in prop::collection::vec(0.01f64..10_000.0, 15..60)) {
            let value = rsi(&closes, nz(14));
            prop_assert!((0.0..=100.0).contains(&value));
        }

        #[test]
        fn stochastic_stays_within_bounds(
            sessions in prop::collection::vec((0.01f64..1_000.0, 0.0f64..1.0, 0.0f64..1.0), 17..50)
        ) {
            // build consistent OHLC rows: low <= close <= high
            let highs: Vec<f64> = sessions.iter().map(|(base, spread, _)| base + spread).collect();
            let lows: Vec<f64> = sessions.iter().map(|(base, _, _)| *base).collect();
            let closes: Vec<f64> = sessions
                .iter()
                .map(|(base, spread, frac)| base + spread * frac)
                .collect();

            let s = stochastic(&highs, &lows, &closes, nz(14), nz(3));
            prop_assert!((0.0..=100.0).contains(&s.k));
            prop_assert!((0.0..=100.0).contains(&s.d));
        }
    }
}
