//! Dispersion measures: annualized volatility and drop from a recent high.

use crate::indicators::{TRADING_DAYS_PER_YEAR, max_value, mean};

/// Annualized volatility of day-over-day percent returns, in percent.
///
/// Sample standard deviation (ddof = 1) of daily returns scaled by √252.
/// Fewer than three closes cannot support a sample deviation of returns and
/// report 0.
pub fn annualized_volatility_pct(closes: &[f64]) -> f64 {
    if closes.len() < 3 {
        return 0.0;
    }

    let returns: Vec<f64> = closes
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();
    let m = mean(&returns);
    let var = returns.iter().map(|r| (r - m).powi(2)).sum::<f64>() / (returns.len() as f64 - 1.0);

    var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}

/// Percent drop of the last close from the highest high in the series.
///
/// Returns 0 for an empty series or a non-positive reference high. The
/// series passed here is typically fetched over a shorter window than the
/// analysis series; the two windows are configured independently.
pub fn drop_from_high_pct(highs: &[f64], closes: &[f64]) -> f64 {
    let (Some(recent_high), Some(current)) = (max_value(highs), closes.last()) else {
        return 0.0;
    };
    if recent_high <= 0.0 {
        return 0.0;
    }
    (recent_high - current) / recent_high * 100.0
}
