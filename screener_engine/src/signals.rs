//! Rule-based trading signals derived from a metrics record.

use std::fmt;

use crate::metrics::MetricsRecord;

/// One triggered rule: the indicator it came from, its human label, and its
/// signed contribution to the aggregate strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    /// Which rule fired (e.g. "RSI Oversold").
    pub indicator: &'static str,
    /// Human reading of the rule (e.g. "Strong Buy").
    pub label: &'static str,
    /// Signed weight, one of -2, -1, 1, 2.
    pub weight: i32,
}

/// Aggregate signal category derived from the summed rule weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallSignal {
    /// Strength >= 3.
    StrongBuy,
    /// Strength 1 or 2.
    Buy,
    /// Strength 0.
    Hold,
    /// Strength -1 or -2.
    Sell,
    /// Strength <= -3.
    StrongSell,
}

impl OverallSignal {
    /// Maps an aggregate strength onto its category.
    ///
    /// Evaluated as an ordered chain: >= 3 strong buy, >= 1 buy, <= -3
    /// strong sell, <= -1 sell, otherwise hold. The order matters only for
    /// readability — the ranges are disjoint.
    pub fn from_strength(strength: i32) -> Self {
        if strength >= 3 {
            OverallSignal::StrongBuy
        } else if strength >= 1 {
            OverallSignal::Buy
        } else if strength <= -3 {
            OverallSignal::StrongSell
        } else if strength <= -1 {
            OverallSignal::Sell
        } else {
            OverallSignal::Hold
        }
    }
}

impl fmt::Display for OverallSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverallSignal::StrongBuy => "Strong Buy",
            OverallSignal::Buy => "Buy",
            OverallSignal::Hold => "Hold",
            OverallSignal::Sell => "Sell",
            OverallSignal::StrongSell => "Strong Sell",
        })
    }
}

/// The triggered rules in evaluation order plus the aggregate reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecord {
    /// Triggered rules in the fixed evaluation order.
    pub signals: Vec<Signal>,
    /// Sum of the triggered rule weights.
    pub signal_strength: i32,
    /// Category derived from `signal_strength`.
    pub overall: OverallSignal,
}

/// Evaluates the fixed signal rule table against one metrics record.
///
/// Rules are evaluated in a fixed order; a rule whose indicator is
/// unavailable for the series is skipped entirely, never defaulted to a
/// neutral comparison. The result is a pure function of the record.
pub fn generate_signals(metrics: &MetricsRecord) -> SignalRecord {
    let mut signals = Vec::new();
    let mut strength = 0;
    let mut push = |signal: Signal| {
        strength += signal.weight;
        signals.push(signal);
    };

    let price = metrics.current_price;

    // RSI bands (always available: too-short series read as neutral 50).
    let rsi = metrics.indicators.rsi;
    if rsi < 30.0 {
        push(Signal {
            indicator: "RSI Oversold",
            label: "Strong Buy",
            weight: 2,
        });
    } else if rsi < 40.0 {
        push(Signal {
            indicator: "RSI Below Neutral",
            label: "Buy",
            weight: 1,
        });
    } else if rsi > 70.0 {
        push(Signal {
            indicator: "RSI Overbought",
            label: "Strong Sell",
            weight: -2,
        });
    } else if rsi > 60.0 {
        push(Signal {
            indicator: "RSI Above Neutral",
            label: "Sell",
            weight: -1,
        });
    }

    // MACD line versus its signal line.
    if let Some(macd) = metrics.indicators.macd {
        if macd.macd > macd.signal && macd.histogram > 0.0 {
            push(Signal {
                indicator: "MACD Bullish",
                label: "Buy",
                weight: 1,
            });
        } else if macd.macd < macd.signal && macd.histogram < 0.0 {
            push(Signal {
                indicator: "MACD Bearish",
                label: "Sell",
                weight: -1,
            });
        }
    }

    // Moving-average crosses need both short MAs defined.
    let mas = metrics.indicators.moving_averages;
    if let (Some(ma20), Some(ma50)) = (mas.ma20, mas.ma50) {
        if price > ma20 && ma20 > ma50 {
            push(Signal {
                indicator: "Golden Cross (20/50)",
                label: "Strong Buy",
                weight: 2,
            });
        } else if price < ma20 && ma20 < ma50 {
            push(Signal {
                indicator: "Death Cross (20/50)",
                label: "Strong Sell",
                weight: -2,
            });
        }
    }
    if let Some(ma200) = mas.ma200 {
        if price > ma200 {
            push(Signal {
                indicator: "Above 200 MA",
                label: "Bullish",
                weight: 1,
            });
        } else {
            push(Signal {
                indicator: "Below 200 MA",
                label: "Bearish",
                weight: -1,
            });
        }
    }

    // Bollinger band breaches.
    if let Some(bands) = metrics.indicators.bollinger {
        if price < bands.lower {
            push(Signal {
                indicator: "Below Lower BB",
                label: "Oversold",
                weight: 1,
            });
        } else if price > bands.upper {
            push(Signal {
                indicator: "Above Upper BB",
                label: "Overbought",
                weight: -1,
            });
        }
    }

    // Stochastic extremes (neutral 50/50 default never triggers either).
    let stoch = metrics.indicators.stochastic;
    if stoch.k < 20.0 && stoch.d < 20.0 {
        push(Signal {
            indicator: "Stochastic Oversold",
            label: "Buy",
            weight: 1,
        });
    } else if stoch.k > 80.0 && stoch.d > 80.0 {
        push(Signal {
            indicator: "Stochastic Overbought",
            label: "Sell",
            weight: -1,
        });
    }

    SignalRecord {
        signals,
        signal_strength: strength,
        overall: OverallSignal::from_strength(strength),
    }
}
