//! Additive risk scoring over a metrics record.

use std::fmt;

use crate::metrics::MetricsRecord;

/// Categorical risk bucket derived from the additive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    /// Score 0-2.
    Low,
    /// Score 3-5.
    Medium,
    /// Score above 5.
    High,
}

impl RiskLevel {
    /// Maps an additive score onto its bucket.
    pub fn from_score(score: i32) -> Self {
        if score <= 2 {
            RiskLevel::Low
        } else if score <= 5 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        })
    }
}

/// Result of the risk rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    /// Sum of the triggered band weights.
    pub risk_score: i32,
    /// Bucket derived from `risk_score`.
    pub risk_level: RiskLevel,
    /// Human-readable triggered factors, in evaluation order.
    pub risk_factors: Vec<&'static str>,
}

/// Evaluates the additive risk bands against one metrics record.
///
/// Within each factor only the highest matching band applies. Factors
/// whose input is unavailable (beta, market cap) contribute nothing. The
/// result is a pure function of the record, monotonically non-decreasing
/// in volatility, drop-from-high, and |beta|.
pub fn assess_risk(metrics: &MetricsRecord) -> RiskAssessment {
    let mut score = 0;
    let mut factors = Vec::new();

    let volatility = metrics.volatility_pct;
    if volatility > 50.0 {
        score += 3;
        factors.push("High volatility (>50%)");
    } else if volatility > 30.0 {
        score += 2;
        factors.push("Moderate volatility (>30%)");
    }

    let drop = metrics.drop_from_high_pct;
    if drop > 50.0 {
        score += 3;
        factors.push("Significant drop from high (>50%)");
    } else if drop > 30.0 {
        score += 2;
        factors.push("Moderate drop from high (>30%)");
    }

    if let Some(beta) = metrics.reference.beta {
        if beta.abs() > 1.5 {
            score += 2;
            factors.push("High beta (>1.5)");
        } else if beta.abs() > 1.2 {
            score += 1;
            factors.push("Above-average beta (>1.2)");
        }
    }

    if let Some(market_cap) = metrics.reference.market_cap {
        if market_cap < 1e9 {
            score += 2;
            factors.push("Small cap stock (<$1B)");
        } else if market_cap < 1e10 {
            score += 1;
            factors.push("Mid cap stock (<$10B)");
        }
    }

    RiskAssessment {
        risk_score: score,
        risk_level: RiskLevel::from_score(score),
        risk_factors: factors,
    }
}

#[cfg(test)]
mod tests {
    use market_data_feed::models::reference::ReferenceData;
    use proptest::prelude::*;

    use crate::{
        indicators::{Momentum, MovingAverages, Stochastic},
        metrics::{IndicatorSnapshot, MetricsRecord},
    };

    use super::*;

    fn metrics_with(
        volatility_pct: f64,
        drop_from_high_pct: f64,
        beta: Option<f64>,
        market_cap: Option<f64>,
    ) -> MetricsRecord {
        MetricsRecord {
            symbol: "TEST".to_string(),
            current_price: 100.0,
            year_high: 120.0,
            year_low: 80.0,
            drop_from_high_pct,
            volatility_pct,
            indicators: IndicatorSnapshot {
                rsi: 50.0,
                macd: None,
                bollinger: None,
                stochastic: Stochastic::NEUTRAL,
                support_resistance: None,
                moving_averages: MovingAverages::default(),
                momentum: Momentum::default(),
            },
            reference: ReferenceData {
                beta,
                market_cap,
                ..ReferenceData::default()
            },
        }
    }

    #[test]
    fn calm_large_cap_is_low_risk() {
        let assessment = assess_risk(&metrics_with(15.0, 5.0, Some(1.0), Some(5e11)));
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.risk_factors.is_empty());
    }

    #[test]
    fn volatile_small_cap_with_unknown_beta_is_medium() {
        // volatility 55% (+3), drop 20% (0), no beta (0), $500M cap (+2)
        let assessment = assess_risk(&metrics_with(55.0, 20.0, None, Some(5e8)));
        assert_eq!(assessment.risk_score, 5);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(
            assessment.risk_factors,
            vec!["High volatility (>50%)", "Small cap stock (<$1B)"]
        );
    }

    #[test]
    fn every_band_triggered_is_high_risk() {
        let assessment = assess_risk(&metrics_with(60.0, 60.0, Some(2.0), Some(5e8)));
        assert_eq!(assessment.risk_score, 10);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.risk_factors.len(), 4);
    }

    #[test]
    fn bands_are_exclusive_within_a_factor() {
        // 40% volatility hits only the moderate band
        let assessment = assess_risk(&metrics_with(40.0, 0.0, None, None));
        assert_eq!(assessment.risk_score, 2);
        assert_eq!(assessment.risk_factors, vec!["Moderate volatility (>30%)"]);
    }

    #[test]
    fn band_edges_are_exclusive() {
        // thresholds are strict: exactly 30/50 do not trigger the bands
        assert_eq!(assess_risk(&metrics_with(30.0, 0.0, None, None)).risk_score, 0);
        assert_eq!(assess_risk(&metrics_with(50.0, 0.0, None, None)).risk_score, 2);
        assert_eq!(assess_risk(&metrics_with(0.0, 30.0, None, None)).risk_score, 0);
        assert_eq!(assess_risk(&metrics_with(0.0, 50.0, None, None)).risk_score, 2);
        assert_eq!(
            assess_risk(&metrics_with(0.0, 0.0, Some(1.2), None)).risk_score,
            0
        );
        assert_eq!(
            assess_risk(&metrics_with(0.0, 0.0, Some(1.5), None)).risk_score,
            1
        );
    }

    #[test]
    fn negative_beta_uses_magnitude() {
        let assessment = assess_risk(&metrics_with(0.0, 0.0, Some(-1.8), None));
        assert_eq!(assessment.risk_score, 2);
        assert_eq!(assessment.risk_factors, vec!["High beta (>1.5)"]);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::High);
    }

    proptest! {
        #[test]
        fn score_is_monotonic_in_each_factor(
            volatility in 0.0f64..100.0,
            drop in 0.0f64..100.0,
            beta in -3.0f64..3.0,
            bump in 0.0f64..50.0,
        ) {
            let base = assess_risk(&metrics_with(volatility, drop, Some(beta), Some(5e10))).risk_score;

            let more_volatile =
                assess_risk(&metrics_with(volatility + bump, drop, Some(beta), Some(5e10))).risk_score;
            prop_assert!(more_volatile >= base);

            let deeper_drop =
                assess_risk(&metrics_with(volatility, drop + bump, Some(beta), Some(5e10))).risk_score;
            prop_assert!(deeper_drop >= base);

            let wilder_beta = beta.signum() * (beta.abs() + bump);
            let higher_beta =
                assess_risk(&metrics_with(volatility, drop, Some(wilder_beta), Some(5e10))).risk_score;
            prop_assert!(higher_beta >= base);
        }
    }
}
