// File: crates/minichart-core/src/trend.rs
// Summary: Least-squares trend classification of a sample series (up/down/stagnant).

use serde::{Deserialize, Serialize};

use crate::history::{HistoryPoint, MetricSelector, Sample};
use crate::normalize::normalize;

/// Slope magnitude below which a series counts as flat.
///
/// The threshold is absolute, so it means very different things for holder
/// counts in the hundreds and liquidity in the millions.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stagnant,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stagnant => "stagnant",
        }
    }
}

/// Classifies a series by the OLS slope of `y` against sample index.
///
/// Index rather than timestamp is the regressor, so uneven spacing between
/// snapshots does not distort the slope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendEstimator {
    pub threshold: f64,
}

impl Default for TrendEstimator {
    fn default() -> Self {
        Self { threshold: DEFAULT_TREND_THRESHOLD }
    }
}

impl TrendEstimator {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold: threshold.abs() }
    }

    /// Slope of `y` over indices `0..n`, or `None` for fewer than two samples.
    pub fn slope(&self, samples: &[Sample]) -> Option<f64> {
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let mean_i = (n - 1) as f64 / 2.0;
        let mean_y = samples.iter().map(|s| s.y).sum::<f64>() / n as f64;
        let (num, den) = samples.iter().enumerate().fold((0.0f64, 0.0f64), |(num, den), (i, s)| {
            let di = i as f64 - mean_i;
            (num + di * (s.y - mean_y), den + di * di)
        });
        // Unreachable with distinct indices; kept so a degenerate input reads as flat.
        if den == 0.0 {
            return Some(0.0);
        }
        Some(num / den)
    }

    pub fn classify(&self, samples: &[Sample]) -> TrendDirection {
        match self.slope(samples) {
            Some(slope) if slope.is_finite() => {
                if slope.abs() < self.threshold {
                    TrendDirection::Stagnant
                } else if slope > 0.0 {
                    TrendDirection::Up
                } else {
                    TrendDirection::Down
                }
            }
            Some(slope) => {
                tracing::debug!(slope, "non-finite slope classified as stagnant");
                TrendDirection::Stagnant
            }
            None => TrendDirection::Stagnant,
        }
    }
}

/// Classify with the default threshold.
pub fn estimate_trend(samples: &[Sample]) -> TrendDirection {
    TrendEstimator::default().classify(samples)
}

/// Both trends a token card shows, computed from one history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTrends {
    pub liquidity: TrendDirection,
    pub holders: TrendDirection,
}

impl TokenTrends {
    pub fn from_history(history: &[HistoryPoint], estimator: &TrendEstimator) -> Self {
        let of = |selector| estimator.classify(&normalize(history, selector));
        Self {
            liquidity: of(MetricSelector::Liquidity),
            holders: of(MetricSelector::Holders),
        }
    }

    pub fn get(&self, selector: MetricSelector) -> TrendDirection {
        match selector {
            MetricSelector::Liquidity => self.liquidity,
            MetricSelector::Holders => self.holders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(ys: &[f64]) -> Vec<Sample> {
        ys.iter().enumerate().map(|(i, &y)| Sample::new(i as i64, y)).collect()
    }

    #[test]
    fn slope_matches_hand_computation() {
        // y = 2i + 1 exactly
        let s = series(&[1.0, 3.0, 5.0, 7.0]);
        let slope = TrendEstimator::default().slope(&s).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn index_not_time_drives_slope() {
        let s = vec![Sample::new(0, 1.0), Sample::new(1, 2.0), Sample::new(1_000, 3.0)];
        let slope = TrendEstimator::default().slope(&s).unwrap();
        assert!((slope - 1.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let est = TrendEstimator::with_threshold(1.0);
        assert_eq!(est.classify(&series(&[0.0, 1.0])), TrendDirection::Up);
        assert_eq!(est.classify(&series(&[1.0, 0.0])), TrendDirection::Down);
        assert_eq!(est.classify(&series(&[0.0, 0.5])), TrendDirection::Stagnant);
    }

    #[test]
    fn nan_reads_as_stagnant() {
        assert_eq!(estimate_trend(&series(&[1.0, f64::NAN, 3.0])), TrendDirection::Stagnant);
    }

    #[test]
    fn token_trends_split_by_metric() {
        let h = vec![
            HistoryPoint::new(3000, 10.0, 100),
            HistoryPoint::new(1000, 30.0, 100),
            HistoryPoint::new(2000, 20.0, 100),
        ];
        let t = TokenTrends::from_history(&h, &TrendEstimator::default());
        assert_eq!(t.liquidity, TrendDirection::Down);
        assert_eq!(t.holders, TrendDirection::Stagnant);
        assert_eq!(t.get(MetricSelector::Liquidity), TrendDirection::Down);
    }
}
