// File: crates/minichart-core/src/axis.rs
// Summary: Y-axis bounds derived from a sample set with multiplicative padding.

use serde::{Deserialize, Serialize};

use crate::history::Sample;

/// Multiplicative padding applied to the smallest and largest value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisPadding {
    #[serde(default = "default_lower")]
    pub lower: f64,
    #[serde(default = "default_upper")]
    pub upper: f64,
}

fn default_lower() -> f64 {
    0.95
}

fn default_upper() -> f64 {
    1.05
}

impl Default for AxisPadding {
    fn default() -> Self {
        Self { lower: default_lower(), upper: default_upper() }
    }
}

/// Value range of a surface's hidden Y axis.
/// Contract: rebuilt from scratch for every dataset; never nudged in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[min(y) * lower, max(y) * upper]`, or `None` for an empty set.
    pub fn from_samples(samples: &[Sample], padding: AxisPadding) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in samples {
            y_min = y_min.min(s.y);
            y_max = y_max.max(s.y);
        }
        Some(Self::new(y_min * padding.lower, y_max * padding.upper))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.min && y <= self.max
    }
}

/// First and last `x` of an ascending series.
pub fn time_extent(samples: &[Sample]) -> Option<(i64, i64)> {
    Some((samples.first()?.x, samples.last()?.x))
}
