// File: crates/minichart-core/src/history.rs
// Summary: Data model for metric history points, plot samples and metric selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped observation of a token's tracked metrics, as delivered by the feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub total_liquidity: f64,
    pub holder_count: i64,
}

impl HistoryPoint {
    pub const fn new(timestamp: i64, total_liquidity: f64, holder_count: i64) -> Self {
        Self { timestamp, total_liquidity, holder_count }
    }

    /// Value of the metric picked by `selector`.
    #[inline]
    pub fn metric(&self, selector: MetricSelector) -> f64 {
        match selector {
            MetricSelector::Liquidity => self.total_liquidity,
            MetricSelector::Holders => self.holder_count as f64,
        }
    }
}

/// Which history field becomes the plotted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricSelector {
    Liquidity,
    Holders,
}

impl MetricSelector {
    /// Both metrics, in the order a token card lays its charts out.
    pub const ALL: [MetricSelector; 2] = [MetricSelector::Holders, MetricSelector::Liquidity];

    pub fn label(&self) -> &'static str {
        match self {
            MetricSelector::Liquidity => "liquidity",
            MetricSelector::Holders => "holders",
        }
    }

    /// JSON field name carrying this metric in the feed payload.
    pub(crate) fn field_name(&self) -> &'static str {
        match self {
            MetricSelector::Liquidity => "totalLiquidity",
            MetricSelector::Holders => "holderCount",
        }
    }
}

/// A plot sample: whole seconds on X, metric value on Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: i64,
    pub y: f64,
}

impl Sample {
    pub const fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }

    /// Wall-clock time of the sample, if `x` is in chrono's representable range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.x, 0)
    }
}
