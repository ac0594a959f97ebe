// File: crates/minichart-core/src/config.rs
// Summary: JSON5 configuration for trend threshold, axis padding, styles, container size and logging.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axis::AxisPadding;
use crate::error::{ChartError, Result};
use crate::geometry::PixelSize;
use crate::history::MetricSelector;
use crate::style::{parse_hex_color, StyleSet, SurfaceStyle};
use crate::trend::{TrendEstimator, DEFAULT_TREND_THRESHOLD};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

/// Style overrides for one metric; unset colors fall back to the metric's palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default = "default_fill")]
    pub fill: bool,
    #[serde(default = "default_tension")]
    pub tension: f32,
    #[serde(default)]
    pub point_radius: f32,
    #[serde(default = "default_border_width")]
    pub border_width: f32,
}

fn default_fill() -> bool {
    true
}

fn default_tension() -> f32 {
    0.1
}

fn default_border_width() -> f32 {
    1.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            border_color: None,
            fill_color: None,
            fill: default_fill(),
            tension: default_tension(),
            point_radius: 0.0,
            border_width: default_border_width(),
        }
    }
}

impl StyleConfig {
    pub fn resolve(&self, selector: MetricSelector) -> Result<SurfaceStyle> {
        let base = SurfaceStyle::for_metric(selector);
        let style = SurfaceStyle {
            border_color: match &self.border_color {
                Some(c) => parse_hex_color(c)?,
                None => base.border_color,
            },
            fill_color: match &self.fill_color {
                Some(c) => parse_hex_color(c)?,
                None => base.fill_color,
            },
            fill: self.fill,
            tension: self.tension,
            point_radius: self.point_radius,
            border_width: self.border_width,
        };
        style
            .validate()
            .map_err(|e| ChartError::Config(format!("{} style: {e}", selector.label())))?;
        Ok(style)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default)]
    pub liquidity: StyleConfig,
    #[serde(default)]
    pub holders: StyleConfig,
}

/// Top-level mini-chart configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniChartConfig {
    /// Slope magnitude below which a series is stagnant.
    #[serde(default = "default_threshold")]
    pub trend_threshold: f64,

    #[serde(default)]
    pub axis_padding: AxisPadding,

    #[serde(default)]
    pub styles: StylesConfig,

    /// Initial container size for hosts that create their own containers.
    #[serde(default)]
    pub container: PixelSize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_threshold() -> f64 {
    DEFAULT_TREND_THRESHOLD
}

impl Default for MiniChartConfig {
    fn default() -> Self {
        Self {
            trend_threshold: default_threshold(),
            axis_padding: AxisPadding::default(),
            styles: StylesConfig::default(),
            container: PixelSize::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MiniChartConfig {
    pub fn estimator(&self) -> TrendEstimator {
        TrendEstimator::with_threshold(self.trend_threshold)
    }

    pub fn style_set(&self) -> Result<StyleSet> {
        Ok(StyleSet {
            liquidity: self.styles.liquidity.resolve(MetricSelector::Liquidity)?,
            holders: self.styles.holders.resolve(MetricSelector::Holders)?,
        })
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        ChartError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
    })?;

    json5::from_str(&content).map_err(|e| {
        ChartError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| ChartError::Config(format!("Failed to parse config: {}", e)))
}
