// File: crates/minichart-core/src/style.rs
// Summary: Per-metric line/area styling for mini-chart surfaces.

use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::history::MetricSelector;

/// Visual parameters of one surface's dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceStyle {
    pub border_color: skia::Color,
    pub fill_color: skia::Color,
    /// Fill the area between the line and the bottom edge.
    pub fill: bool,
    /// Bezier tension in `[0, 1]`; `0` draws straight segments.
    pub tension: f32,
    /// Radius of per-sample dots; `0` hides them.
    pub point_radius: f32,
    pub border_width: f32,
}

impl SurfaceStyle {
    pub fn liquidity() -> Self {
        Self {
            border_color: skia::Color::from_argb(255, 0x31, 0x82, 0xce),
            fill_color: skia::Color::from_argb(0x33, 0x31, 0x82, 0xce),
            fill: true,
            tension: 0.1,
            point_radius: 0.0,
            border_width: 1.0,
        }
    }

    pub fn holders() -> Self {
        Self {
            border_color: skia::Color::from_argb(255, 0x80, 0x5a, 0xd5),
            fill_color: skia::Color::from_argb(0x33, 0x80, 0x5a, 0xd5),
            ..Self::liquidity()
        }
    }

    pub fn for_metric(selector: MetricSelector) -> Self {
        match selector {
            MetricSelector::Liquidity => Self::liquidity(),
            MetricSelector::Holders => Self::holders(),
        }
    }

    /// Reject parameters a surface cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(ChartError::Style(format!("border width {} out of range", self.border_width)));
        }
        if !(self.point_radius.is_finite() && self.point_radius >= 0.0) {
            return Err(ChartError::Style(format!("point radius {} out of range", self.point_radius)));
        }
        if !(0.0..=1.0).contains(&self.tension) {
            return Err(ChartError::Style(format!("tension {} outside [0, 1]", self.tension)));
        }
        Ok(())
    }
}

/// Styles for both metrics of a token card.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSet {
    pub liquidity: SurfaceStyle,
    pub holders: SurfaceStyle,
}

impl StyleSet {
    pub fn get(&self, selector: MetricSelector) -> &SurfaceStyle {
        match selector {
            MetricSelector::Liquidity => &self.liquidity,
            MetricSelector::Holders => &self.holders,
        }
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self { liquidity: SurfaceStyle::liquidity(), holders: SurfaceStyle::holders() }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_hex_color(s: &str) -> Result<skia::Color> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    let byte = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| ChartError::Config(format!("invalid color `{s}`")))
    };
    match hex.len() {
        6 => Ok(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => Err(ChartError::Config(format!("invalid color `{s}`"))),
    }
}
