// File: crates/minichart-core/src/primitives.rs
// Summary: Explicit registration of the drawing primitives surfaces may use.
// Notes:
// - The composition root calls `Primitives::register` (or `standard`) once and
//   hands the result to every lifecycle manager. Nothing here is global.

use crate::error::{ChartError, Result};
use crate::style::SurfaceStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    LinearScale,
    TimeScale,
    Point,
    Line,
    Filler,
    Tooltip,
}

impl Primitive {
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::LinearScale => "linear-scale",
            Primitive::TimeScale => "time-scale",
            Primitive::Point => "point",
            Primitive::Line => "line",
            Primitive::Filler => "filler",
            Primitive::Tooltip => "tooltip",
        }
    }
}

/// Set of registered primitives; only obtainable through registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Primitives {
    bits: u8,
}

impl Primitives {
    pub fn register(list: &[Primitive]) -> Self {
        let bits = list.iter().fold(0u8, |acc, p| acc | p.bit());
        tracing::debug!(count = list.len(), "registered chart primitives");
        Self { bits }
    }

    /// Everything a mini-chart needs.
    pub fn standard() -> Self {
        Self::register(&[
            Primitive::LinearScale,
            Primitive::TimeScale,
            Primitive::Point,
            Primitive::Line,
            Primitive::Filler,
            Primitive::Tooltip,
        ])
    }

    pub fn contains(&self, p: Primitive) -> bool {
        self.bits & p.bit() != 0
    }

    /// Ensure every primitive `style` draws with is registered.
    pub fn check(&self, style: &SurfaceStyle) -> Result<()> {
        let mut needed = vec![Primitive::LinearScale, Primitive::TimeScale, Primitive::Line];
        if style.fill {
            needed.push(Primitive::Filler);
        }
        if style.point_radius > 0.0 {
            needed.push(Primitive::Point);
        }
        match needed.into_iter().find(|p| !self.contains(*p)) {
            Some(missing) => Err(ChartError::Style(format!("primitive `{}` not registered", missing.name()))),
            None => Ok(()),
        }
    }
}
