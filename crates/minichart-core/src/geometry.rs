// File: crates/minichart-core/src/geometry.rs
// Summary: Pixel dimensions of a chart container.

use serde::{Deserialize, Serialize};

/// Default container width in pixels.
pub const DEFAULT_WIDTH: u32 = 160;
/// Default container height in pixels (a token card's chart strip).
pub const DEFAULT_HEIGHT: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area container cannot back a drawing surface.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(crate) fn as_skia(&self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}

impl Default for PixelSize {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
