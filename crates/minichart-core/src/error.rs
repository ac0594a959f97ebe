// File: crates/minichart-core/src/error.rs
// Summary: Error taxonomy for normalization, rendering, resizing and configuration.

use thiserror::Error;

/// Errors produced inside the core.
///
/// None of these reach the host through the public lifecycle operations; they
/// are logged and degrade to an empty or absent visual. The `try_*` helpers
/// and the configuration loaders hand them out for callers that want the reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Malformed or absent history input.
    #[error("data error: {0}")]
    Data(String),

    /// Drawing context unavailable or surface construction failed.
    #[error("render error: {0}")]
    Render(String),

    /// Style rejected before construction (negative widths, missing primitives).
    #[error("invalid style: {0}")]
    Style(String),

    /// Size-change capability misbehaved or the new size is unusable.
    #[error("resize error: {0}")]
    Resize(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using [`ChartError`].
pub type Result<T> = std::result::Result<T, ChartError>;
