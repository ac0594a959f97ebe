// File: crates/minichart-core/src/lib.rs
// Summary: Core library entry point; exports normalization, trend estimation and mini-chart lifecycle.

pub mod error;
pub mod history;
pub mod normalize;
pub mod trend;
pub mod axis;
pub mod scale;
pub mod geometry;
pub mod style;
pub mod overlay;
pub mod primitives;
pub mod surface;
pub mod lifecycle;
pub mod raster;
pub mod resize;
pub mod cache;
pub mod widget;
pub mod config;

pub use error::{ChartError, Result};
pub use history::{HistoryPoint, MetricSelector, Sample};
pub use normalize::{normalize, normalize_json, normalize_opt, try_normalize_json};
pub use trend::{estimate_trend, TokenTrends, TrendDirection, TrendEstimator, DEFAULT_TREND_THRESHOLD};
pub use axis::{AxisBounds, AxisPadding};
pub use geometry::PixelSize;
pub use style::{StyleSet, SurfaceStyle};
pub use overlay::TrendOverlay;
pub use primitives::{Primitive, Primitives};
pub use surface::{BuildFailure, ContextProvider, DrawingContext, LiveSurface, SurfaceId, SurfaceSpec};
pub use lifecycle::{ChartLifecycleManager, LifecycleState};
pub use raster::{RasterContainer, RasterContext, RasterProvider, RasterStats, RasterSurface};
pub use resize::{ManualSizeObserver, SizeChangeBridge, SizeObserver, SubscriptionId};
pub use cache::SeriesCache;
pub use widget::MiniChart;
pub use config::{load_config, parse_config, LogFormat, LoggingConfig, MiniChartConfig};
