// File: crates/minichart-core/src/surface.rs
// Summary: Host-facing seams for drawing contexts and the live surfaces built on them.
// Notes:
// - A surface owns its drawing context for its whole life. `destroy` hands the
//   context back, so a replacement can only be built after the old surface is gone.

use std::fmt;

use crate::axis::AxisBounds;
use crate::error::{ChartError, Result};
use crate::geometry::PixelSize;
use crate::history::Sample;
use crate::style::SurfaceStyle;

/// Identity of one built surface. A new id is minted for every rebuild; resizing keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Everything needed to construct a surface. Interaction (hover, tooltips) is
/// always off for mini-charts and is not part of the request.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceSpec {
    pub id: SurfaceId,
    pub samples: Vec<Sample>,
    pub bounds: AxisBounds,
    pub style: SurfaceStyle,
    pub size: PixelSize,
}

/// Failed construction. `context` is returned when the backend did not consume it.
#[derive(Debug)]
pub struct BuildFailure<C> {
    pub context: Option<C>,
    pub error: ChartError,
}

impl<C> BuildFailure<C> {
    pub fn recoverable(context: C, error: ChartError) -> Self {
        Self { context: Some(context), error }
    }

    pub fn lost(error: ChartError) -> Self {
        Self { context: None, error }
    }
}

/// A drawing context bound to one container; consumed by the surface built on it.
pub trait DrawingContext: Sized {
    type Surface: LiveSurface<Context = Self>;

    fn build(self, spec: SurfaceSpec) -> std::result::Result<Self::Surface, BuildFailure<Self>>;
}

/// A chart currently bound to a container.
pub trait LiveSurface {
    type Context;

    fn id(&self) -> SurfaceId;
    fn samples(&self) -> &[Sample];
    fn bounds(&self) -> AxisBounds;
    fn size(&self) -> PixelSize;

    /// Recompute pixel dimensions; dataset and bounds stay untouched.
    fn resize(&mut self, size: PixelSize) -> Result<()>;

    /// Release every resource except the context, which is returned to the caller.
    fn destroy(self) -> Self::Context;
}

/// Supplies drawing contexts for host containers.
pub trait ContextProvider {
    type Container;
    type Context: DrawingContext;

    /// Fails when the container cannot yield a usable context.
    fn acquire(&mut self, container: &Self::Container) -> Result<Self::Context>;

    /// Current pixel size of `container`.
    fn container_size(&self, container: &Self::Container) -> PixelSize;

    fn release(&mut self, context: Self::Context) {
        drop(context);
    }
}

/// Surface type produced by a provider's contexts.
pub type SurfaceOf<P> = <<P as ContextProvider>::Context as DrawingContext>::Surface;
