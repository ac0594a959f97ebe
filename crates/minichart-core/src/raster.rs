// File: crates/minichart-core/src/raster.rs
// Summary: Headless drawing backend on Skia CPU raster surfaces (containers, contexts, surfaces).

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use skia_safe as skia;

use crate::axis::{time_extent, AxisBounds};
use crate::error::{ChartError, Result};
use crate::geometry::PixelSize;
use crate::history::Sample;
use crate::overlay::TrendOverlay;
use crate::scale::LinearScale;
use crate::style::SurfaceStyle;
use crate::surface::{BuildFailure, ContextProvider, DrawingContext, LiveSurface, SurfaceId, SurfaceSpec};

// ---- containers ---------------------------------------------------------------

struct ContainerState {
    label: String,
    size: Cell<PixelSize>,
    has_canvas: bool,
    // Set while a context is out; a canvas hosts one chart at a time.
    in_use: Cell<bool>,
}

/// Host-side handle to a chart slot. Clones share the same slot; the host
/// changes its size with [`RasterContainer::set_size`].
#[derive(Clone)]
pub struct RasterContainer {
    inner: Rc<ContainerState>,
}

impl RasterContainer {
    pub fn new(label: impl Into<String>, size: PixelSize) -> Self {
        Self::build(label.into(), size, true)
    }

    /// A container with no drawable canvas; acquiring a context from it fails.
    pub fn without_canvas(label: impl Into<String>, size: PixelSize) -> Self {
        Self::build(label.into(), size, false)
    }

    fn build(label: String, size: PixelSize, has_canvas: bool) -> Self {
        Self { inner: Rc::new(ContainerState { label, size: Cell::new(size), has_canvas, in_use: Cell::new(false) }) }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn size(&self) -> PixelSize {
        self.inner.size.get()
    }

    pub fn set_size(&self, size: PixelSize) {
        self.inner.size.set(size);
    }

    /// Whether a drawing context is currently held on this slot.
    pub fn in_use(&self) -> bool {
        self.inner.in_use.get()
    }

    /// Whether both handles refer to the same slot.
    pub fn same_as(&self, other: &RasterContainer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RasterContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterContainer")
            .field("label", &self.inner.label)
            .field("size", &self.size())
            .field("has_canvas", &self.inner.has_canvas)
            .field("in_use", &self.inner.in_use.get())
            .finish()
    }
}

// ---- resource accounting -------------------------------------------------------

/// Live resource counters shared by a provider and everything it hands out.
#[derive(Debug, Default)]
pub struct RasterStats {
    contexts: Cell<usize>,
    surfaces: Cell<usize>,
    built: Cell<u64>,
}

impl RasterStats {
    /// Contexts acquired and not yet dropped.
    pub fn held_contexts(&self) -> usize {
        self.contexts.get()
    }

    /// Surfaces built and not yet destroyed.
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.get()
    }

    /// Surfaces built over the provider's lifetime.
    pub fn surfaces_built(&self) -> u64 {
        self.built.get()
    }
}

struct LiveGuard(Rc<RasterStats>);

impl LiveGuard {
    fn new(stats: Rc<RasterStats>) -> Self {
        stats.surfaces.set(stats.surfaces.get() + 1);
        stats.built.set(stats.built.get() + 1);
        Self(stats)
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.surfaces.set(self.0.surfaces.get().saturating_sub(1));
    }
}

// ---- provider / context -----------------------------------------------------------

/// Hands out CPU raster contexts. Clones share their counters.
#[derive(Clone, Default)]
pub struct RasterProvider {
    stats: Rc<RasterStats>,
}

impl RasterProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Rc<RasterStats> {
        Rc::clone(&self.stats)
    }
}

impl ContextProvider for RasterProvider {
    type Container = RasterContainer;
    type Context = RasterContext;

    fn acquire(&mut self, container: &RasterContainer) -> Result<RasterContext> {
        if !container.inner.has_canvas {
            return Err(ChartError::Render(format!("container `{}` has no canvas", container.label())));
        }
        if container.in_use() {
            return Err(ChartError::Render(format!("container `{}` already hosts a chart", container.label())));
        }
        container.inner.in_use.set(true);
        self.stats.contexts.set(self.stats.contexts.get() + 1);
        Ok(RasterContext { container: Rc::clone(&container.inner), stats: Rc::clone(&self.stats) })
    }

    fn container_size(&self, container: &RasterContainer) -> PixelSize {
        container.size()
    }
}

/// Claim on one container's canvas; dropping it frees the container for another chart.
pub struct RasterContext {
    container: Rc<ContainerState>,
    stats: Rc<RasterStats>,
}

impl Drop for RasterContext {
    fn drop(&mut self) {
        self.container.in_use.set(false);
        self.stats.contexts.set(self.stats.contexts.get().saturating_sub(1));
        tracing::trace!(container = %self.container.label, "drawing context released");
    }
}

impl DrawingContext for RasterContext {
    type Surface = RasterSurface;

    fn build(self, spec: SurfaceSpec) -> std::result::Result<RasterSurface, BuildFailure<Self>> {
        let pixels = match paint_pixels(spec.size, &spec.samples, spec.bounds, &spec.style, None) {
            Ok(p) => p,
            Err(e) => return Err(BuildFailure::recoverable(self, e)),
        };
        let guard = LiveGuard::new(Rc::clone(&self.stats));
        Ok(RasterSurface {
            id: spec.id,
            context: self,
            pixels,
            samples: spec.samples,
            bounds: spec.bounds,
            style: spec.style,
            size: spec.size,
            _live: guard,
        })
    }
}

// ---- surface ---------------------------------------------------------------------

pub struct RasterSurface {
    id: SurfaceId,
    context: RasterContext,
    pixels: skia::Surface,
    samples: Vec<Sample>,
    bounds: AxisBounds,
    style: SurfaceStyle,
    size: PixelSize,
    _live: LiveGuard,
}

impl RasterSurface {
    /// Encode the current pixels as PNG.
    pub fn to_png(&mut self) -> Result<Vec<u8>> {
        encode_png(&mut self.pixels)
    }

    /// Encode the chart composed over a trend tint.
    pub fn to_png_with_overlay(&self, overlay: &TrendOverlay) -> Result<Vec<u8>> {
        let mut composed = paint_pixels(self.size, &self.samples, self.bounds, &self.style, Some(overlay))?;
        encode_png(&mut composed)
    }
}

impl LiveSurface for RasterSurface {
    type Context = RasterContext;

    fn id(&self) -> SurfaceId {
        self.id
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    fn size(&self) -> PixelSize {
        self.size
    }

    fn resize(&mut self, size: PixelSize) -> Result<()> {
        if size.is_empty() {
            return Err(ChartError::Resize(format!("cannot resize to {}x{}", size.width, size.height)));
        }
        self.pixels = paint_pixels(size, &self.samples, self.bounds, &self.style, None)
            .map_err(|e| ChartError::Resize(e.to_string()))?;
        self.size = size;
        Ok(())
    }

    fn destroy(self) -> RasterContext {
        let RasterSurface { context, .. } = self;
        context
    }
}

// ---- painting --------------------------------------------------------------------

fn paint_pixels(
    size: PixelSize,
    samples: &[Sample],
    bounds: AxisBounds,
    style: &SurfaceStyle,
    overlay: Option<&TrendOverlay>,
) -> Result<skia::Surface> {
    if size.is_empty() {
        return Err(ChartError::Render(format!("container is {}x{}", size.width, size.height)));
    }
    let mut surface = skia::surfaces::raster_n32_premul(size.as_skia())
        .ok_or_else(|| ChartError::Render("failed to create raster surface".into()))?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::from_argb(0, 0, 0, 0));
    if let Some(o) = overlay {
        o.paint(canvas, size);
    }
    draw_series(canvas, size, samples, bounds, style);
    Ok(surface)
}

fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| ChartError::Render("encode PNG failed".into()))?;
    Ok(data.as_bytes().to_vec())
}

fn draw_series(canvas: &skia::Canvas, size: PixelSize, samples: &[Sample], bounds: AxisBounds, style: &SurfaceStyle) {
    let Some((x0, x1)) = time_extent(samples) else { return };
    let (w, h) = (size.width as f32, size.height as f32);
    let sx = LinearScale::new(x0 as f64, x1 as f64, 0.0, w);
    let sy = LinearScale::new(bounds.min, bounds.max, h, 0.0);
    let pts: Vec<skia::Point> = samples
        .iter()
        .map(|s| skia::Point::new(sx.to_px(s.x as f64), sy.to_px(s.y)))
        .collect();

    let line = spline_path(&pts, style.tension);

    if style.fill && pts.len() >= 2 {
        let mut area = line.clone();
        if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
            area.line_to((last.x, h));
            area.line_to((first.x, h));
            area.close();
        }
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);
        fill.set_color(style.fill_color);
        canvas.draw_path(&area, &fill);
    }

    if style.border_width > 0.0 {
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(style.border_width);
        stroke.set_color(style.border_color);
        canvas.draw_path(&line, &stroke);
    }

    if style.point_radius > 0.0 || pts.len() == 1 {
        let mut dot = skia::Paint::default();
        dot.set_anti_alias(true);
        dot.set_color(style.border_color);
        let r = style.point_radius.max(style.border_width);
        for p in &pts {
            canvas.draw_circle(*p, r, &dot);
        }
    }
}

/// Cubic path through `pts`; control points follow the neighbouring points,
/// scaled by `tension` and by relative segment length.
fn spline_path(pts: &[skia::Point], tension: f32) -> skia::Path {
    let mut path = skia::Path::new();
    let Some(&first) = pts.first() else { return path };
    path.move_to(first);
    if tension <= 0.0 {
        for &p in &pts[1..] {
            path.line_to(p);
        }
        return path;
    }
    let controls: Vec<(skia::Point, skia::Point)> = (0..pts.len())
        .map(|i| {
            let prev = pts[i.saturating_sub(1)];
            let cur = pts[i];
            let next = pts[(i + 1).min(pts.len() - 1)];
            control_points(prev, cur, next, tension)
        })
        .collect();
    for i in 1..pts.len() {
        let (_, out_cp) = controls[i - 1];
        let (in_cp, _) = controls[i];
        path.cubic_to(out_cp, in_cp, pts[i]);
    }
    path
}

fn control_points(prev: skia::Point, cur: skia::Point, next: skia::Point, t: f32) -> (skia::Point, skia::Point) {
    let d01 = ((cur.x - prev.x).powi(2) + (cur.y - prev.y).powi(2)).sqrt();
    let d12 = ((next.x - cur.x).powi(2) + (next.y - cur.y).powi(2)).sqrt();
    let total = d01 + d12;
    let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };
    let (fa, fb) = (t * s01, t * s12);
    let (dx, dy) = (next.x - prev.x, next.y - prev.y);
    (
        skia::Point::new(cur.x - fa * dx, cur.y - fa * dy),
        skia::Point::new(cur.x + fb * dx, cur.y + fb * dy),
    )
}
