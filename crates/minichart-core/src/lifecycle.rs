// File: crates/minichart-core/src/lifecycle.rs
// Summary: Owns the single live surface of one container: mount, rebuild, resize, teardown.
// Notes:
// - Every failure is logged and degrades to "no live surface"; nothing here
//   returns an error to the host.
// - The drawing context lives in exactly one place at a time: the idle slot,
//   or inside the live surface.

use std::mem;

use crate::axis::{AxisBounds, AxisPadding};
use crate::history::Sample;
use crate::primitives::Primitives;
use crate::style::SurfaceStyle;
use crate::surface::{BuildFailure, ContextProvider, DrawingContext, LiveSurface, SurfaceId, SurfaceOf, SurfaceSpec};

/// `Uninitialized → Mounted → Rendered ⇄ Updated → Destroyed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Never mounted, or mounting failed to obtain a context.
    Uninitialized,
    /// Context held, nothing built yet.
    Mounted,
    /// First surface built.
    Rendered,
    /// A later rebuild replaced the surface.
    Updated,
    /// Terminal.
    Destroyed,
}

enum Slot<C: DrawingContext> {
    Vacant,
    Idle(C),
    Live(C::Surface),
}

pub struct ChartLifecycleManager<P: ContextProvider> {
    provider: P,
    primitives: Primitives,
    padding: AxisPadding,
    container: Option<P::Container>,
    slot: Slot<P::Context>,
    state: LifecycleState,
    next_id: u64,
}

impl<P: ContextProvider> ChartLifecycleManager<P> {
    /// `primitives` comes from the composition root's one-time registration.
    pub fn new(primitives: Primitives, provider: P) -> Self {
        Self {
            provider,
            primitives,
            padding: AxisPadding::default(),
            container: None,
            slot: Slot::Vacant,
            state: LifecycleState::Uninitialized,
            next_id: 1,
        }
    }

    pub fn with_padding(mut self, padding: AxisPadding) -> Self {
        self.set_padding(padding);
        self
    }

    /// Takes effect on the next rebuild.
    pub fn set_padding(&mut self, padding: AxisPadding) {
        self.padding = padding;
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn has_live_surface(&self) -> bool {
        matches!(self.slot, Slot::Live(_))
    }

    /// Whether a drawing context is held, idle or inside the live surface.
    pub fn holds_context(&self) -> bool {
        !matches!(self.slot, Slot::Vacant)
    }

    pub fn surface(&self) -> Option<&SurfaceOf<P>> {
        match &self.slot {
            Slot::Live(s) => Some(s),
            _ => None,
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut SurfaceOf<P>> {
        match &mut self.slot {
            Slot::Live(s) => Some(s),
            _ => None,
        }
    }

    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface().map(|s| s.id())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn container(&self) -> Option<&P::Container> {
        self.container.as_ref()
    }

    /// Bind `container` and acquire its drawing context.
    ///
    /// Remounting tears the previous binding down first. If no context can be
    /// acquired the manager stays unmounted and later calls are no-ops.
    pub fn mount(&mut self, container: P::Container) {
        if self.state == LifecycleState::Destroyed {
            tracing::warn!("mount after unmount ignored");
            return;
        }
        if self.is_mounted() {
            tracing::debug!("remounting; releasing previous container");
            self.release();
        }
        match self.provider.acquire(&container) {
            Ok(ctx) => {
                self.container = Some(container);
                self.slot = Slot::Idle(ctx);
                self.state = LifecycleState::Mounted;
                tracing::debug!("chart mounted");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to acquire drawing context; chart left blank");
                self.state = LifecycleState::Uninitialized;
            }
        }
    }

    /// Destroy the live surface (if any) and build a fresh one from `samples`.
    ///
    /// Empty `samples` leave the container blank. Bounds are recomputed from
    /// scratch; the dataset of an existing surface is never patched.
    pub fn render_or_replace(&mut self, samples: &[Sample], style: &SurfaceStyle) {
        let Some(ctx) = self.take_context() else {
            tracing::debug!("render skipped; no drawing context");
            return;
        };

        let Some(bounds) = AxisBounds::from_samples(samples, self.padding) else {
            tracing::debug!("empty series; container left blank");
            self.slot = Slot::Idle(ctx);
            return;
        };

        if let Err(e) = style.validate().and_then(|_| self.primitives.check(style)) {
            tracing::warn!(error = %e, "surface style rejected");
            self.slot = Slot::Idle(ctx);
            return;
        }

        let size = match &self.container {
            Some(c) => self.provider.container_size(c),
            None => {
                self.slot = Slot::Idle(ctx);
                return;
            }
        };
        let spec = SurfaceSpec {
            id: self.mint_id(),
            samples: samples.to_vec(),
            bounds,
            style: style.clone(),
            size,
        };

        match ctx.build(spec) {
            Ok(surface) => {
                tracing::debug!(id = %surface.id(), points = samples.len(), "surface built");
                self.slot = Slot::Live(surface);
                self.state = match self.state {
                    LifecycleState::Mounted => LifecycleState::Rendered,
                    _ => LifecycleState::Updated,
                };
            }
            Err(BuildFailure { context: Some(ctx), error }) => {
                tracing::warn!(error = %error, "surface construction failed; chart left blank");
                self.slot = Slot::Idle(ctx);
            }
            Err(BuildFailure { context: None, error }) => {
                tracing::warn!(error = %error, "surface construction lost the drawing context");
                self.slot = Slot::Vacant;
            }
        }
    }

    /// Ask the live surface to match the container's current pixel size.
    pub fn handle_resize(&mut self) {
        let (Slot::Live(surface), Some(container)) = (&mut self.slot, &self.container) else {
            return;
        };
        let size = self.provider.container_size(container);
        if size == surface.size() {
            return;
        }
        if let Err(e) = surface.resize(size) {
            tracing::debug!(error = %e, "resize ignored");
        }
    }

    /// Destroy any live surface and release the drawing context. Idempotent.
    pub fn unmount(&mut self) {
        if !self.is_mounted() && !self.holds_context() {
            return;
        }
        self.release();
        self.state = LifecycleState::Destroyed;
        tracing::debug!("chart unmounted");
    }

    fn release(&mut self) {
        if let Some(ctx) = self.take_context() {
            self.provider.release(ctx);
        }
        self.container = None;
    }

    /// Empty the slot, destroying a live surface to recover its context.
    fn take_context(&mut self) -> Option<P::Context> {
        match mem::replace(&mut self.slot, Slot::Vacant) {
            Slot::Vacant => None,
            Slot::Idle(ctx) => Some(ctx),
            Slot::Live(surface) => {
                let id = surface.id();
                let ctx = surface.destroy();
                tracing::trace!(%id, "surface destroyed");
                Some(ctx)
            }
        }
    }

    fn mint_id(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<P: ContextProvider> Drop for ChartLifecycleManager<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}
