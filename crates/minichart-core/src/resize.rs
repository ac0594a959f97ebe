// File: crates/minichart-core/src/resize.rs
// Summary: Bridges host size-change notifications into non-destructive surface resizes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{ChartError, Result};
use crate::lifecycle::ChartLifecycleManager;
use crate::raster::RasterContainer;
use crate::surface::ContextProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type ResizeCallback = Box<dyn FnMut()>;

/// Host capability delivering container size-change notifications.
pub trait SizeObserver {
    type Container;

    fn subscribe(&mut self, container: &Self::Container, callback: ResizeCallback) -> Result<SubscriptionId>;

    /// Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Subscribes a lifecycle manager's resize handler to a [`SizeObserver`].
///
/// Holds the manager weakly, so a late notification after the manager is gone
/// does nothing. Dropping the bridge unsubscribes.
pub struct SizeChangeBridge<O: SizeObserver> {
    observer: O,
    subscription: Option<SubscriptionId>,
}

impl<O: SizeObserver> SizeChangeBridge<O> {
    pub fn new(observer: O) -> Self {
        Self { observer, subscription: None }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Start forwarding size changes of `container` to `manager`. Re-attaching
    /// drops the previous subscription first.
    pub fn attach<P>(&mut self, container: &O::Container, manager: &Rc<RefCell<ChartLifecycleManager<P>>>)
    where
        P: ContextProvider + 'static,
    {
        self.detach();
        let weak: Weak<RefCell<ChartLifecycleManager<P>>> = Rc::downgrade(manager);
        let callback: ResizeCallback = Box::new(move || {
            let Some(manager) = weak.upgrade() else { return };
            match manager.try_borrow_mut() {
                Ok(mut m) => m.handle_resize(),
                Err(_) => tracing::debug!("resize notification arrived mid-update; skipped"),
            };
        });
        match self.observer.subscribe(container, callback) {
            Ok(id) => self.subscription = Some(id),
            Err(e) => tracing::warn!(error = %e, "size observer refused subscription; resizes disabled"),
        }
    }

    /// Stop forwarding. No notification is delivered after this returns.
    pub fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.observer.unsubscribe(id);
        }
    }
}

impl<O: SizeObserver> Drop for SizeChangeBridge<O> {
    fn drop(&mut self) {
        self.detach();
    }
}

// ---- in-process observer ------------------------------------------------------

struct Subscriber {
    id: SubscriptionId,
    container: RasterContainer,
    // Taken out while running so a callback may (un)subscribe re-entrantly.
    callback: Option<ResizeCallback>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Observer driven explicitly by the host (a window event, a polling tick) via
/// [`ManualSizeObserver::notify`]. Clones share subscribers.
#[derive(Clone, Default)]
pub struct ManualSizeObserver {
    registry: Rc<RefCell<Registry>>,
}

impl ManualSizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }

    /// Deliver one notification to every subscriber of `container`; returns how many ran.
    pub fn notify(&self, container: &RasterContainer) -> usize {
        let ids: Vec<SubscriptionId> = self
            .registry
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.container.same_as(container))
            .map(|s| s.id)
            .collect();

        let mut delivered = 0;
        for id in ids {
            let taken = self
                .registry
                .borrow_mut()
                .subscribers
                .iter_mut()
                .find(|s| s.id == id)
                .and_then(|s| s.callback.take());
            let Some(mut callback) = taken else { continue };
            callback();
            delivered += 1;
            if let Some(s) = self.registry.borrow_mut().subscribers.iter_mut().find(|s| s.id == id) {
                s.callback = Some(callback);
            }
        }
        delivered
    }
}

impl SizeObserver for ManualSizeObserver {
    type Container = RasterContainer;

    fn subscribe(&mut self, container: &RasterContainer, callback: ResizeCallback) -> Result<SubscriptionId> {
        let mut reg = self
            .registry
            .try_borrow_mut()
            .map_err(|_| ChartError::Resize("observer busy".into()))?;
        reg.next_id += 1;
        let id = SubscriptionId(reg.next_id);
        reg.subscribers.push(Subscriber { id, container: container.clone(), callback: Some(callback) });
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.registry.borrow_mut().subscribers.retain(|s| s.id != id);
    }
}
