// File: crates/minichart-core/tests/resize.rs
// Purpose: Size-change notifications reach the manager only between attach and detach.

use std::cell::RefCell;
use std::rc::Rc;

use minichart_core::resize::ResizeCallback;
use minichart_core::{
    ChartError, ChartLifecycleManager, LiveSurface, ManualSizeObserver, PixelSize, Primitives, RasterContainer,
    RasterProvider, Sample, SizeChangeBridge, SizeObserver, SubscriptionId, SurfaceStyle,
};

type Manager = Rc<RefCell<ChartLifecycleManager<RasterProvider>>>;

fn rendered(container: &RasterContainer) -> Manager {
    let mut m = ChartLifecycleManager::new(Primitives::standard(), RasterProvider::new());
    m.mount(container.clone());
    m.render_or_replace(&[Sample::new(0, 1.0), Sample::new(60, 4.0)], &SurfaceStyle::liquidity());
    Rc::new(RefCell::new(m))
}

fn live_size(m: &Manager) -> Option<PixelSize> {
    m.borrow().surface().map(|s| s.size())
}

#[test]
fn notifications_resize_without_rebuilding() {
    let container = RasterContainer::new("holders", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let id = manager.borrow().surface_id();
    let observer = ManualSizeObserver::new();
    let mut bridge = SizeChangeBridge::new(observer.clone());
    bridge.attach(&container, &manager);
    assert!(bridge.is_attached());

    container.set_size(PixelSize::new(240, 40));
    assert_eq!(observer.notify(&container), 1);
    assert_eq!(live_size(&manager), Some(PixelSize::new(240, 40)));
    assert_eq!(manager.borrow().surface_id(), id);
}

#[test]
fn nothing_delivered_after_detach() {
    let container = RasterContainer::new("liquidity", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let observer = ManualSizeObserver::new();
    let mut bridge = SizeChangeBridge::new(observer.clone());
    bridge.attach(&container, &manager);
    bridge.detach();
    manager.borrow_mut().unmount();

    container.set_size(PixelSize::new(10, 10));
    assert_eq!(observer.notify(&container), 0);
    assert_eq!(observer.subscriber_count(), 0);
}

#[test]
fn dropping_bridge_unsubscribes() {
    let container = RasterContainer::new("liquidity", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let observer = ManualSizeObserver::new();
    {
        let mut bridge = SizeChangeBridge::new(observer.clone());
        bridge.attach(&container, &manager);
        assert_eq!(observer.subscriber_count(), 1);
    }
    assert_eq!(observer.subscriber_count(), 0);
}

#[test]
fn other_containers_are_not_notified() {
    let a = RasterContainer::new("a", PixelSize::new(100, 40));
    let b = RasterContainer::new("b", PixelSize::new(100, 40));
    let manager = rendered(&a);
    let observer = ManualSizeObserver::new();
    let mut bridge = SizeChangeBridge::new(observer.clone());
    bridge.attach(&a, &manager);

    a.set_size(PixelSize::new(50, 20));
    assert_eq!(observer.notify(&b), 0);
    assert_eq!(live_size(&manager), Some(PixelSize::new(100, 40)));
}

#[test]
fn stale_notification_after_manager_dropped_is_harmless() {
    let container = RasterContainer::new("liquidity", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let observer = ManualSizeObserver::new();
    let mut bridge = SizeChangeBridge::new(observer.clone());
    bridge.attach(&container, &manager);
    drop(manager);
    assert_eq!(observer.notify(&container), 1);
}

#[test]
fn notification_during_update_is_skipped() {
    let container = RasterContainer::new("liquidity", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let observer = ManualSizeObserver::new();
    let mut bridge = SizeChangeBridge::new(observer.clone());
    bridge.attach(&container, &manager);

    container.set_size(PixelSize::new(200, 40));
    {
        let _busy = manager.borrow_mut();
        assert_eq!(observer.notify(&container), 1);
    }
    assert_eq!(live_size(&manager), Some(PixelSize::new(100, 40)));
    observer.notify(&container);
    assert_eq!(live_size(&manager), Some(PixelSize::new(200, 40)));
}

struct RefusingObserver;

impl SizeObserver for RefusingObserver {
    type Container = RasterContainer;

    fn subscribe(&mut self, _c: &RasterContainer, _cb: ResizeCallback) -> minichart_core::Result<SubscriptionId> {
        Err(ChartError::Resize("no observer available".into()))
    }

    fn unsubscribe(&mut self, _id: SubscriptionId) {}
}

#[test]
fn refused_subscription_leaves_bridge_detached() {
    let container = RasterContainer::new("liquidity", PixelSize::new(100, 40));
    let manager = rendered(&container);
    let mut bridge = SizeChangeBridge::new(RefusingObserver);
    bridge.attach(&container, &manager);
    assert!(!bridge.is_attached());
    assert!(manager.borrow().has_live_surface());
}
