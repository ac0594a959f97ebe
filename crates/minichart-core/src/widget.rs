// File: crates/minichart-core/src/widget.rs
// Summary: MiniChart facade wiring cache, lifecycle manager and resize bridge in the right order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::axis::AxisPadding;
use crate::cache::SeriesCache;
use crate::history::{HistoryPoint, MetricSelector, Sample};
use crate::lifecycle::ChartLifecycleManager;
use crate::overlay::TrendOverlay;
use crate::primitives::Primitives;
use crate::resize::{SizeChangeBridge, SizeObserver};
use crate::style::StyleSet;
use crate::surface::ContextProvider;
use crate::trend::{TrendDirection, TrendEstimator};

/// One mini-chart slot of a token card.
///
/// `mount` subscribes to size changes only after the manager is bound;
/// `unmount` unsubscribes before the surface is destroyed.
pub struct MiniChart<P, O>
where
    P: ContextProvider + 'static,
    O: SizeObserver<Container = P::Container>,
{
    manager: Rc<RefCell<ChartLifecycleManager<P>>>,
    bridge: SizeChangeBridge<O>,
    cache: SeriesCache,
    styles: StyleSet,
}

impl<P, O> MiniChart<P, O>
where
    P: ContextProvider + 'static,
    O: SizeObserver<Container = P::Container>,
{
    pub fn new(primitives: Primitives, provider: P, observer: O) -> Self {
        Self {
            manager: Rc::new(RefCell::new(ChartLifecycleManager::new(primitives, provider))),
            bridge: SizeChangeBridge::new(observer),
            cache: SeriesCache::default(),
            styles: StyleSet::default(),
        }
    }

    pub fn with_styles(mut self, styles: StyleSet) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_estimator(mut self, estimator: TrendEstimator) -> Self {
        self.cache = SeriesCache::new(estimator);
        self
    }

    pub fn with_padding(self, padding: AxisPadding) -> Self {
        self.manager.borrow_mut().set_padding(padding);
        self
    }

    pub fn manager(&self) -> &Rc<RefCell<ChartLifecycleManager<P>>> {
        &self.manager
    }

    /// Bind `container`. A remount drops the previous surface, so the next
    /// `update` rebuilds even when the history is unchanged.
    pub fn mount(&mut self, container: P::Container) {
        self.manager.borrow_mut().mount(container);
        self.cache.invalidate();
        let manager = self.manager.borrow();
        match manager.container() {
            Some(c) => self.bridge.attach(c, &self.manager),
            None => {
                self.bridge.detach();
                tracing::debug!("mount failed; size changes not observed");
            }
        }
    }

    /// Feed the current history; rebuilds the surface only when the
    /// (history, selector) key changed. Returns the series' trend.
    pub fn update(&mut self, history: Option<&Rc<[HistoryPoint]>>, selector: MetricSelector) -> TrendDirection {
        if self.cache.refresh(history, selector) {
            let style = self.styles.get(selector);
            self.manager.borrow_mut().render_or_replace(self.cache.samples(), style);
        }
        self.cache.trend()
    }

    pub fn trend(&self) -> TrendDirection {
        self.cache.trend()
    }

    pub fn overlay(&self) -> TrendOverlay {
        TrendOverlay::for_direction(self.cache.trend())
    }

    pub fn samples(&self) -> &[Sample] {
        self.cache.samples()
    }

    pub fn handle_resize(&mut self) {
        self.manager.borrow_mut().handle_resize();
    }

    pub fn unmount(&mut self) {
        self.bridge.detach();
        self.manager.borrow_mut().unmount();
        self.cache.invalidate();
    }
}

impl<P, O> Drop for MiniChart<P, O>
where
    P: ContextProvider + 'static,
    O: SizeObserver<Container = P::Container>,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
