// File: crates/minichart-core/src/cache.rs
// Summary: Memo of normalized samples and trend keyed by (history reference, selector).

use std::rc::Rc;

use crate::history::{HistoryPoint, MetricSelector, Sample};
use crate::normalize::normalize_opt;
use crate::trend::{TrendDirection, TrendEstimator};

/// Recomputes only when the caller supplies a different history allocation or
/// selector. Identity, not content, is the key: the feed publishes a fresh
/// `Rc<[HistoryPoint]>` whenever the history changes.
pub struct SeriesCache {
    estimator: TrendEstimator,
    key: Option<(Option<Rc<[HistoryPoint]>>, MetricSelector)>,
    samples: Vec<Sample>,
    trend: TrendDirection,
}

impl SeriesCache {
    pub fn new(estimator: TrendEstimator) -> Self {
        Self { estimator, key: None, samples: Vec::new(), trend: TrendDirection::Stagnant }
    }

    /// Returns `true` when the samples were recomputed.
    pub fn refresh(&mut self, history: Option<&Rc<[HistoryPoint]>>, selector: MetricSelector) -> bool {
        if let Some((cached, cached_sel)) = &self.key {
            let same_history = match (cached, history) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if same_history && *cached_sel == selector {
                return false;
            }
        }
        self.samples = normalize_opt(history.map(|h| &h[..]), selector);
        self.trend = self.estimator.classify(&self.samples);
        self.key = Some((history.cloned(), selector));
        tracing::trace!(metric = selector.label(), points = self.samples.len(), trend = self.trend.label(), "series recomputed");
        true
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn trend(&self) -> TrendDirection {
        self.trend
    }

    /// Forget the key so the next refresh recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new(TrendEstimator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[f64]) -> Rc<[HistoryPoint]> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| HistoryPoint::new(i as i64 * 1000, v, 0))
            .collect()
    }

    #[test]
    fn recomputes_only_on_key_change() {
        let mut cache = SeriesCache::default();
        let h = history(&[1.0, 2.0, 3.0]);
        assert!(cache.refresh(Some(&h), MetricSelector::Liquidity));
        assert!(!cache.refresh(Some(&Rc::clone(&h)), MetricSelector::Liquidity));
        assert_eq!(cache.trend(), TrendDirection::Up);

        assert!(cache.refresh(Some(&h), MetricSelector::Holders));
        assert_eq!(cache.trend(), TrendDirection::Stagnant);

        // Equal content, different allocation.
        let copy = history(&[1.0, 2.0, 3.0]);
        assert!(cache.refresh(Some(&copy), MetricSelector::Holders));
    }

    #[test]
    fn absent_history_is_a_key() {
        let mut cache = SeriesCache::default();
        assert!(cache.refresh(None, MetricSelector::Liquidity));
        assert!(cache.samples().is_empty());
        assert!(!cache.refresh(None, MetricSelector::Liquidity));
        cache.invalidate();
        assert!(cache.refresh(None, MetricSelector::Liquidity));
    }
}
