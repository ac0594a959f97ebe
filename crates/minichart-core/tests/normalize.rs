// File: crates/minichart-core/tests/normalize.rs
// Purpose: Ordering and tolerance properties of history normalization.

use minichart_core::{
    estimate_trend, normalize, normalize_json, normalize_opt, HistoryPoint, MetricSelector, Sample, TrendDirection,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

fn shuffled_history(rng: &mut StdRng, n: usize) -> Vec<HistoryPoint> {
    let mut h: Vec<HistoryPoint> = (0..n)
        .map(|_| {
            HistoryPoint::new(
                rng.random_range(-1_000_000i64..4_000_000),
                rng.random_range(0.0..3_333.0),
                rng.random_range(0i64..500),
            )
        })
        .collect();
    h.shuffle(rng);
    h
}

#[test]
fn output_is_non_decreasing_in_x() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [0usize, 1, 2, 7, 64, 500] {
        for selector in MetricSelector::ALL {
            let h = shuffled_history(&mut rng, n);
            let s = normalize(&h, selector);
            assert_eq!(s.len(), h.len());
            assert!(s.windows(2).all(|w| w[0].x <= w[1].x), "n={n} {selector:?}");
        }
    }
}

#[test]
fn worked_example_from_feed() {
    let h = vec![
        HistoryPoint::new(1000, 100.0, 10),
        HistoryPoint::new(3000, 200.0, 30),
        HistoryPoint::new(2000, 150.0, 20),
    ];
    let s = normalize(&h, MetricSelector::Liquidity);
    assert_eq!(s, vec![Sample::new(1, 100.0), Sample::new(2, 150.0), Sample::new(3, 200.0)]);
    assert_eq!(estimate_trend(&s), TrendDirection::Up);
}

#[test]
fn holder_counts_become_values() {
    let h = vec![HistoryPoint::new(9000, 1.0, 12), HistoryPoint::new(4000, 2.0, 7)];
    assert_eq!(normalize(&h, MetricSelector::Holders), vec![Sample::new(4, 7.0), Sample::new(9, 12.0)]);
}

#[test]
fn empty_and_absent_yield_empty() {
    assert!(normalize(&[], MetricSelector::Liquidity).is_empty());
    assert!(normalize_opt(None, MetricSelector::Holders).is_empty());
    assert!(normalize_json(&json!(null), MetricSelector::Holders).is_empty());
    assert!(normalize_json(&json!([]), MetricSelector::Holders).is_empty());
}

#[test]
fn malformed_payload_never_panics() {
    let payloads = [
        json!("history"),
        json!(17),
        json!({ "points": [] }),
        json!([null]),
        json!([{ "timestamp": 1000 }]),
        json!([{ "timestamp": 1000, "totalLiquidity": 1.0 }, { "timestamp": true, "totalLiquidity": 2.0 }]),
    ];
    for raw in &payloads {
        assert!(normalize_json(raw, MetricSelector::Liquidity).is_empty(), "{raw}");
    }
}

#[test]
fn decoded_feed_matches_typed_path() {
    let raw = json!([
        { "timestamp": 3000, "totalLiquidity": 200.0, "holderCount": 30 },
        { "timestamp": 1000, "totalLiquidity": 100.0, "holderCount": 10 },
    ]);
    let typed: Vec<HistoryPoint> = serde_json::from_value(raw.clone()).unwrap();
    for selector in MetricSelector::ALL {
        assert_eq!(normalize_json(&raw, selector), normalize(&typed, selector));
    }
}
