use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minichart_core::{normalize, normalize_json, HistoryPoint, MetricSelector};

fn gen_history(n: usize) -> Vec<HistoryPoint> {
    // reverse-chronological, as feeds usually deliver it
    (0..n)
        .rev()
        .map(|i| {
            let t = i as i64 * 60_000;
            let liq = 1_000_000.0 + (i as f64 * 0.01).sin() * 50_000.0;
            HistoryPoint::new(t, liq, 500 + (i as i64 % 37))
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for &n in &[100usize, 1_000usize, 10_000usize] {
        let history = gen_history(n);
        group.bench_with_input(BenchmarkId::new("typed", n), &history, |b, h| {
            b.iter(|| black_box(normalize(h, MetricSelector::Liquidity)));
        });
        let raw = serde_json::to_value(&history).unwrap();
        group.bench_with_input(BenchmarkId::new("json", n), &raw, |b, v| {
            b.iter(|| black_box(normalize_json(v, MetricSelector::Holders)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
