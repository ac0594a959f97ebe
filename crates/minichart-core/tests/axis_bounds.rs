// File: crates/minichart-core/tests/axis_bounds.rs
// Purpose: Validate padded Y bounds derived from sample sets.

use minichart_core::{AxisBounds, AxisPadding, Sample};

#[test]
fn bounds_pad_min_and_max() {
    let s = vec![Sample::new(1, 100.0), Sample::new(2, 300.0), Sample::new(3, 150.0)];
    let b = AxisBounds::from_samples(&s, AxisPadding::default()).expect("non-empty");
    assert!((b.min - 95.0).abs() < 1e-9);
    assert!((b.max - 315.0).abs() < 1e-9);
    assert!(s.iter().all(|p| b.contains(p.y)));
}

#[test]
fn bounds_absent_for_empty_set() {
    assert_eq!(AxisBounds::from_samples(&[], AxisPadding::default()), None);
}

#[test]
fn custom_padding_applies() {
    let s = vec![Sample::new(0, 10.0), Sample::new(1, 20.0)];
    let b = AxisBounds::from_samples(&s, AxisPadding { lower: 0.5, upper: 2.0 }).unwrap();
    assert_eq!(b, AxisBounds::new(5.0, 40.0));
    assert_eq!(b.span(), 35.0);
}
