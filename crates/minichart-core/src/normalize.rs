// File: crates/minichart-core/src/normalize.rs
// Summary: Turns unordered metric history into an ascending series of plot samples.
// Notes:
// - Structural problems never escape: the public entry points log and return an
//   empty series. `try_normalize_json` exposes the reason for callers that want it.

use serde_json::Value;

use crate::error::{ChartError, Result};
use crate::history::{HistoryPoint, MetricSelector, Sample};

/// Stable-sort `history` by timestamp and project the selected metric.
///
/// Timestamps become whole seconds (integer division by 1000, truncating toward
/// zero). Points sharing a timestamp keep their input order.
pub fn normalize(history: &[HistoryPoint], selector: MetricSelector) -> Vec<Sample> {
    let mut ordered: Vec<&HistoryPoint> = history.iter().collect();
    ordered.sort_by_key(|p| p.timestamp);
    ordered
        .into_iter()
        .map(|p| Sample::new(p.timestamp / 1000, p.metric(selector)))
        .collect()
}

/// Like [`normalize`], but an absent collection yields an empty series.
pub fn normalize_opt(history: Option<&[HistoryPoint]>, selector: MetricSelector) -> Vec<Sample> {
    match history {
        Some(h) => normalize(h, selector),
        None => {
            tracing::debug!(metric = selector.label(), "no history supplied; empty series");
            Vec::new()
        }
    }
}

/// Normalize a raw feed payload that has not been decoded yet.
///
/// Anything other than an array of objects with numeric `timestamp` and
/// selected-metric fields yields an empty series plus a warning.
pub fn normalize_json(raw: &Value, selector: MetricSelector) -> Vec<Sample> {
    match try_normalize_json(raw, selector) {
        Ok(samples) => samples,
        Err(e) => {
            tracing::warn!(error = %e, metric = selector.label(), "discarding malformed history");
            Vec::new()
        }
    }
}

/// Fallible form of [`normalize_json`].
pub fn try_normalize_json(raw: &Value, selector: MetricSelector) -> Result<Vec<Sample>> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Err(ChartError::Data("history is absent".into())),
        other => {
            return Err(ChartError::Data(format!(
                "history must be an array, got {}",
                json_kind(other)
            )))
        }
    };
    let points = items
        .iter()
        .enumerate()
        .map(|(i, item)| point_from_json(i, item, selector))
        .collect::<Result<Vec<_>>>()?;
    Ok(normalize(&points, selector))
}

// Only the timestamp and the selected metric are validated; the other metric is
// read leniently since it never reaches the plot.
fn point_from_json(index: usize, item: &Value, selector: MetricSelector) -> Result<HistoryPoint> {
    let obj = item.as_object().ok_or_else(|| {
        ChartError::Data(format!("entry {index} must be an object, got {}", json_kind(item)))
    })?;

    let number = |field: &str| -> Result<f64> {
        match obj.get(field) {
            Some(v) => v
                .as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ChartError::Data(format!("entry {index}: `{field}` is not numeric"))),
            None => Err(ChartError::Data(format!("entry {index}: missing `{field}`"))),
        }
    };

    let timestamp = match obj.get("timestamp").and_then(Value::as_i64) {
        Some(ms) => ms,
        None => number("timestamp")?.trunc() as i64,
    };
    let selected = number(selector.field_name())?;
    let lenient = |field: &str| obj.get(field).and_then(Value::as_f64).unwrap_or_default();

    let point = match selector {
        MetricSelector::Liquidity => HistoryPoint::new(
            timestamp,
            selected,
            lenient(MetricSelector::Holders.field_name()) as i64,
        ),
        MetricSelector::Holders => {
            if selected.fract() != 0.0 {
                return Err(ChartError::Data(format!("entry {index}: `holderCount` {selected} is not a whole number")));
            }
            HistoryPoint::new(timestamp, lenient(MetricSelector::Liquidity.field_name()), selected as i64)
        }
    };
    Ok(point)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_and_projects_liquidity() {
        let h = vec![
            HistoryPoint::new(1000, 100.0, 1),
            HistoryPoint::new(3000, 200.0, 3),
            HistoryPoint::new(2000, 150.0, 2),
        ];
        let s = normalize(&h, MetricSelector::Liquidity);
        assert_eq!(s, vec![Sample::new(1, 100.0), Sample::new(2, 150.0), Sample::new(3, 200.0)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let h = vec![
            HistoryPoint::new(5000, 0.0, 7),
            HistoryPoint::new(1000, 0.0, 1),
            HistoryPoint::new(5000, 0.0, 9),
        ];
        let ys: Vec<f64> = normalize(&h, MetricSelector::Holders).iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![1.0, 7.0, 9.0]);
    }

    #[test]
    fn seconds_truncate_toward_zero() {
        let h = vec![HistoryPoint::new(-1500, 1.0, 0), HistoryPoint::new(1999, 2.0, 0)];
        let xs: Vec<i64> = normalize(&h, MetricSelector::Liquidity).iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![-1, 1]);
    }

    #[test]
    fn json_accepts_float_numbers() {
        let raw = json!([{ "timestamp": 2500.7, "totalLiquidity": 10, "holderCount": 4.0 }]);
        let s = normalize_json(&raw, MetricSelector::Holders);
        assert_eq!(s, vec![Sample::new(2, 4.0)]);
    }

    #[test]
    fn json_unselected_field_may_be_missing() {
        let raw = json!([{ "timestamp": 1000, "totalLiquidity": 5.5 }]);
        assert_eq!(normalize_json(&raw, MetricSelector::Liquidity), vec![Sample::new(1, 5.5)]);
        assert!(normalize_json(&raw, MetricSelector::Holders).is_empty());
    }

    #[test]
    fn json_structural_errors_are_reported() {
        let cases = [
            json!(null),
            json!({ "timestamp": 1 }),
            json!([1, 2, 3]),
            json!([{ "timestamp": "soon", "totalLiquidity": 1.0 }]),
            json!([{ "timestamp": 1000, "totalLiquidity": "lots" }]),
        ];
        for raw in &cases {
            let err = try_normalize_json(raw, MetricSelector::Liquidity).unwrap_err();
            assert!(matches!(err, ChartError::Data(_)), "{raw}: {err}");
            assert!(normalize_json(raw, MetricSelector::Liquidity).is_empty());
        }
    }

    #[test]
    fn fractional_holder_count_is_rejected() {
        let raw = json!([{ "timestamp": 1000, "totalLiquidity": 1.0, "holderCount": 4.7 }]);
        let err = try_normalize_json(&raw, MetricSelector::Holders).unwrap_err();
        assert!(matches!(err, ChartError::Data(_)), "{err}");

        let whole = json!([{ "timestamp": 1000, "totalLiquidity": 1.0, "holderCount": 4.0 }]);
        assert_eq!(try_normalize_json(&whole, MetricSelector::Holders).unwrap(), vec![Sample::new(1, 4.0)]);
    }
}
