//! Metric output types: position-aligned series with first-class missing
//! values, and the tagged value stored in a report bundle.

use serde::{Deserialize, Serialize};

/// A derived series aligned position-for-position with its input series.
///
/// `None` marks a position with insufficient history or an undefined
/// division (flat window, 0/0). Non-finite floats are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries {
    values: Vec<Option<f64>>,
}

impl MetricSeries {
    /// Wrap per-position values. Any non-finite value is stored as missing.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        }
    }

    /// A series of `len` missing positions.
    pub fn missing(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` when missing or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the final position (what a summary view displays).
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// The most recent defined value, searching backwards.
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }

    /// Iterate over every position, missing included.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    /// Iterate over defined values only.
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    /// Number of defined positions.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Position-wise combination; missing wherever either side is missing.
    pub fn zip_with(&self, other: &MetricSeries, f: impl Fn(f64, f64) -> f64) -> MetricSeries {
        MetricSeries::new(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| match (a, b) {
                    (Some(a), Some(b)) => Some(f(*a, *b)),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl FromIterator<Option<f64>> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        MetricSeries::new(iter.into_iter().collect())
    }
}

/// One entry of the report bundle.
///
/// `Undefined` is a legitimate numeric non-answer (zero denominator, no
/// downside returns). `Absent` means the metric needs a benchmark series and
/// none was supplied. Consumers must render both distinctly from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Scalar(f64),
    Series(MetricSeries),
    Undefined,
    Absent,
}

impl MetricValue {
    /// `Scalar` for a finite value, `Undefined` otherwise.
    pub fn from_scalar(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => MetricValue::Scalar(v),
            _ => MetricValue::Undefined,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&MetricSeries> {
        match self {
            MetricValue::Series(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, MetricValue::Absent)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, MetricValue::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_become_missing() {
        let s = MetricSeries::new(vec![Some(1.0), Some(f64::NAN), Some(f64::INFINITY), None]);
        assert_eq!(s.get(0), Some(1.0));
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(2), None);
        assert_eq!(s.defined_count(), 1);
    }

    #[test]
    fn last_vs_last_defined() {
        let s = MetricSeries::new(vec![Some(1.0), Some(2.0), None]);
        assert_eq!(s.last(), None);
        assert_eq!(s.last_defined(), Some(2.0));
        assert_eq!(s.get(10), None);
    }

    #[test]
    fn zip_with_propagates_missing() {
        let a = MetricSeries::new(vec![None, Some(3.0), Some(5.0)]);
        let b = MetricSeries::new(vec![Some(1.0), None, Some(2.0)]);
        let diff = a.zip_with(&b, |x, y| x - y);
        assert_eq!(diff.as_slice(), &[None, None, Some(3.0)]);
    }

    #[test]
    fn from_scalar_maps_non_answers_to_undefined() {
        assert_eq!(MetricValue::from_scalar(Some(0.0)), MetricValue::Scalar(0.0));
        assert!(MetricValue::from_scalar(None).is_undefined());
        assert!(MetricValue::from_scalar(Some(f64::NAN)).is_undefined());
    }

    #[test]
    fn metric_value_json_shape() {
        let json = serde_json::to_string(&MetricValue::Scalar(1.5)).unwrap();
        assert_eq!(json, r#"{"kind":"scalar","value":1.5}"#);
        let json = serde_json::to_string(&MetricValue::Absent).unwrap();
        assert_eq!(json, r#"{"kind":"absent"}"#);
        let series = MetricValue::Series(MetricSeries::new(vec![None, Some(2.0)]));
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"kind":"series","value":[null,2.0]}"#);
    }
}
