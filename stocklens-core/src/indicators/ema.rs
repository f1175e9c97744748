//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * price[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (span + 1).
//! Seed: EMA[0] = price[0], so every position is defined (no warmup gap).
//! Lookback: 0.

use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        MetricSeries::new(ema_of_values(&series.adjusted_closes(), self.span))
    }
}

/// Exponential moving average of adjusted closes with the given span.
pub fn ema(series: &PriceSeries, span: usize) -> MetricSeries {
    Ema::new(span).compute(series)
}

/// EMA over a pre-extracted slice. A zero span yields all-missing output.
pub fn ema_of_values(values: &[f64], span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        result.push(Some(next));
        prev = Some(next);
    }

    result
}
