//! Simple Moving Average (SMA).
//!
//! Rolling mean of adjusted close prices over a trailing window.
//! Lookback: window - 1 (first defined value at index window-1).

use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    name: String,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            name: format!("sma_{window}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        MetricSeries::new(rolling_mean(&series.adjusted_closes(), self.window))
    }
}

/// Trailing `window`-bar mean of adjusted closes.
pub fn sma(series: &PriceSeries, window: usize) -> MetricSeries {
    Sma::new(window).compute(series)
}

/// Rolling mean over raw values; missing until the window is full.
/// A zero window yields an all-missing result.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window == 0 || n < window {
        return result;
    }

    // Initial window sum
    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    // Roll the window forward
    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}
