//! Relative Strength Index (RSI).
//!
//! Per-step gain = max(change, 0), loss = max(-change, 0) on adjusted close.
//! avg_gain / avg_loss are simple trailing means over the last `window`
//! changes; RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: window (the first change exists at index 1).
//! Edge cases: avg_loss == 0 → 100 (RS → ∞); no movement at all → missing.

use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};

pub const DEFAULT_WINDOW: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
    name: String,
}

impl Rsi {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            name: format!("rsi_{window}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        let closes = series.adjusted_closes();
        let n = closes.len();
        let mut result = vec![None; n];

        if self.window == 0 || n < self.window + 1 {
            return MetricSeries::new(result);
        }

        // gains[i] / losses[i] describe the change from i-1 to i; index 0 unused
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = closes[i] - closes[i - 1];
            gains[i] = change.max(0.0);
            losses[i] = (-change).max(0.0);
        }

        // direct sums: a window with no losses must total exactly zero
        for i in self.window..n {
            let start = i + 1 - self.window;
            let gain_sum: f64 = gains[start..=i].iter().sum();
            let loss_sum: f64 = losses[start..=i].iter().sum();
            result[i] = rsi_value(gain_sum, loss_sum, self.window);
        }

        MetricSeries::new(result)
    }
}

/// RSI over `window` price changes of adjusted close.
pub fn rsi(series: &PriceSeries, window: usize) -> MetricSeries {
    Rsi::new(window).compute(series)
}

fn rsi_value(gain_sum: f64, loss_sum: f64, window: usize) -> Option<f64> {
    let avg_gain = gain_sum / window as f64;
    let avg_loss = loss_sum / window as f64;

    if avg_loss == 0.0 && avg_gain == 0.0 {
        None // 0/0: no movement in the window
    } else if avg_loss == 0.0 {
        Some(100.0)
    } else {
        let rs = avg_gain / avg_loss;
        Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
    }
}
