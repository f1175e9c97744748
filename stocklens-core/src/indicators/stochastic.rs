//! Stochastic Oscillator (%K).
//!
//! %K = (close - lowest_low(window)) / (highest_high(window) - lowest_low(window)) * 100
//! on raw (unadjusted) close, high, and low.
//! Lookback: window - 1.
//! A flat window (highest high == lowest low) is missing, not a division fault.

use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};

pub const DEFAULT_WINDOW: usize = 14;

#[derive(Debug, Clone)]
pub struct Stochastic {
    window: usize,
    name: String,
}

impl Stochastic {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            name: format!("stochastic_k_{window}"),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        let bars = series.bars();
        let n = bars.len();
        let mut result = vec![None; n];

        if self.window == 0 || n < self.window {
            return MetricSeries::new(result);
        }

        for i in (self.window - 1)..n {
            let window = &bars[i + 1 - self.window..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let range = highest - lowest;

            if range > 0.0 {
                result[i] = Some((bars[i].close - lowest) / range * 100.0);
            }
        }

        MetricSeries::new(result)
    }
}

/// %K over a trailing window of bars.
pub fn stochastic_oscillator(series: &PriceSeries, window: usize) -> MetricSeries {
    Stochastic::new(window).compute(series)
}
