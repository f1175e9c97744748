//! Moving Average Convergence/Divergence (MACD line).
//!
//! MACD = EMA(fast) - EMA(slow), defaults 12 / 26. Both EMAs are defined from
//! the first bar, so the MACD line is too.

use super::ema::ema_of_values;
use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};

pub const DEFAULT_FAST_SPAN: usize = 12;
pub const DEFAULT_SLOW_SPAN: usize = 26;

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self {
            fast,
            slow,
            name: format!("macd_{fast}_{slow}"),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        let closes = series.adjusted_closes();
        let fast = MetricSeries::new(ema_of_values(&closes, self.fast));
        let slow = MetricSeries::new(ema_of_values(&closes, self.slow));
        fast.zip_with(&slow, |f, s| f - s)
    }
}

/// MACD line with the standard 12/26 spans.
pub fn macd(series: &PriceSeries) -> MetricSeries {
    Macd::default().compute(series)
}
