//! Bollinger Bands: moving average +/- a multiple of the rolling stddev.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(adjusted close, window)
//! - Upper: middle + mult * stddev(adjusted close, window)
//! - Lower: middle - mult * stddev(adjusted close, window)
//!
//! Uses sample stddev (divide by N - 1) over the same trailing window as the
//! SMA, so a window of 1 leaves the outer bands missing.
//! Lookback: window - 1.

use super::Indicator;
use crate::domain::{MetricSeries, PriceSeries};
use crate::stats;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn new(band: BollingerBand, window: usize, multiplier: f64) -> Self {
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            window,
            multiplier,
            band,
            name: format!("bollinger_{label}_{window}"),
        }
    }

    pub fn upper(window: usize) -> Self {
        Self::new(BollingerBand::Upper, window, DEFAULT_MULTIPLIER)
    }

    pub fn middle(window: usize) -> Self {
        Self::new(BollingerBand::Middle, window, DEFAULT_MULTIPLIER)
    }

    pub fn lower(window: usize) -> Self {
        Self::new(BollingerBand::Lower, window, DEFAULT_MULTIPLIER)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, series: &PriceSeries) -> MetricSeries {
        let closes = series.adjusted_closes();
        let n = closes.len();
        let mut result = vec![None; n];

        if self.window == 0 || n < self.window {
            return MetricSeries::new(result);
        }

        for i in (self.window - 1)..n {
            let window = &closes[i + 1 - self.window..=i];
            let Some(mean) = stats::mean(window) else {
                continue;
            };

            result[i] = match self.band {
                BollingerBand::Middle => Some(mean),
                BollingerBand::Upper => {
                    stats::sample_std(window).map(|sd| mean + self.multiplier * sd)
                }
                BollingerBand::Lower => {
                    stats::sample_std(window).map(|sd| mean - self.multiplier * sd)
                }
            };
        }

        MetricSeries::new(result)
    }
}

/// Upper and lower bands at two sample standard deviations around SMA(window).
pub fn bollinger_bands(series: &PriceSeries, window: usize) -> (MetricSeries, MetricSeries) {
    (
        Bollinger::upper(window).compute(series),
        Bollinger::lower(window).compute(series),
    )
}
