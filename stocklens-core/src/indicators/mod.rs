//! Trend indicators and oscillators.
//!
//! Every indicator is a pure function of a price series producing a
//! `MetricSeries` of the same length. Positions without enough history are
//! missing, never zero. Each indicator is available both as a struct
//! implementing [`Indicator`] and as a free function with the window as an
//! argument.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use bollinger::{bollinger_bands, Bollinger, BollingerBand};
pub use ema::{ema, ema_of_values, Ema};
pub use macd::{macd, Macd};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};
pub use stochastic::{stochastic_oscillator, Stochastic};

use crate::domain::{MetricSeries, PriceSeries};

/// A named transform from price history to a position-aligned series.
///
/// No output value at position t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading positions that are always missing.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    fn compute(&self, series: &PriceSeries) -> MetricSeries;
}

/// Build a series from adjusted closes for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0 clamped
/// positive, volume = 1000, one bar per calendar day from 2024-01-02.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    use crate::domain::test_bars::day;
    use crate::domain::PriceBar;
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: day(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                adjusted_close: close,
                volume: 1000,
            }
        })
        .collect();
    PriceSeries::new("TEST", bars).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
