//! StockLens Core: price domain types, indicators, risk metrics, and reports.
//!
//! This crate contains the calculation engine:
//! - Domain types (bars, price series, return series, metric values)
//! - Return statistics annualized over 252 trading days
//! - Technical indicators (SMA, EMA, MACD, Bollinger Bands, RSI, Stochastic)
//! - Risk and benchmark-relative metrics (Sharpe, Sortino, beta, alpha, drawdown)
//! - Full report assembly keyed by stable metric names
//! - Price history providers (CSV import)
//!
//! Calculations never perform I/O. Callers fetch a [`PriceSeries`] through a
//! [`data::PriceProvider`] (or build one directly) and pass it in.

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod report;
pub mod returns;
pub mod risk;
pub mod stats;

pub use config::{ConfigError, ReportConfig};
pub use domain::{MetricSeries, MetricValue, PriceBar, PriceSeries, ReturnSeries};
pub use error::InputError;
pub use report::{compute_full_report, compute_full_report_with_rate, MetricsReport};
