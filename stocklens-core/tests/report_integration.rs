//! Integration tests for report assembly: worked examples and the CSV fixture
//! pipeline (fixture -> provider -> report).

use chrono::NaiveDate;
use std::path::PathBuf;
use stocklens_core::data::{CsvProvider, FetchError, PriceProvider};
use stocklens_core::indicators::{sma, stochastic_oscillator};
use stocklens_core::report::keys;
use stocklens_core::returns::daily_return;
use stocklens_core::{
    compute_full_report, compute_full_report_with_rate, InputError, MetricValue, PriceBar,
    PriceSeries, ReportConfig,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series_from(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: d(2024, 1, 2) + chrono::Days::new(i as u64),
            open: close,
            high: close,
            low: close,
            close,
            adjusted_close: close,
            volume: 500,
        })
        .collect();
    PriceSeries::new("EX", bars).unwrap()
}

fn assert_close(actual: Option<f64>, expected: f64, eps: f64) {
    let actual = actual.expect("expected a defined value");
    assert!(
        (actual - expected).abs() < eps,
        "actual={actual}, expected={expected}"
    );
}

fn load_pair() -> (PriceSeries, PriceSeries) {
    let provider = CsvProvider::new(fixture_dir());
    let start = d(2024, 1, 1);
    let end = d(2024, 12, 31);
    let stock = provider.fetch("AAPL", start, end).unwrap();
    let market = provider.fetch("SPY", start, end).unwrap();
    (stock, market)
}

// ── Worked examples ──────────────────────────────────────────────────

#[test]
fn five_bar_example_returns_and_sma() {
    let series = series_from(&[100.0, 102.0, 101.0, 105.0, 110.0]);

    let returns = daily_return(&series);
    let r = returns.values();
    assert_eq!(r.get(0), None);
    assert_close(r.get(1), 0.02, 1e-12);
    assert_close(r.get(2), -0.00980392156862745, 1e-12);
    assert_close(r.get(3), 0.039603960396039604, 1e-12);
    assert_close(r.get(4), 0.047619047619047616, 1e-12);

    let s = sma(&series, 3);
    assert_eq!(s.get(0), None);
    assert_eq!(s.get(1), None);
    assert_close(s.get(2), 101.0, 1e-12);
    assert_close(s.get(3), 102.666_666_666_666_67, 1e-9);
    assert_close(s.get(4), 105.333_333_333_333_33, 1e-9);
}

#[test]
fn flat_window_stochastic_is_undefined() {
    let series = series_from(&[50.0, 50.0, 50.0, 50.0]);
    let k = stochastic_oscillator(&series, 4);
    assert_eq!(k.len(), 4);
    assert_eq!(k.defined_count(), 0);
}

#[test]
fn report_through_defaults_matches_helpers() {
    let series = series_from(&[100.0, 102.0, 101.0, 105.0, 110.0]);
    let report = compute_full_report_with_rate(&series, None, None).unwrap();

    let mean = (0.02 - 0.00980392156862745 + 0.039603960396039604 + 0.047619047619047616) / 4.0;
    assert_close(report.scalar(keys::MEAN_DAILY_RETURN), mean, 1e-12);
    assert_close(
        report.scalar(keys::ANNUALIZED_RETURN),
        (1.0 + mean).powf(252.0) - 1.0,
        1e-6,
    );
    // one drop from 102 to 101
    assert_close(report.scalar(keys::MAXIMUM_DRAWDOWN), 1.0 / 102.0, 1e-12);
    // a single negative return: downside deviation needs two
    assert_eq!(report.get(keys::SORTINO_RATIO), Some(&MetricValue::Undefined));
    assert!(report.scalar(keys::SHARPE_RATIO).is_some());
}

#[test]
fn non_monotonic_input_is_rejected_before_reporting() {
    let mut bars = series_from(&[10.0, 11.0, 12.0]).bars().to_vec();
    bars.swap(0, 1);
    let err = PriceSeries::new("BAD", bars).unwrap_err();
    assert!(matches!(err, InputError::NonMonotonicDates { index: 1, .. }));
}

// ── Fixture pipeline ─────────────────────────────────────────────────

#[test]
fn fixture_loads_through_provider() {
    let (stock, market) = load_pair();
    assert_eq!(stock.len(), 90);
    assert_eq!(market.len(), 90);
    assert_eq!(stock.first_date(), Some(d(2024, 1, 2)));
    for bar in stock.bars() {
        assert!(bar.is_consistent(), "fixture bar {} inconsistent", bar.date);
    }
}

#[test]
fn fixture_full_report_with_benchmark() {
    let (stock, market) = load_pair();
    let report = compute_full_report(&stock, Some(&market), &ReportConfig::default()).unwrap();

    assert_eq!(report.symbol, "AAPL");
    assert_eq!(report.benchmark_symbol.as_deref(), Some("SPY"));
    assert_eq!(report.bar_count, 90);
    assert_eq!(report.len(), keys::ALL.len());

    for key in [
        keys::MEAN_DAILY_RETURN,
        keys::DAILY_VOLATILITY,
        keys::SHARPE_RATIO,
        keys::SORTINO_RATIO,
        keys::MAXIMUM_DRAWDOWN,
        keys::BETA,
        keys::ALPHA,
        keys::R_SQUARED,
        keys::TREYNOR_RATIO,
    ] {
        assert!(report.scalar(key).is_some(), "{key} should be numeric");
    }

    let r2 = report.scalar(keys::R_SQUARED).unwrap();
    assert!((0.0..=1.0).contains(&r2));
    let rsi = report.latest(keys::RSI).unwrap();
    assert!((0.0..=100.0).contains(&rsi));

    // 90 bars: a 50-bar SMA is defined from position 49
    let sma = report.get(keys::SMA).and_then(MetricValue::as_series).unwrap();
    assert_eq!(sma.get(48), None);
    assert!(sma.get(49).is_some());
}

#[test]
fn benchmark_overlap_uses_shared_dates_only() {
    let (stock, market) = load_pair();
    // drop the first half of the benchmark: beta still computes on the overlap
    let late_market = market.between(d(2024, 3, 1), d(2024, 12, 31));
    let report = compute_full_report(&stock, Some(&late_market), &ReportConfig::default()).unwrap();
    assert!(report.scalar(keys::BETA).is_some());
}

#[test]
fn disjoint_benchmark_leaves_beta_undefined() {
    let (stock, market) = load_pair();
    let early_stock = stock.between(d(2024, 1, 1), d(2024, 1, 31));
    let late_market = market.between(d(2024, 3, 1), d(2024, 12, 31));
    let report =
        compute_full_report(&early_stock, Some(&late_market), &ReportConfig::default()).unwrap();
    assert!(report.get(keys::BETA).unwrap().is_undefined());
    assert!(report.get(keys::ALPHA).unwrap().is_undefined());
}

#[test]
fn empty_range_cannot_be_reported() {
    let provider = CsvProvider::new(fixture_dir());
    let empty = provider.fetch("AAPL", d(2030, 1, 1), d(2030, 12, 31)).unwrap();
    assert!(empty.is_empty());
    let err = compute_full_report(&empty, None, &ReportConfig::default()).unwrap_err();
    assert!(matches!(err, InputError::EmptySeries { .. }));
}

#[test]
fn unknown_symbol_is_not_found() {
    let provider = CsvProvider::new(fixture_dir());
    let err = provider.fetch("MSFT", d(2024, 1, 1), d(2024, 12, 31)).unwrap_err();
    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[test]
fn report_json_shape() {
    let (stock, _) = load_pair();
    let report = compute_full_report(&stock, None, &ReportConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["bar_count"], 90);
    assert_eq!(json["config"]["sma_window"], 50);
    assert_eq!(json["metrics"]["sharpe_ratio"]["kind"], "scalar");
    assert_eq!(json["metrics"]["sma"]["kind"], "series");
    assert_eq!(json["metrics"]["treynor_ratio"]["kind"], "absent");
}
