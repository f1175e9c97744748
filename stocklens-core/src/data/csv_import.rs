//! CSV price history import.
//!
//! Reads the column layout produced by common vendor exports:
//! `Date,Open,High,Low,Close,Adj Close,Volume`. `Adj Close` is optional and
//! falls back to `Close` when the column is absent or blank. Rows whose
//! fields are all blank (non-trading days in some exports) are skipped.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::{check_range, FetchError, PriceProvider};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open", default)]
    open: Option<f64>,
    #[serde(rename = "High", default)]
    high: Option<f64>,
    #[serde(rename = "Low", default)]
    low: Option<f64>,
    #[serde(rename = "Close", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
    // some exports write volume as a float ("1234.0")
    #[serde(rename = "Volume", default)]
    volume: Option<f64>,
}

impl CsvRow {
    fn is_blank(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }
}

/// Load a full price history from a CSV file.
pub fn load_csv(path: &Path, symbol: &str) -> Result<PriceSeries, FetchError> {
    let path_str = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(&path_str, e))?;

    let mut bars = Vec::new();
    let mut skipped = 0usize;
    for record in reader.deserialize::<CsvRow>() {
        let row = record.map_err(|e| csv_error(&path_str, e))?;
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        // header is line 1, so data rows start at 2
        let line = bars.len() as u64 + skipped as u64 + 2;
        let bar = row_to_bar(row).map_err(|message| FetchError::Parse {
            path: path_str.clone(),
            line,
            message,
        })?;
        if !bar.is_consistent() {
            tracing::warn!(symbol, date = %bar.date, "bar high/low does not bracket open/close");
        }
        bars.push(bar);
    }

    tracing::debug!(symbol, path = %path_str, bars = bars.len(), skipped, "loaded CSV price history");
    Ok(PriceSeries::new(symbol, bars)?)
}

fn row_to_bar(row: CsvRow) -> Result<PriceBar, String> {
    let date = parse_date(&row.date)?;
    let field = |name: &str, value: Option<f64>| value.ok_or_else(|| format!("missing {name} on {date}"));
    let close = field("Close", row.close)?;
    let volume = row.volume.unwrap_or(0.0);
    if !volume.is_finite() || volume < 0.0 {
        return Err(format!("invalid Volume on {date}: {volume}"));
    }
    Ok(PriceBar {
        date,
        open: field("Open", row.open)?,
        high: field("High", row.high)?,
        low: field("Low", row.low)?,
        close,
        adjusted_close: row.adj_close.unwrap_or(close),
        volume: volume.round() as u64,
    })
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component
/// (`2024-01-02 00:00:00-05:00`), which is discarded.
fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let day_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}

fn csv_error(path: &str, e: csv::Error) -> FetchError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    match e.into_kind() {
        csv::ErrorKind::Io(source) => FetchError::Io {
            path: path.to_string(),
            source,
        },
        kind => FetchError::Parse {
            path: path.to_string(),
            line,
            message: format!("{kind:?}"),
        },
    }
}

/// Provider backed by a directory of `<SYMBOL>.csv` files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    root: PathBuf,
}

impl CsvProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path for a symbol: exact name first, then upper-cased.
    fn path_for(&self, symbol: &str) -> Option<PathBuf> {
        [symbol.to_string(), symbol.to_uppercase()]
            .into_iter()
            .map(|name| self.root.join(format!("{name}.csv")))
            .find(|p| p.is_file())
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        check_range(start, end)?;
        let path = self.path_for(symbol).ok_or_else(|| FetchError::NotFound {
            symbol: symbol.to_string(),
        })?;
        let full = load_csv(&path, symbol)?;
        Ok(full.between(start, end))
    }
}
