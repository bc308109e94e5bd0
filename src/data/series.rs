//! Daily Price Series
//!
//! CSV-backed per-symbol time series. Loading locates columns by header
//! name, drops incomplete rows, and sorts by date so downstream splits are
//! chronological regardless of file or directory ordering.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Time series of daily bars for one symbol, sorted by date ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
    /// Rows present in the input before cleaning. A zero-row input is a
    /// different condition than a table emptied by cleaning, and the two
    /// get different skip messages downstream.
    pub raw_rows: usize,
}

impl PriceSeries {
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
            raw_rows: 0,
        }
    }

    pub fn with_bars(symbol: String, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let raw_rows = bars.len();
        Self {
            symbol,
            bars,
            raw_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in chronological order.
    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Load a symbol's series from a CSV file.
    ///
    /// The file must carry `Date`, `Open`, `High`, `Low`, `Close`, and
    /// `Volume` headers (any column order). Rows with empty or unparsable
    /// fields are dropped; a missing required header is an error.
    pub fn load_csv(path: &Path, symbol: String) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let columns = ColumnIndices::from_headers(
            reader
                .headers()
                .with_context(|| format!("Failed to read headers from {}", path.display()))?,
        )?;

        let mut bars = Vec::new();
        let mut raw_rows = 0;
        for result in reader.records() {
            let record = result
                .with_context(|| format!("Failed to read a record from {}", path.display()))?;
            raw_rows += 1;
            if let Some(bar) = columns.parse_row(&record) {
                bars.push(bar);
            }
        }

        let mut series = Self::with_bars(symbol, bars);
        series.raw_rows = raw_rows;
        Ok(series)
    }
}

/// Positions of the required columns within a CSV header row.
struct ColumnIndices {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("CSV is missing required column '{name}'"))
        };

        Ok(Self {
            date: find("Date")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
            volume: find("Volume")?,
        })
    }

    /// Parse one record into a bar, or `None` if any field is missing or
    /// unparsable. This is the row-cleaning step.
    fn parse_row(&self, record: &csv::StringRecord) -> Option<DailyBar> {
        let date = parse_date(record.get(self.date)?)?;
        let open = parse_value(record.get(self.open)?)?;
        let high = parse_value(record.get(self.high)?)?;
        let low = parse_value(record.get(self.low)?)?;
        let close = parse_value(record.get(self.close)?)?;
        let volume = parse_value(record.get(self.volume)?)?;

        Some(DailyBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(field, "%m/%d/%Y"))
        .ok()
}

fn parse_value(field: &str) -> Option<f64> {
    let value: f64 = field.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
