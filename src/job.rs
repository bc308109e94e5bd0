//! Training Job
//!
//! Per-symbol training pipeline and the batch loop over a data directory.
//! Every data-insufficiency condition is a skip-and-continue with one
//! console line; a malformed or unreadable file is logged and counted as
//! failed without aborting the rest of the batch.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::TrainerConfig;
use crate::data::{MinMaxScaler, PriceSeries};
use crate::dataset::make_windows;
use crate::indicators::latest_sma;
use crate::nn::NeuralNetwork;

/// Why a symbol was skipped. Checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no data")]
    NoData,
    #[error("insufficient data")]
    InsufficientData,
    #[error("insufficient training or testing data")]
    EmptySplit,
    #[error("insufficient data after scaling")]
    NoTrainingWindows,
}

impl SkipReason {
    /// Console message emitted when this reason skips `symbol`.
    pub fn console_line(&self, symbol: &str) -> String {
        match self {
            SkipReason::NoData => format!("No data available for {symbol}, skipping..."),
            SkipReason::InsufficientData => format!("Insufficient data for {symbol}, skipping..."),
            SkipReason::EmptySplit => {
                format!("Insufficient training or testing data for {symbol}, skipping...")
            }
            SkipReason::NoTrainingWindows => {
                format!("Insufficient data after scaling for {symbol}, skipping...")
            }
        }
    }
}

/// Result of one symbol's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Model trained and written to the given path.
    Saved(PathBuf),
    Skipped(SkipReason),
}

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub trained: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Trains one model per symbol CSV file and persists each to the model
/// directory.
pub struct TrainingJob {
    config: TrainerConfig,
}

impl TrainingJob {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Process every `*.csv` file in the data directory, one symbol at a
    /// time, in sorted filename order.
    ///
    /// Fails only if the data directory itself cannot be listed; per-file
    /// errors are logged and counted in the summary.
    pub fn run(&self) -> Result<BatchSummary> {
        fs::create_dir_all(&self.config.model_dir).with_context(|| {
            format!(
                "Failed to create model directory {}",
                self.config.model_dir.display()
            )
        })?;

        let mut files: Vec<PathBuf> = fs::read_dir(&self.config.data_dir)
            .with_context(|| {
                format!(
                    "Failed to read data directory {}",
                    self.config.data_dir.display()
                )
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        // Directory listing order is filesystem-dependent; sort for
        // reproducible runs.
        files.sort();

        info!(
            "Found {} CSV file(s) in {}",
            files.len(),
            self.config.data_dir.display()
        );

        let mut summary = BatchSummary::default();
        for path in files {
            let symbol = match symbol_from_path(&path) {
                Some(symbol) => symbol,
                None => continue,
            };

            let series = match PriceSeries::load_csv(&path, symbol.clone()) {
                Ok(series) => series,
                Err(err) => {
                    warn!("Skipping {}: {err:#}", path.display());
                    summary.failed += 1;
                    continue;
                }
            };

            match self.train_symbol(&series) {
                Ok(Outcome::Saved(_)) => summary.trained += 1,
                Ok(Outcome::Skipped(_)) => summary.skipped += 1,
                Err(err) => {
                    warn!("Training failed for {symbol}: {err:#}");
                    summary.failed += 1;
                }
            }
        }

        println!(
            "Training complete: {} trained, {} skipped, {} failed",
            summary.trained, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Run the full pipeline for one symbol: clean series in, trained model
    /// artifact out, or a skip reason.
    ///
    /// Prints the start line and either the skip reason or the save
    /// confirmation; never fails on data insufficiency.
    pub fn train_symbol(&self, series: &PriceSeries) -> Result<Outcome> {
        let symbol = &series.symbol;
        let params = &self.config.params;
        println!("Processing {symbol}...");

        // A zero-row input table is "no data"; a table emptied (or left too
        // short) by row cleaning is "insufficient data".
        if series.raw_rows == 0 {
            return Ok(self.skip(symbol, SkipReason::NoData));
        }
        if series.len() < params.lookback {
            return Ok(self.skip(symbol, SkipReason::InsufficientData));
        }

        let closes = series.close_prices();

        // Informational only; the training path does not consume these.
        if let Some(ma100) = latest_sma(&closes, 100) {
            debug!("{symbol}: MA100 = {ma100:.4}");
        }
        if let Some(ma200) = latest_sma(&closes, 200) {
            debug!("{symbol}: MA200 = {ma200:.4}");
        }

        // Chronological split before scaling, so no test statistics leak
        // into the fitted transform.
        let train_size = (closes.len() as f64 * params.train_fraction) as usize;
        let (train_close, test_close) = closes.split_at(train_size);
        if train_close.is_empty() || test_close.is_empty() {
            return Ok(self.skip(symbol, SkipReason::EmptySplit));
        }

        let mut scaler = MinMaxScaler::new();
        let train_scaled = scaler.fit_transform(train_close)?;
        let test_scaled = scaler.transform(test_close)?;

        let (x_train, y_train) = make_windows(&train_scaled, params.lookback);
        let (x_test, y_test) = make_windows(&test_scaled, params.lookback);
        if x_train.nrows() == 0 {
            return Ok(self.skip(symbol, SkipReason::NoTrainingWindows));
        }

        debug!(
            "{symbol}: {} train samples, {} test samples, lookback {}",
            x_train.nrows(),
            x_test.nrows(),
            params.lookback
        );

        let mut model =
            NeuralNetwork::regressor(params.lookback, params.hidden_units, params.learning_rate);
        let losses = model.train(&x_train, &y_train, params.epochs, params.batch_size);
        if let Some(final_loss) = losses.last() {
            info!("{symbol}: final training loss {final_loss:.6}");
        }
        if x_test.nrows() > 0 {
            info!("{symbol}: test MSE {:.6}", model.evaluate(&x_test, &y_test));
        }

        fs::create_dir_all(&self.config.model_dir).with_context(|| {
            format!(
                "Failed to create model directory {}",
                self.config.model_dir.display()
            )
        })?;
        let path = self.config.model_path(symbol);
        model.save(&path)?;
        println!("Model for {symbol} saved as {symbol}_nn.json");

        Ok(Outcome::Saved(path))
    }

    fn skip(&self, symbol: &str, reason: SkipReason) -> Outcome {
        println!("{}", reason.console_line(symbol));
        Outcome::Skipped(reason)
    }
}

/// Symbol identifier from a file name: everything before the first dot.
fn symbol_from_path(path: &std::path::Path) -> Option<String> {
    path.file_name()?
        .to_str()?
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
