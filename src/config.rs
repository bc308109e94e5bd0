//! Trainer Configuration
//!
//! Explicit configuration for the batch trainer: where to read symbol CSV
//! files, where to write model artifacts, and the fixed training policy.

use std::path::PathBuf;

/// Fixed training policy applied to every symbol.
///
/// The defaults mirror the production policy: a 100-bar lookback window,
/// chronological 80/20 split, one hidden layer of 100 units, 10 epochs of
/// Adam at batch size 32.
#[derive(Debug, Clone)]
pub struct TrainingParams {
    /// Number of prior closes fed to the network as one input row.
    pub lookback: usize,
    /// Fraction of rows (by position) assigned to the train split.
    pub train_fraction: f64,
    /// Hidden layer width.
    pub hidden_units: usize,
    /// Training epochs per symbol.
    pub epochs: usize,
    /// Mini-batch size.
    pub batch_size: usize,
    /// Adam learning rate.
    pub learning_rate: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            lookback: 100,
            train_fraction: 0.8,
            hidden_units: 100,
            epochs: 10,
            batch_size: 32,
            learning_rate: 0.001,
        }
    }
}

/// Directories and policy for one batch run.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Directory scanned for `<symbol>.csv` files.
    pub data_dir: PathBuf,
    /// Directory receiving `<symbol>_nn.json` artifacts; created if absent.
    pub model_dir: PathBuf,
    pub params: TrainingParams,
}

impl TrainerConfig {
    pub fn new(data_dir: impl Into<PathBuf>, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            model_dir: model_dir.into(),
            params: TrainingParams::default(),
        }
    }

    pub fn with_params(mut self, params: TrainingParams) -> Self {
        self.params = params;
        self
    }

    /// Artifact path for one symbol's trained model.
    pub fn model_path(&self, symbol: &str) -> PathBuf {
        self.model_dir.join(format!("{symbol}_nn.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let params = TrainingParams::default();
        assert_eq!(params.lookback, 100);
        assert_eq!(params.epochs, 10);
        assert_eq!(params.batch_size, 32);
        assert!((params.train_fraction - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_model_path() {
        let config = TrainerConfig::new("data", "models/neural_network");
        assert_eq!(
            config.model_path("AAPL"),
            PathBuf::from("models/neural_network/AAPL_nn.json")
        );
    }
}
