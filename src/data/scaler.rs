//! Price Scaling
//!
//! Min-max normalization to [0, 1] for a single price column. The scaler is
//! fitted on the train split only and the fitted transform is applied
//! unchanged to the test split, so test values may fall outside [0, 1].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Min-max scaler over one column of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Option<f64>,
    range: Option<f64>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            min: None,
            range: None,
        }
    }

    /// Fit min/max on the given values. Errors on an empty slice.
    pub fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(anyhow!("Cannot fit scaler on an empty series"));
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        // Constant series would divide by zero; map everything to 0 instead.
        self.min = Some(min);
        self.range = Some(if range.abs() < 1e-12 { 1.0 } else { range });
        Ok(())
    }

    /// Apply the fitted affine map to a slice of values.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let (min, range) = self.fitted()?;
        Ok(values.iter().map(|v| (v - min) / range).collect())
    }

    pub fn fit_transform(&mut self, values: &[f64]) -> Result<Vec<f64>> {
        self.fit(values)?;
        self.transform(values)
    }

    /// Map scaled values back to the original price scale.
    pub fn inverse_transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let (min, range) = self.fitted()?;
        Ok(values.iter().map(|v| v * range + min).collect())
    }

    fn fitted(&self) -> Result<(f64, f64)> {
        match (self.min, self.range) {
            (Some(min), Some(range)) => Ok((min, range)),
            _ => Err(anyhow!("Scaler has not been fitted")),
        }
    }
}
