//! Feedforward Regressor
//!
//! A dense network producing one scalar prediction per input row, trained
//! with mean-squared-error loss and Adam over shuffled mini-batches.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};

use super::activation::ActivationType;
use super::layer::DenseLayer;
use super::optimizer::{Adam, Optimizer};

/// Feedforward neural network with a single scalar output.
pub struct NeuralNetwork {
    layers: Vec<DenseLayer>,
    optimizers: Vec<Box<dyn Optimizer>>,
}

/// On-disk representation of a trained model.
#[derive(Serialize, Deserialize)]
struct ModelFile {
    layers: Vec<DenseLayer>,
}

impl NeuralNetwork {
    /// Build the fixed price regressor: `input_size` inputs, one hidden
    /// ReLU layer of `hidden_units`, one linear output unit.
    pub fn regressor(input_size: usize, hidden_units: usize, learning_rate: f64) -> Self {
        let layers = vec![
            DenseLayer::new(input_size, hidden_units, ActivationType::ReLU),
            DenseLayer::new(hidden_units, 1, ActivationType::Linear),
        ];
        Self::with_adam(layers, learning_rate)
    }

    fn with_adam(layers: Vec<DenseLayer>, learning_rate: f64) -> Self {
        let optimizers: Vec<Box<dyn Optimizer>> = layers
            .iter()
            .map(|_| Box::new(Adam::new(learning_rate)) as Box<dyn Optimizer>)
            .collect();
        Self { layers, optimizers }
    }

    /// Input dimension expected by the first layer.
    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size).unwrap_or(0)
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.num_parameters()).sum()
    }

    fn forward(&mut self, input: &Array2<f64>) -> Array2<f64> {
        let mut output = input.clone();
        for layer in &mut self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Scalar predictions for a batch of input rows.
    pub fn predict(&mut self, input: &Array2<f64>) -> Array1<f64> {
        self.forward(input).column(0).to_owned()
    }

    /// Mean squared error between predictions and targets.
    fn mse(predictions: &Array2<f64>, targets: &Array2<f64>) -> f64 {
        let diff = predictions - targets;
        (&diff * &diff).sum() / predictions.len() as f64
    }

    fn backward(&mut self, predictions: &Array2<f64>, targets: &Array2<f64>) {
        let n = predictions.nrows() as f64;
        let mut gradient = 2.0 * (predictions - targets) / n;

        for i in (0..self.layers.len()).rev() {
            let (input_grad, weight_grad, bias_grad) = self.layers[i].backward(&gradient);
            self.optimizers[i].update_weights(&mut self.layers[i].weights, &weight_grad);
            self.optimizers[i].update_biases(&mut self.layers[i].biases, &bias_grad);
            gradient = input_grad;
        }
    }

    fn train_epoch(
        &mut self,
        x_train: &Array2<f64>,
        y_train: &Array2<f64>,
        batch_size: usize,
    ) -> f64 {
        let n_samples = x_train.nrows();
        let batch_size = batch_size.max(1);
        let n_batches = (n_samples + batch_size - 1) / batch_size;

        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(&mut rand::thread_rng());

        let mut total_loss = 0.0;
        for batch_idx in 0..n_batches {
            let start = batch_idx * batch_size;
            let end = (start + batch_size).min(n_samples);
            let batch_indices = &indices[start..end];

            let x_batch = x_train.select(Axis(0), batch_indices);
            let y_batch = y_train.select(Axis(0), batch_indices);

            let predictions = self.forward(&x_batch);
            total_loss += Self::mse(&predictions, &y_batch);
            self.backward(&predictions, &y_batch);
        }

        total_loss / n_batches as f64
    }

    /// Train on `(x_train, y_train)` for a fixed number of epochs.
    ///
    /// Silent at the console; per-epoch losses are logged at debug level
    /// and returned for inspection.
    pub fn train(
        &mut self,
        x_train: &Array2<f64>,
        y_train: &Array1<f64>,
        epochs: usize,
        batch_size: usize,
    ) -> Vec<f64> {
        let targets = to_column(y_train);
        let mut losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let loss = self.train_epoch(x_train, &targets, batch_size);
            debug!("epoch {}/{}: loss = {:.6}", epoch + 1, epochs, loss);
            losses.push(loss);
        }

        losses
    }

    /// Mean squared error on a held-out set.
    pub fn evaluate(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> f64 {
        let predictions = self.forward(x);
        Self::mse(&predictions, &to_column(y))
    }

    /// Save the trained model as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create model file {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(
            writer,
            &ModelFile {
                layers: self.layers.clone(),
            },
        )
        .with_context(|| format!("Failed to serialize model to {}", path.display()))?;
        Ok(())
    }

    /// Load a previously saved model. The optimizer state is not persisted;
    /// a loaded model gets fresh Adam instances.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open model file {}", path.display()))?;
        let reader = BufReader::new(file);
        let model: ModelFile = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to deserialize model from {}", path.display()))?;
        Ok(Self::with_adam(model.layers, 0.001))
    }
}

fn to_column(values: &Array1<f64>) -> Array2<f64> {
    values.clone().insert_axis(Axis(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regressor_shape() {
        let mut network = NeuralNetwork::regressor(100, 100, 0.001);
        assert_eq!(network.input_size(), 100);
        assert_eq!(network.num_parameters(), 100 * 100 + 100 + 100 + 1);

        let input = Array2::ones((5, 100));
        let output = network.predict(&input);
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn test_training_reduces_loss() {
        let mut network = NeuralNetwork::regressor(4, 8, 0.01);

        // y = mean of the four inputs
        let x = Array2::from_shape_fn((64, 4), |(i, j)| ((i * 7 + j * 3) % 10) as f64 / 10.0);
        let y = Array1::from_shape_fn(64, |i| x.row(i).sum() / 4.0);

        let initial = network.evaluate(&x, &y);
        network.train(&x, &y, 200, 16);
        let trained = network.evaluate(&x, &y);

        assert!(trained < initial);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut network = NeuralNetwork::regressor(6, 4, 0.001);
        let input = Array2::from_shape_fn((3, 6), |(i, j)| (i + j) as f64 / 5.0);
        let before = network.predict(&input);

        network.save(&path).unwrap();
        let mut restored = NeuralNetwork::load(&path).unwrap();
        let after = restored.predict(&input);

        for (a, b) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
