//! Dense (Fully Connected) Layer
//!
//! Performs `output = activation(input @ weights + bias)` and caches the
//! values needed for backpropagation.

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

use super::activation::{create_activation, ActivationType};

#[derive(Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weight matrix (input_size x output_size)
    pub weights: Array2<f64>,
    /// Bias vector (output_size)
    pub biases: Array1<f64>,
    pub activation_type: ActivationType,
    pub input_size: usize,
    pub output_size: usize,

    // Cached values for backpropagation (not serialized)
    #[serde(skip)]
    last_input: Option<Array2<f64>>,
    #[serde(skip)]
    last_z: Option<Array2<f64>>,
}

impl DenseLayer {
    /// Create a new dense layer with Xavier initialization.
    pub fn new(input_size: usize, output_size: usize, activation: ActivationType) -> Self {
        let limit = (6.0 / (input_size + output_size) as f64).sqrt();
        let weights = Array2::random((input_size, output_size), Uniform::new(-limit, limit));
        let biases = Array1::zeros(output_size);

        Self {
            weights,
            biases,
            activation_type: activation,
            input_size,
            output_size,
            last_input: None,
            last_z: None,
        }
    }

    /// Forward pass for a batch of rows.
    pub fn forward(&mut self, input: &Array2<f64>) -> Array2<f64> {
        self.last_input = Some(input.clone());

        let mut z = input.dot(&self.weights);
        for mut row in z.rows_mut() {
            row += &self.biases;
        }
        self.last_z = Some(z.clone());

        create_activation(self.activation_type).forward(&z)
    }

    /// Backward pass. Returns `(input_gradient, weight_gradient, bias_gradient)`.
    ///
    /// Requires a preceding call to `forward` so the caches are populated.
    pub fn backward(&self, output_gradient: &Array2<f64>) -> (Array2<f64>, Array2<f64>, Array1<f64>) {
        let z = self
            .last_z
            .as_ref()
            .expect("forward must run before backward");
        let input = self
            .last_input
            .as_ref()
            .expect("forward must run before backward");

        let activation_grad = create_activation(self.activation_type).backward(z);
        let delta = output_gradient * &activation_grad;

        let weight_gradient = input.t().dot(&delta);
        let bias_gradient = delta.sum_axis(Axis(0));
        let input_gradient = delta.dot(&self.weights.t());

        (input_gradient, weight_gradient, bias_gradient)
    }

    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}

impl Clone for DenseLayer {
    fn clone(&self) -> Self {
        Self {
            weights: self.weights.clone(),
            biases: self.biases.clone(),
            activation_type: self.activation_type,
            input_size: self.input_size,
            output_size: self.output_size,
            last_input: None,
            last_z: None,
        }
    }
}
