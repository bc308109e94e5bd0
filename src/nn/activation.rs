//! Activation Functions
//!
//! The regressor needs exactly two activations: rectified-linear for the
//! hidden layer and identity for the scalar output.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Types of activation functions available
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivationType {
    /// Rectified Linear Unit: max(0, x)
    ReLU,
    /// Linear (identity): x
    Linear,
}

/// Activation function with forward pass and derivative for backpropagation.
pub trait Activation: Send + Sync {
    fn forward(&self, z: &Array2<f64>) -> Array2<f64>;

    /// Derivative evaluated at the pre-activation values.
    fn backward(&self, z: &Array2<f64>) -> Array2<f64>;
}

pub struct ReLU;

impl Activation for ReLU {
    fn forward(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| v.max(0.0))
    }

    fn backward(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
    }
}

pub struct Linear;

impl Activation for Linear {
    fn forward(&self, z: &Array2<f64>) -> Array2<f64> {
        z.clone()
    }

    fn backward(&self, z: &Array2<f64>) -> Array2<f64> {
        Array2::ones(z.dim())
    }
}

/// Create an activation function from its type tag.
pub fn create_activation(activation_type: ActivationType) -> Box<dyn Activation> {
    match activation_type {
        ActivationType::ReLU => Box::new(ReLU),
        ActivationType::Linear => Box::new(Linear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_relu_forward() {
        let z = array![[-1.0, 0.0], [1.0, 2.0]];
        let out = ReLU.forward(&z);
        assert_eq!(out, array![[0.0, 0.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_relu_backward() {
        let z = array![[-1.0, 0.5]];
        let grad = ReLU.backward(&z);
        assert_eq!(grad, array![[0.0, 1.0]]);
    }

    #[test]
    fn test_linear_is_identity() {
        let z = array![[-3.0, 4.0]];
        assert_eq!(Linear.forward(&z), z);
        assert_eq!(Linear.backward(&z), array![[1.0, 1.0]]);
    }
}
