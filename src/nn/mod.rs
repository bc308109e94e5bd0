//! Neural Network Module
//!
//! Building blocks for the feedforward price regressor:
//! - Activation functions (ReLU, Linear)
//! - Dense layers with forward and backward propagation
//! - Adam optimizer
//! - Full network with mini-batch training and JSON persistence

mod activation;
mod layer;
mod network;
mod optimizer;

pub use activation::{Activation, ActivationType};
pub use layer::DenseLayer;
pub use network::NeuralNetwork;
pub use optimizer::{Adam, Optimizer};
