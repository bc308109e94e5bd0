//! # Per-Symbol Neural Network Price Trainer
//!
//! Trains one feedforward neural network per stock-symbol CSV file,
//! predicting the next closing price from a rolling window of prior
//! closing prices, and persists each trained model as a JSON artifact.
//!
//! ## Modules
//!
//! - `nn` - Neural network implementation (layers, activations, training)
//! - `data` - CSV loading, cleaning, and price scaling
//! - `dataset` - Sliding-window dataset construction
//! - `indicators` - Moving averages (informational)
//! - `job` - Per-symbol training job and batch orchestration
//! - `config` - Directory and training-parameter configuration

pub mod config;
pub mod data;
pub mod dataset;
pub mod indicators;
pub mod job;
pub mod nn;

pub use config::{TrainerConfig, TrainingParams};
pub use data::{MinMaxScaler, PriceSeries};
pub use job::TrainingJob;
pub use nn::NeuralNetwork;
