//! Data Module
//!
//! Provides input handling for the trainer:
//! - Daily bar and price series structures with CSV loading and cleaning
//! - Min-max price scaling fitted on train-split statistics

mod scaler;
mod series;

pub use scaler::MinMaxScaler;
pub use series::{DailyBar, PriceSeries};
