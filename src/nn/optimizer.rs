//! Optimization
//!
//! Adam (adaptive moment estimation), the fixed optimizer for every
//! symbol's model. The trait boundary keeps layer updates independent of
//! the concrete algorithm.

use ndarray::{Array, Array1, Array2, Dimension};
use serde::{Deserialize, Serialize};

/// Optimizer for per-layer weight updates. Each layer owns an independent
/// instance so moment estimates never mix across layers.
pub trait Optimizer: Send + Sync {
    fn update_weights(&mut self, weights: &mut Array2<f64>, gradients: &Array2<f64>);

    fn update_biases(&mut self, biases: &mut Array1<f64>, gradients: &Array1<f64>);
}

/// First and second moment estimates for one parameter tensor.
#[derive(Clone)]
struct Moments<D: Dimension> {
    m: Option<Array<f64, D>>,
    v: Option<Array<f64, D>>,
}

impl<D: Dimension> Default for Moments<D> {
    fn default() -> Self {
        Self { m: None, v: None }
    }
}

impl<D: Dimension> Moments<D> {
    /// One Adam step over `params` given `gradients` at timestep `t`.
    fn step(
        &mut self,
        params: &mut Array<f64, D>,
        gradients: &Array<f64, D>,
        t: i32,
        learning_rate: f64,
        beta1: f64,
        beta2: f64,
        epsilon: f64,
    ) {
        let m = self
            .m
            .get_or_insert_with(|| Array::zeros(params.raw_dim()));
        let v = self
            .v
            .get_or_insert_with(|| Array::zeros(params.raw_dim()));

        *m = &*m * beta1 + gradients * (1.0 - beta1);
        *v = &*v * beta2 + &(gradients * gradients) * (1.0 - beta2);

        let m_hat = &*m / (1.0 - beta1.powi(t));
        let v_hat = &*v / (1.0 - beta2.powi(t));

        *params = &*params - &(&m_hat * learning_rate / &(v_hat.mapv(f64::sqrt) + epsilon));
    }
}

/// Adam optimizer.
#[derive(Clone, Serialize, Deserialize)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    #[serde(skip)]
    t: i32,
    #[serde(skip)]
    weight_moments: Moments<ndarray::Ix2>,
    #[serde(skip)]
    bias_moments: Moments<ndarray::Ix1>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            weight_moments: Moments::default(),
            bias_moments: Moments::default(),
        }
    }
}

impl Optimizer for Adam {
    fn update_weights(&mut self, weights: &mut Array2<f64>, gradients: &Array2<f64>) {
        // The weight update opens each timestep; the bias update reuses it.
        self.t += 1;
        self.weight_moments.step(
            weights,
            gradients,
            self.t,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
        );
    }

    fn update_biases(&mut self, biases: &mut Array1<f64>, gradients: &Array1<f64>) {
        let t = self.t.max(1);
        self.bias_moments.step(
            biases,
            gradients,
            t,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
        );
    }

}
