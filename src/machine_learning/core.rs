//! Core traits and error types for machine learning models

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::quantum::QuantumError;

/// Errors that can occur in machine learning models
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The model was used before `fit` was called
    #[error("model must be fitted before prediction")]
    NotFitted,

    /// Input data is malformed or inconsistent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The training procedure could not complete
    #[error("training failed: {0}")]
    TrainingError(String),

    /// Error raised while evaluating the quantum kernel
    #[error("kernel evaluation failed: {0}")]
    Kernel(#[from] QuantumError),
}

/// Supervised model mapping samples to continuous labels
pub trait Regressor {
    /// Train the model on a matrix of samples (one row each) and a label vector
    fn fit(&mut self, samples: &Array2<f64>, labels: &Array1<f64>) -> Result<(), ModelError>;

    /// Predict labels for a matrix of samples
    fn predict(&self, samples: &Array2<f64>) -> Result<Array1<f64>, ModelError>;

    /// Whether the model has been fitted
    fn is_fitted(&self) -> bool;
}
