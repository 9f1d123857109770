//! Regression metrics

use ndarray::Array1;

use crate::machine_learning::core::ModelError;

/// Mean squared error between true and predicted labels.
///
/// The two vectors must have equal length.
pub fn mean_squared_error(
    y_true: &Array1<f64>,
    y_pred: &Array1<f64>,
) -> Result<f64, ModelError> {
    if y_true.len() != y_pred.len() {
        return Err(ModelError::InvalidInput(format!(
            "label vectors differ in length: {} vs {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    Ok(y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / y_true.len() as f64)
}
