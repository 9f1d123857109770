//! Fidelity-based quantum kernels

use ndarray::Array2;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::machine_learning::quantum::feature_map::{FeatureMap, ZzFeatureMap};
use crate::quantum::{QuantumError, StateVector};

/// Quantum kernel evaluating state fidelities between embedded samples.
///
/// The kernel is bound to one feature map and holds no other state: the
/// similarity of two samples x and y is |⟨φ(x)|φ(y)⟩|², computed on the
/// exact statevector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: DeserializeOwned"
))]
pub struct FidelityQuantumKernel<M: FeatureMap = ZzFeatureMap> {
    feature_map: M,
}

impl Default for FidelityQuantumKernel<ZzFeatureMap> {
    fn default() -> Self {
        FidelityQuantumKernel {
            feature_map: ZzFeatureMap::default(),
        }
    }
}

impl<M: FeatureMap + Sync> FidelityQuantumKernel<M> {
    /// Create a kernel bound to the given feature map
    pub fn new(feature_map: M) -> Self {
        FidelityQuantumKernel { feature_map }
    }

    pub fn feature_map(&self) -> &M {
        &self.feature_map
    }

    /// Kernel value between two samples
    pub fn evaluate(
        &self,
        x: ndarray::ArrayView1<f64>,
        y: ndarray::ArrayView1<f64>,
    ) -> Result<f64, QuantumError> {
        let sx = self.feature_map.evolve(x)?;
        let sy = self.feature_map.evolve(y)?;
        sx.fidelity(&sy)
    }

    /// Symmetric kernel matrix over the rows of a sample matrix.
    ///
    /// Embedded states are prepared once per sample and pairs are evaluated
    /// in parallel; the diagonal is exactly one on the statevector.
    pub fn evaluate_matrix(&self, samples: &Array2<f64>) -> Result<Array2<f64>, QuantumError> {
        let states = self.embed_rows(samples)?;
        let n = states.len();

        let rows: Result<Vec<Vec<f64>>, QuantumError> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut row = vec![0.0; n];
                for (j, row_j) in row.iter_mut().enumerate().skip(i) {
                    *row_j = if i == j {
                        1.0
                    } else {
                        states[i].fidelity(&states[j])?
                    };
                }
                Ok(row)
            })
            .collect();
        let rows = rows?;

        let mut matrix = Array2::zeros((n, n));
        for (i, row) in rows.iter().enumerate() {
            for j in i..n {
                matrix[[i, j]] = row[j];
                matrix[[j, i]] = row[j];
            }
        }

        Ok(matrix)
    }

    /// Rectangular kernel matrix between two sample matrices.
    ///
    /// Entry (i, j) is the kernel value between row i of `x` and row j of `y`.
    pub fn evaluate_cross(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
    ) -> Result<Array2<f64>, QuantumError> {
        let states_x = self.embed_rows(x)?;
        let states_y = self.embed_rows(y)?;

        let rows: Result<Vec<Vec<f64>>, QuantumError> = states_x
            .par_iter()
            .map(|sx| states_y.iter().map(|sy| sx.fidelity(sy)).collect())
            .collect();
        let rows = rows?;

        let mut matrix = Array2::zeros((states_x.len(), states_y.len()));
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }

        Ok(matrix)
    }

    fn embed_rows(&self, samples: &Array2<f64>) -> Result<Vec<StateVector>, QuantumError> {
        samples
            .outer_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|row| self.feature_map.evolve(row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn sample_matrix() -> Array2<f64> {
        array![[0.1, 0.4], [-0.6, 0.8], [1.2, -0.3], [0.0, 0.0]]
    }

    #[test]
    fn kernel_of_sample_with_itself_is_one() {
        let kernel = FidelityQuantumKernel::default();
        let x = array![0.25, -0.75];
        let value = kernel.evaluate(x.view(), x.view()).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kernel_matrix_is_symmetric_with_unit_diagonal() {
        let kernel = FidelityQuantumKernel::default();
        let samples = sample_matrix();
        let matrix = kernel.evaluate_matrix(&samples).unwrap();

        for i in 0..samples.nrows() {
            assert!((matrix[[i, i]] - 1.0).abs() < 1e-12);
            for j in 0..samples.nrows() {
                assert!((matrix[[i, j]] - matrix[[j, i]]).abs() < 1e-12);
                assert!(matrix[[i, j]] >= 0.0 && matrix[[i, j]] <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn matrix_entries_match_pairwise_evaluation() {
        let kernel = FidelityQuantumKernel::default();
        let samples = sample_matrix();
        let matrix = kernel.evaluate_matrix(&samples).unwrap();

        for i in 0..samples.nrows() {
            for j in 0..samples.nrows() {
                let direct = kernel
                    .evaluate(samples.row(i), samples.row(j))
                    .unwrap();
                assert!((matrix[[i, j]] - direct).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn cross_matrix_has_query_by_train_shape() {
        let kernel = FidelityQuantumKernel::default();
        let train = sample_matrix();
        let test = array![[0.5, 0.5]];
        let cross = kernel.evaluate_cross(&test, &train).unwrap();
        assert_eq!(cross.shape(), &[1, 4]);

        for j in 0..train.nrows() {
            let direct = kernel.evaluate(test.row(0), train.row(j)).unwrap();
            assert!((cross[[0, j]] - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn mismatched_feature_dimension_is_an_error() {
        let kernel = FidelityQuantumKernel::default();
        let x = array![0.1, 0.2, 0.3];
        let y = array![0.1, 0.2];
        assert!(kernel.evaluate(x.view(), y.view()).is_err());
    }
}
