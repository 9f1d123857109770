//! Feature maps embedding classical data into quantum states

use std::f64::consts::PI;
use std::fmt::Debug;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::quantum::{CircuitBuilder, QuantumCircuit, QuantumError, StateVector};

/// A parameterized embedding of classical vectors into quantum circuits.
///
/// Feature maps are immutable after construction: the same input always
/// produces the same circuit.
pub trait FeatureMap: Clone + Debug {
    /// Dimension of the classical input vectors
    fn feature_dimension(&self) -> usize;

    /// Number of qubits in the embedding circuit
    fn qubit_count(&self) -> usize;

    /// Build the embedding circuit for one input vector
    fn circuit(&self, x: ArrayView1<f64>) -> Result<QuantumCircuit, QuantumError>;

    /// Run the embedding circuit on the |00...0⟩ state
    fn evolve(&self, x: ArrayView1<f64>) -> Result<StateVector, QuantumError> {
        self.circuit(x)?.run()
    }
}

/// Entangling structure of the two-qubit interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entanglement {
    /// All qubit pairs (i, j) with i < j
    Full,
    /// Neighboring pairs (i, i + 1) only
    Linear,
}

/// Second-order Pauli-Z evolution feature map.
///
/// Each repetition applies a Hadamard layer, single-qubit phases 2·x_i, and
/// for every entangled pair (i, j) the diagonal two-qubit phase
/// 2·(π - x_i)(π - x_j) conjugated by CNOTs. One qubit per input feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZzFeatureMap {
    feature_dimension: usize,
    reps: usize,
    entanglement: Entanglement,
}

impl ZzFeatureMap {
    /// Create a feature map with the given input dimension and repetitions
    pub fn new(feature_dimension: usize, reps: usize) -> Self {
        ZzFeatureMap {
            feature_dimension,
            reps,
            entanglement: Entanglement::Full,
        }
    }

    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    pub fn reps(&self) -> usize {
        self.reps
    }

    pub fn entanglement(&self) -> Entanglement {
        self.entanglement
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        let n = self.feature_dimension;
        match self.entanglement {
            Entanglement::Full => (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .collect(),
            Entanglement::Linear => (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
        }
    }
}

impl Default for ZzFeatureMap {
    fn default() -> Self {
        ZzFeatureMap::new(2, 2)
    }
}

impl FeatureMap for ZzFeatureMap {
    fn feature_dimension(&self) -> usize {
        self.feature_dimension
    }

    fn qubit_count(&self) -> usize {
        self.feature_dimension
    }

    fn circuit(&self, x: ArrayView1<f64>) -> Result<QuantumCircuit, QuantumError> {
        if x.len() != self.feature_dimension {
            return Err(QuantumError::DimensionMismatch {
                expected: self.feature_dimension,
                got: x.len(),
            });
        }

        let n = self.feature_dimension;
        let mut builder = CircuitBuilder::new(n);

        for _ in 0..self.reps {
            for q in 0..n {
                builder.h(q)?;
            }
            for q in 0..n {
                builder.p(q, 2.0 * x[q])?;
            }
            for (i, j) in self.pairs() {
                let angle = 2.0 * (PI - x[i]) * (PI - x[j]);
                builder.cx(i, j)?;
                builder.p(j, angle)?;
                builder.cx(i, j)?;
            }
        }

        Ok(builder.build())
    }
}
