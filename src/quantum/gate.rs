// src/quantum/gate.rs
//! Quantum gates and their action on state vectors

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::quantum::state::StateVector;
use crate::quantum::QuantumError;

/// The gate set used by the feature map circuits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate
    H,

    /// Pauli-X gate (NOT gate)
    X,

    /// Pauli-Z gate
    Z,

    /// Phase gate diag(1, e^{iθ})
    Phase(f64),

    /// Rotation around the Z axis
    Rz(f64),

    /// Controlled-NOT gate
    Cx,
}

impl Gate {
    /// Number of qubits the gate acts on
    pub fn qubit_count(&self) -> usize {
        match self {
            Gate::H | Gate::X | Gate::Z | Gate::Phase(_) | Gate::Rz(_) => 1,
            Gate::Cx => 2,
        }
    }

    /// Gate name for diagnostics
    pub fn name(&self) -> String {
        match self {
            Gate::H => "H".to_string(),
            Gate::X => "X".to_string(),
            Gate::Z => "Z".to_string(),
            Gate::Phase(theta) => format!("P({:.4})", theta),
            Gate::Rz(theta) => format!("Rz({:.4})", theta),
            Gate::Cx => "CX".to_string(),
        }
    }

    /// The 2x2 matrix of a single-qubit gate
    ///
    /// Returns `None` for multi-qubit gates, which are applied structurally.
    pub fn single_qubit_matrix(&self) -> Option<[[Complex64; 2]; 2]> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);

        match self {
            Gate::H => {
                let f = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
                Some([[f, f], [f, -f]])
            }
            Gate::X => Some([[zero, one], [one, zero]]),
            Gate::Z => Some([[one, zero], [zero, -one]]),
            Gate::Phase(theta) => Some([[one, zero], [zero, Complex64::from_polar(1.0, *theta)]]),
            Gate::Rz(theta) => Some([
                [Complex64::from_polar(1.0, -theta / 2.0), zero],
                [zero, Complex64::from_polar(1.0, theta / 2.0)],
            ]),
            Gate::Cx => None,
        }
    }

    /// Apply the gate in place to the specified qubits of a state vector
    pub fn apply(&self, state: &mut StateVector, qubits: &[usize]) -> Result<(), QuantumError> {
        if qubits.len() != self.qubit_count() {
            return Err(QuantumError::WrongQubitCount {
                gate: self.name(),
                expected: self.qubit_count(),
                got: qubits.len(),
            });
        }

        match self {
            Gate::Cx => state.apply_cx(qubits[0], qubits[1]),
            _ => {
                let matrix = self
                    .single_qubit_matrix()
                    .expect("single-qubit gates have a matrix");
                state.apply_single_qubit(qubits[0], &matrix)
            }
        }
    }
}
