// src/quantum/mod.rs
//! Quantum computing primitives
//!
//! This module implements the statevector representation of quantum states,
//! the gate set needed by the feature maps, and circuits built from them.

pub mod state;
pub mod gate;
pub mod circuit;

pub use state::StateVector;
pub use gate::Gate;
pub use circuit::{CircuitBuilder, QuantumCircuit};

use thiserror::Error;

/// Errors raised by the quantum layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// A qubit index exceeds the register size
    #[error("qubit index {qubit} out of range for {qubit_count}-qubit register")]
    QubitOutOfRange { qubit: usize, qubit_count: usize },

    /// The amplitude vector has the wrong length for the qubit count
    #[error("state dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The amplitude vector is not normalized
    #[error("state vector is not normalized (|psi|^2 = {norm_sqr})")]
    NotNormalized { norm_sqr: f64 },

    /// A basis state index exceeds the Hilbert space dimension
    #[error("basis state index {index} out of range for {qubit_count}-qubit state")]
    BasisIndexOutOfRange { index: usize, qubit_count: usize },

    /// A gate was applied to the wrong number of qubits
    #[error("gate {gate} acts on {expected} qubit(s), but {got} were specified")]
    WrongQubitCount {
        gate: String,
        expected: usize,
        got: usize,
    },
}
