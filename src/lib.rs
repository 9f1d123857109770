//! Quantum Kernel Machine Learning
//!
//! This crate implements quantum kernel methods on an exact statevector
//! simulator. Classical samples are embedded into quantum states through a
//! parameterized feature map, pairwise state fidelities form a kernel matrix,
//! and an epsilon-insensitive support vector regressor is trained on top of
//! that matrix. Fitted models can be persisted to disk and restored.

pub mod quantum;
pub mod machine_learning;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::quantum::{CircuitBuilder, Gate, QuantumCircuit, QuantumError, StateVector};
    pub use crate::machine_learning::prelude::*;
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
