//! Quantum machine learning module

pub mod feature_map;
pub mod kernel;
pub mod qsvr;

// Re-exports for convenience
pub use feature_map::{Entanglement, FeatureMap, ZzFeatureMap};
pub use kernel::FidelityQuantumKernel;
pub use qsvr::Qsvr;
