//! Machine learning on quantum kernels
//!
//! Classical support vector machinery together with the quantum kernel that
//! feeds it precomputed Gram matrices.

pub mod core;
pub mod metrics;
pub mod serialize;
pub mod svm;
pub mod quantum;

/// Re-exports of commonly used components
pub mod prelude {
    pub use super::core::{ModelError, Regressor};
    pub use super::metrics::mean_squared_error;
    pub use super::serialize::{PersistenceError, SerializableModel};
    pub use super::svm::{KernelSvr, KernelType, SvrParams};
    pub use super::quantum::feature_map::{Entanglement, FeatureMap, ZzFeatureMap};
    pub use super::quantum::kernel::FidelityQuantumKernel;
    pub use super::quantum::qsvr::Qsvr;
}
