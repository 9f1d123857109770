//! Quantum-kernel support vector regression

use std::fmt::{self, Display};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::machine_learning::core::{ModelError, Regressor};
use crate::machine_learning::quantum::kernel::FidelityQuantumKernel;
use crate::machine_learning::serialize::SerializableModel;
use crate::machine_learning::svm::{KernelSvr, KernelType, SvrParams};

/// Support vector regressor on a fidelity quantum kernel.
///
/// The quantum kernel enters the underlying SVR as a precomputed Gram
/// matrix; training samples are retained so that prediction can evaluate
/// the cross kernel between query and training samples. The kernel binding
/// is mutable until `fit` is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qsvr {
    quantum_kernel: Option<FidelityQuantumKernel>,
    svr: KernelSvr,
    train_samples: Option<Array2<f64>>,
}

impl Qsvr {
    /// Create a regressor with default parameters and no kernel bound yet.
    ///
    /// A default fidelity kernel is constructed lazily at fit time if none
    /// has been assigned.
    pub fn new() -> Self {
        Qsvr::with_params(SvrParams {
            kernel: KernelType::Precomputed,
            ..Default::default()
        })
    }

    /// Create a regressor bound to the given quantum kernel
    pub fn with_quantum_kernel(quantum_kernel: FidelityQuantumKernel) -> Self {
        let mut qsvr = Qsvr::new();
        qsvr.quantum_kernel = Some(quantum_kernel);
        qsvr
    }

    /// Create a regressor with explicit hyperparameters.
    ///
    /// The quantum kernel always enters the SVR as a precomputed Gram
    /// matrix; a classical kernel in `params` is discarded with a warning.
    pub fn with_params(mut params: SvrParams) -> Self {
        if params.kernel != KernelType::Precomputed {
            log::warn!(
                "kernel {:?} is ignored: Qsvr always uses the precomputed quantum kernel",
                params.kernel
            );
            params.kernel = KernelType::Precomputed;
        }

        Qsvr {
            quantum_kernel: None,
            svr: KernelSvr::new(params),
            train_samples: None,
        }
    }

    /// The bound quantum kernel, if one has been assigned
    pub fn quantum_kernel(&self) -> Option<&FidelityQuantumKernel> {
        self.quantum_kernel.as_ref()
    }

    /// Bind (or replace) the quantum kernel
    pub fn set_quantum_kernel(&mut self, quantum_kernel: FidelityQuantumKernel) {
        self.quantum_kernel = Some(quantum_kernel);
    }

    pub fn params(&self) -> &SvrParams {
        self.svr.params()
    }
}

impl Default for Qsvr {
    fn default() -> Self {
        Qsvr::new()
    }
}

impl Regressor for Qsvr {
    fn fit(&mut self, samples: &Array2<f64>, labels: &Array1<f64>) -> Result<(), ModelError> {
        if samples.nrows() != labels.len() {
            return Err(ModelError::InvalidInput(format!(
                "sample count {} does not match label count {}",
                samples.nrows(),
                labels.len()
            )));
        }

        let kernel = self
            .quantum_kernel
            .get_or_insert_with(FidelityQuantumKernel::default);

        let gram = kernel.evaluate_matrix(samples)?;
        self.svr.fit_precomputed(&gram, labels)?;
        self.train_samples = Some(samples.clone());
        Ok(())
    }

    fn predict(&self, samples: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let train = self.train_samples.as_ref().ok_or(ModelError::NotFitted)?;
        let kernel = self.quantum_kernel.as_ref().ok_or(ModelError::NotFitted)?;

        let cross = kernel.evaluate_cross(samples, train)?;
        self.svr.predict_precomputed(&cross)
    }

    fn is_fitted(&self) -> bool {
        self.svr.is_fitted()
    }
}

impl Display for Qsvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params();
        write!(
            f,
            "Qsvr(C={}, epsilon={}, tol={}, kernel=",
            params.c, params.epsilon, params.tol
        )?;
        match &self.quantum_kernel {
            Some(kernel) => write!(f, "{:?}", kernel.feature_map())?,
            None => write!(f, "unbound")?,
        }
        write!(
            f,
            ", fitted={})",
            if self.is_fitted() { "yes" } else { "no" }
        )
    }
}

impl SerializableModel for Qsvr {
    const MODEL_TYPE: &'static str = "qsvr";
}
