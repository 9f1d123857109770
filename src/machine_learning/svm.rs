//! Support vector regression over classical or precomputed kernels
//!
//! The solver optimizes the epsilon-insensitive dual in the combined
//! coefficients beta_i = alpha_i - alpha_i*, using maximal-violating-pair
//! SMO steps under the box |beta_i| <= C and the constraint sum beta_i = 0.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::machine_learning::core::{ModelError, Regressor};

/// Kernel function used by the SVR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KernelType {
    /// Gram matrix supplied by the caller (the quantum kernel path)
    Precomputed,
    /// Linear kernel: K(x, y) = x · y
    Linear,
    /// Polynomial kernel: K(x, y) = (γ * x · y + r)^d
    Polynomial { degree: u32, gamma: f64, coef0: f64 },
    /// Radial basis function kernel: K(x, y) = exp(-γ * ||x - y||²)
    Rbf { gamma: f64 },
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::Rbf { gamma: 1.0 }
    }
}

/// Hyperparameters of the epsilon-SVR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvrParams {
    /// Kernel function
    pub kernel: KernelType,
    /// Regularization constant (box bound on the dual coefficients)
    pub c: f64,
    /// Half-width of the insensitive tube
    pub epsilon: f64,
    /// Stopping tolerance on the violating-pair gap
    pub tol: f64,
    /// Upper bound on SMO iterations
    pub max_iter: usize,
}

impl Default for SvrParams {
    fn default() -> Self {
        SvrParams {
            kernel: KernelType::default(),
            c: 1.0,
            epsilon: 0.1,
            tol: 1e-3,
            max_iter: 100_000,
        }
    }
}

/// Epsilon-insensitive support vector regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelSvr {
    params: SvrParams,
    support_vectors: Option<Array2<f64>>,
    dual_coefs: Option<Array1<f64>>,
    bias: f64,
    fitted: bool,
}

impl KernelSvr {
    pub fn new(params: SvrParams) -> Self {
        KernelSvr {
            params,
            support_vectors: None,
            dual_coefs: None,
            bias: 0.0,
            fitted: false,
        }
    }

    pub fn params(&self) -> &SvrParams {
        &self.params
    }

    /// Number of retained support vectors
    pub fn support_vector_count(&self) -> usize {
        self.dual_coefs.as_ref().map(|a| a.len()).unwrap_or(0)
    }

    /// Train on a caller-supplied square Gram matrix.
    ///
    /// All dual coefficients are retained so that prediction-time cross
    /// matrices can be indexed by training-sample position.
    pub fn fit_precomputed(
        &mut self,
        gram: &Array2<f64>,
        labels: &Array1<f64>,
    ) -> Result<(), ModelError> {
        let n = labels.len();
        if gram.nrows() != n || gram.ncols() != n {
            return Err(ModelError::InvalidInput(format!(
                "Gram matrix is {}x{}, expected {}x{}",
                gram.nrows(),
                gram.ncols(),
                n,
                n
            )));
        }

        let (beta, bias) = solve_epsilon_svr(gram, labels, &self.params)?;
        self.support_vectors = None;
        self.dual_coefs = Some(beta);
        self.bias = bias;
        self.fitted = true;
        Ok(())
    }

    /// Predict from a rectangular cross-kernel matrix.
    ///
    /// Rows correspond to query samples, columns to the training samples the
    /// model was fitted on.
    pub fn predict_precomputed(&self, cross: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let dual = self.dual_coefs.as_ref().ok_or(ModelError::NotFitted)?;
        if cross.ncols() != dual.len() {
            return Err(ModelError::InvalidInput(format!(
                "cross-kernel matrix has {} columns, expected {}",
                cross.ncols(),
                dual.len()
            )));
        }

        Ok(cross.dot(dual) + self.bias)
    }

    fn kernel_value(&self, x1: &Array1<f64>, x2: &Array1<f64>) -> f64 {
        match &self.params.kernel {
            KernelType::Precomputed => {
                unreachable!("precomputed kernels never evaluate sample pairs")
            }
            KernelType::Linear => x1.dot(x2),
            KernelType::Polynomial {
                degree,
                gamma,
                coef0,
            } => (*gamma * x1.dot(x2) + coef0).powi(*degree as i32),
            KernelType::Rbf { gamma } => {
                let diff = x1 - x2;
                (-gamma * diff.dot(&diff)).exp()
            }
        }
    }

    fn gram_matrix(&self, x: &Array2<f64>) -> Array2<f64> {
        let n = x.nrows();
        let mut gram = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let value = self.kernel_value(&x.row(i).to_owned(), &x.row(j).to_owned());
                gram[[i, j]] = value;
                gram[[j, i]] = value;
            }
        }
        gram
    }
}

impl Regressor for KernelSvr {
    fn fit(&mut self, samples: &Array2<f64>, labels: &Array1<f64>) -> Result<(), ModelError> {
        if self.params.kernel == KernelType::Precomputed {
            return Err(ModelError::InvalidInput(
                "a precomputed-kernel SVR must be trained through fit_precomputed".to_string(),
            ));
        }
        if samples.nrows() != labels.len() {
            return Err(ModelError::InvalidInput(format!(
                "sample count {} does not match label count {}",
                samples.nrows(),
                labels.len()
            )));
        }

        let gram = self.gram_matrix(samples);
        let (beta, bias) = solve_epsilon_svr(&gram, labels, &self.params)?;

        // Keep only samples that carry weight in the expansion
        let support: Vec<usize> = beta
            .iter()
            .enumerate()
            .filter(|(_, b)| b.abs() > 1e-10)
            .map(|(i, _)| i)
            .collect();

        if support.is_empty() {
            self.support_vectors = Some(samples.clone());
            self.dual_coefs = Some(beta);
        } else {
            let mut vectors = Array2::zeros((support.len(), samples.ncols()));
            let mut coefs = Array1::zeros(support.len());
            for (row, &idx) in support.iter().enumerate() {
                vectors.row_mut(row).assign(&samples.row(idx));
                coefs[row] = beta[idx];
            }
            self.support_vectors = Some(vectors);
            self.dual_coefs = Some(coefs);
        }

        self.bias = bias;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, samples: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }
        let vectors = self.support_vectors.as_ref().ok_or_else(|| {
            ModelError::InvalidInput(
                "a precomputed-kernel SVR must predict through predict_precomputed".to_string(),
            )
        })?;
        let coefs = self.dual_coefs.as_ref().ok_or(ModelError::NotFitted)?;

        let mut predictions = Array1::zeros(samples.nrows());
        for i in 0..samples.nrows() {
            let sample = samples.row(i).to_owned();
            let mut sum = self.bias;
            for (j, coef) in coefs.iter().enumerate() {
                sum += coef * self.kernel_value(&sample, &vectors.row(j).to_owned());
            }
            predictions[i] = sum;
        }
        Ok(predictions)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

impl crate::machine_learning::serialize::SerializableModel for KernelSvr {
    const MODEL_TYPE: &'static str = "kernel-svr";
}

/// Solve the epsilon-SVR dual for a given Gram matrix.
///
/// Returns the combined dual coefficients beta and the bias term.
fn solve_epsilon_svr(
    gram: &Array2<f64>,
    y: &Array1<f64>,
    params: &SvrParams,
) -> Result<(Array1<f64>, f64), ModelError> {
    let n = y.len();
    if n == 0 {
        return Err(ModelError::InvalidInput(
            "cannot train on an empty dataset".to_string(),
        ));
    }

    let c = params.c;
    let eps = params.epsilon;
    let mut beta = vec![0.0_f64; n];
    // Gradient of the smooth part: g_i = sum_j K_ij beta_j - y_i
    let mut grad: Vec<f64> = y.iter().map(|&v| -v).collect();

    let mut last_up_val = 0.0;
    let mut last_lo_val = 0.0;
    let mut converged = false;

    for _ in 0..params.max_iter {
        // Most violating pair: the steepest feasible ascent direction +e_i
        // paired with the steepest feasible descent direction -e_j. The
        // epsilon term contributes its subgradient at the current beta.
        let mut up: Option<usize> = None;
        let mut up_val = f64::NEG_INFINITY;
        let mut lo: Option<usize> = None;
        let mut lo_val = f64::INFINITY;

        for i in 0..n {
            if beta[i] < c {
                let d = grad[i] + if beta[i] >= 0.0 { eps } else { -eps };
                if -d > up_val {
                    up_val = -d;
                    up = Some(i);
                }
            }
            if beta[i] > -c {
                let d = grad[i] - if beta[i] <= 0.0 { eps } else { -eps };
                if -d < lo_val {
                    lo_val = -d;
                    lo = Some(i);
                }
            }
        }

        let (i, j) = match (up, lo) {
            (Some(i), Some(j)) => (i, j),
            _ => {
                converged = true;
                break;
            }
        };
        last_up_val = up_val;
        last_lo_val = lo_val;

        if up_val - lo_val < params.tol {
            converged = true;
            break;
        }

        // Analytic minimizer along e_i - e_j
        let mut curvature = gram[[i, i]] + gram[[j, j]] - 2.0 * gram[[i, j]];
        if curvature <= 1e-12 {
            curvature = 1e-12;
        }
        let mut step = (up_val - lo_val) / curvature;

        // Box bounds
        step = step.min(c - beta[i]).min(beta[j] + c);

        // Stop at the nearest |beta| kink; the subgradient is re-evaluated
        // on the next pass
        let mut kink = f64::INFINITY;
        if beta[i] < 0.0 {
            kink = kink.min(-beta[i]);
        }
        if beta[j] > 0.0 {
            kink = kink.min(beta[j]);
        }
        if step > kink {
            step = kink;
        }

        if step <= 0.0 {
            converged = true;
            break;
        }

        beta[i] += step;
        beta[j] -= step;
        for k in 0..n {
            grad[k] += step * (gram[[i, k]] - gram[[j, k]]);
        }
    }

    if !converged {
        log::warn!(
            "SVR solver reached max_iter = {} before satisfying tol = {}",
            params.max_iter,
            params.tol
        );
    }

    // Bias from the KKT conditions of the free support vectors
    let mut bias_terms = Vec::new();
    for i in 0..n {
        if beta[i] > -c && beta[i] < c {
            let kb = grad[i] + y[i];
            if beta[i] > 1e-12 {
                bias_terms.push(y[i] - kb - eps);
            } else if beta[i] < -1e-12 {
                bias_terms.push(y[i] - kb + eps);
            }
        }
    }
    let bias = if bias_terms.is_empty() {
        (last_up_val + last_lo_val) / 2.0
    } else {
        bias_terms.iter().sum::<f64>() / bias_terms.len() as f64
    };

    Ok((Array1::from_vec(beta), bias))
}
