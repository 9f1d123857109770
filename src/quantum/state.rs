// src/quantum/state.rs
//! Statevector representation of pure quantum states

use std::fmt::{self, Display};

use ndarray::Array1;
use num_complex::Complex64;

use crate::quantum::QuantumError;

/// A pure quantum state as a vector of complex amplitudes.
///
/// Basis states are indexed big-endian: qubit 0 is the most significant bit
/// of the basis index.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    qubit_count: usize,
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Create a new state vector with the given amplitudes
    pub fn new(qubit_count: usize, amplitudes: Array1<Complex64>) -> Result<Self, QuantumError> {
        let expected = 1 << qubit_count;
        if amplitudes.len() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                got: amplitudes.len(),
            });
        }

        let state = StateVector {
            qubit_count,
            amplitudes,
        };

        let norm_sqr = state.norm_sqr();
        if (norm_sqr - 1.0).abs() > 1e-10 {
            return Err(QuantumError::NotNormalized { norm_sqr });
        }

        Ok(state)
    }

    /// Create the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self, QuantumError> {
        let dim = 1 << qubit_count;
        if index >= dim {
            return Err(QuantumError::BasisIndexOutOfRange { index, qubit_count });
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    pub fn zero_state(qubit_count: usize) -> Self {
        StateVector {
            qubit_count,
            amplitudes: {
                let mut a = Array1::zeros(1 << qubit_count);
                a[0] = Complex64::new(1.0, 0.0);
                a
            },
        }
    }

    /// Number of qubits in the register
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Squared norm of the amplitude vector
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Check whether the state is normalized
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < 1e-10
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &Self) -> Result<Complex64, QuantumError> {
        if self.qubit_count != other.qubit_count {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dimension(),
                got: other.dimension(),
            });
        }

        let mut result = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension() {
            result += self.amplitudes[i].conj() * other.amplitudes[i];
        }

        Ok(result)
    }

    /// Fidelity |⟨self|other⟩|² with another pure state
    pub fn fidelity(&self, other: &Self) -> Result<f64, QuantumError> {
        Ok(self.inner_product(other)?.norm_sqr())
    }

    /// Probability of measuring the given basis state
    pub fn probability(&self, basis_index: usize) -> f64 {
        if basis_index >= self.dimension() {
            return 0.0;
        }
        self.amplitudes[basis_index].norm_sqr()
    }

    /// Apply a single-qubit gate matrix to the given qubit
    pub(crate) fn apply_single_qubit(
        &mut self,
        qubit: usize,
        matrix: &[[Complex64; 2]; 2],
    ) -> Result<(), QuantumError> {
        if qubit >= self.qubit_count {
            return Err(QuantumError::QubitOutOfRange {
                qubit,
                qubit_count: self.qubit_count,
            });
        }

        // Big-endian bit position of the target qubit
        let shift = self.qubit_count - 1 - qubit;
        let mask = 1usize << shift;

        for i in 0..self.dimension() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }

        Ok(())
    }

    /// Apply a controlled-NOT with the given control and target qubits
    pub(crate) fn apply_cx(&mut self, control: usize, target: usize) -> Result<(), QuantumError> {
        for &q in &[control, target] {
            if q >= self.qubit_count {
                return Err(QuantumError::QubitOutOfRange {
                    qubit: q,
                    qubit_count: self.qubit_count,
                });
            }
        }

        let control_mask = 1usize << (self.qubit_count - 1 - control);
        let target_mask = 1usize << (self.qubit_count - 1 - target);

        for i in 0..self.dimension() {
            // Swap each |..1..0..⟩ / |..1..1..⟩ pair exactly once
            if i & control_mask != 0 && i & target_mask == 0 {
                let j = i | target_mask;
                self.amplitudes.swap(i, j);
            }
        }

        Ok(())
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit state:", self.qubit_count)?;

        let threshold = 1e-10;
        let mut has_entries = false;

        for i in 0..self.dimension() {
            let amp = self.amplitudes[i];
            if amp.norm_sqr() > threshold {
                has_entries = true;
                let bit_string = format!("{:0width$b}", i, width = self.qubit_count);
                writeln!(
                    f,
                    "  ({:.6}{:+.6}i) |{}⟩ [{:.1}%]",
                    amp.re,
                    amp.im,
                    bit_string,
                    amp.norm_sqr() * 100.0
                )?;
            }
        }

        if !has_entries {
            writeln!(f, "  (zero amplitudes)")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_is_basis_zero() {
        let state = StateVector::zero_state(3);
        assert_eq!(state.dimension(), 8);
        assert!((state.probability(0) - 1.0).abs() < 1e-12);
        assert!(state.is_normalized());
    }

    #[test]
    fn new_rejects_wrong_dimension() {
        let amps = Array1::from_vec(vec![Complex64::new(1.0, 0.0); 3]);
        let err = StateVector::new(2, amps).unwrap_err();
        assert_eq!(
            err,
            QuantumError::DimensionMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn new_rejects_unnormalized() {
        let amps = Array1::from_vec(vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
        ]);
        assert!(matches!(
            StateVector::new(1, amps),
            Err(QuantumError::NotNormalized { .. })
        ));
    }

    #[test]
    fn inner_product_of_orthogonal_basis_states() {
        let s0 = StateVector::computational_basis(2, 0).unwrap();
        let s3 = StateVector::computational_basis(2, 3).unwrap();
        assert_eq!(s0.inner_product(&s3).unwrap(), Complex64::new(0.0, 0.0));
        assert!((s0.fidelity(&s0).unwrap() - 1.0).abs() < 1e-12);
    }
}
