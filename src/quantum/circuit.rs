// src/quantum/circuit.rs
//! Quantum circuits as ordered gate sequences

use crate::quantum::gate::Gate;
use crate::quantum::state::StateVector;
use crate::quantum::QuantumError;

/// A quantum circuit consisting of a sequence of gates
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumCircuit {
    gates: Vec<(Gate, Vec<usize>)>,
    qubit_count: usize,
}

impl QuantumCircuit {
    /// Create a new empty quantum circuit
    pub fn new(qubit_count: usize) -> Self {
        QuantumCircuit {
            gates: Vec::new(),
            qubit_count,
        }
    }

    /// Number of qubits the circuit acts on
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Number of gates in the circuit
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Append a gate acting on the given qubits
    pub fn add_gate(&mut self, gate: Gate, qubits: &[usize]) -> Result<(), QuantumError> {
        for &q in qubits {
            if q >= self.qubit_count {
                return Err(QuantumError::QubitOutOfRange {
                    qubit: q,
                    qubit_count: self.qubit_count,
                });
            }
        }

        if gate.qubit_count() != qubits.len() {
            return Err(QuantumError::WrongQubitCount {
                gate: gate.name(),
                expected: gate.qubit_count(),
                got: qubits.len(),
            });
        }

        self.gates.push((gate, qubits.to_vec()));
        Ok(())
    }

    /// Apply the circuit to a quantum state
    pub fn apply(&self, state: &StateVector) -> Result<StateVector, QuantumError> {
        if state.qubit_count() != self.qubit_count {
            return Err(QuantumError::DimensionMismatch {
                expected: 1 << self.qubit_count,
                got: state.dimension(),
            });
        }

        let mut current = state.clone();
        for (gate, qubits) in &self.gates {
            gate.apply(&mut current, qubits)?;
        }

        Ok(current)
    }

    /// Run the circuit on the |00...0⟩ state
    pub fn run(&self) -> Result<StateVector, QuantumError> {
        self.apply(&StateVector::zero_state(self.qubit_count))
    }
}

/// Incremental builder for quantum circuits
pub struct CircuitBuilder {
    circuit: QuantumCircuit,
}

impl CircuitBuilder {
    pub fn new(qubit_count: usize) -> Self {
        CircuitBuilder {
            circuit: QuantumCircuit::new(qubit_count),
        }
    }

    pub fn build(self) -> QuantumCircuit {
        self.circuit
    }

    pub fn h(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::H, &[qubit])
    }

    pub fn x(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::X, &[qubit])
    }

    pub fn z(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::Z, &[qubit])
    }

    pub fn p(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::Phase(theta), &[qubit])
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::Rz(theta), &[qubit])
    }

    pub fn cx(&mut self, control: usize, target: usize) -> Result<(), QuantumError> {
        self.circuit.add_gate(Gate::Cx, &[control, target])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_out_of_range_qubits() {
        let mut builder = CircuitBuilder::new(2);
        assert!(matches!(
            builder.h(2),
            Err(QuantumError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_circuit_is_identity() {
        let circuit = QuantumCircuit::new(2);
        let state = circuit.run().unwrap();
        assert!((state.probability(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn apply_rejects_mismatched_register() {
        let circuit = QuantumCircuit::new(2);
        let state = StateVector::zero_state(3);
        assert!(matches!(
            circuit.apply(&state),
            Err(QuantumError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn gates_apply_in_order() {
        // X then CX: |00⟩ -> |10⟩ -> |11⟩
        let mut builder = CircuitBuilder::new(2);
        builder.x(0).unwrap();
        builder.cx(0, 1).unwrap();
        let state = builder.build().run().unwrap();
        assert!((state.probability(0b11) - 1.0).abs() < 1e-12);
    }
}
