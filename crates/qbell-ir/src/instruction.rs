//! Circuit instructions combining gates with operands.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// Name of a measurement record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementKey(String);

impl MeasurementKey {
    /// Create a key from an explicit name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Default key for a measurement over `qubits`: their names joined by `_`.
    pub fn for_qubits(qubits: &[QubitId]) -> Self {
        let name = qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("_");
        Self(name)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeasurementKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MeasurementKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Joint computational-basis measurement of all operands.
    Measure {
        /// Record the outcome bits are stored under.
        key: MeasurementKey,
    },
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Hadamard on `qubit`.
    pub fn h(qubit: QubitId) -> Self {
        Self::gate(StandardGate::H, [qubit])
    }

    /// Pauli-X on `qubit`.
    pub fn x(qubit: QubitId) -> Self {
        Self::gate(StandardGate::X, [qubit])
    }

    /// Pauli-Y on `qubit`.
    pub fn y(qubit: QubitId) -> Self {
        Self::gate(StandardGate::Y, [qubit])
    }

    /// Pauli-Z on `qubit`.
    pub fn z(qubit: QubitId) -> Self {
        Self::gate(StandardGate::Z, [qubit])
    }

    /// CNOT with `control` and `target`.
    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::gate(StandardGate::CX, [control, target])
    }

    /// Controlled-Z.
    pub fn cz(q1: QubitId, q2: QubitId) -> Self {
        Self::gate(StandardGate::CZ, [q1, q2])
    }

    /// SWAP.
    pub fn swap(q1: QubitId, q2: QubitId) -> Self {
        Self::gate(StandardGate::Swap, [q1, q2])
    }

    /// Joint measurement of `qubits` under the default key.
    pub fn measure(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let key = MeasurementKey::for_qubits(&qubits);
        Self {
            kind: InstructionKind::Measure { key },
            qubits,
        }
    }

    /// Joint measurement of `qubits` recorded under `key`.
    pub fn measure_with_key(
        qubits: impl IntoIterator<Item = QubitId>,
        key: impl Into<MeasurementKey>,
    ) -> Self {
        Self {
            kind: InstructionKind::Measure { key: key.into() },
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check operand arity and distinctness.
    pub fn validate(&self) -> IrResult<()> {
        match &self.kind {
            InstructionKind::Gate(gate) => {
                if self.qubits.len() != gate.num_qubits() as usize {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: self.qubits.len(),
                    });
                }
            }
            InstructionKind::Measure { key } => {
                if self.qubits.is_empty() {
                    return Err(IrError::EmptyMeasurement(key.to_string()));
                }
            }
            InstructionKind::Barrier => {}
        }

        let mut seen = FxHashSet::default();
        for &qubit in &self.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    op_name: self.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure { .. })
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<StandardGate> {
        match self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the measurement key if this is a measurement.
    pub fn measurement_key(&self) -> Option<&MeasurementKey> {
        match &self.kind {
            InstructionKind::Measure { key } => Some(key),
            _ => None,
        }
    }

    /// Check whether this instruction acts on every qubit.
    ///
    /// Only operand-less barriers qualify.
    pub fn is_global(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Check whether this instruction must be ordered against `other`.
    ///
    /// Global instructions overlap everything.
    pub fn overlaps(&self, other: &Instruction) -> bool {
        self.is_global()
            || other.is_global()
            || self.qubits.iter().any(|q| other.qubits.contains(q))
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure { .. } => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self
            .qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match &self.kind {
            InstructionKind::Measure { key } => write!(f, "measure({operands}) -> {key}"),
            _ => write!(f, "{}({operands})", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::h(QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.as_gate(), Some(StandardGate::H));
    }

    #[test]
    fn test_measure_default_key() {
        let inst = Instruction::measure([QubitId(0), QubitId(1)]);
        assert!(inst.is_measure());
        assert_eq!(inst.qubits.len(), 2);
        assert_eq!(inst.measurement_key().map(MeasurementKey::as_str), Some("q0_q1"));
    }

    #[test]
    fn test_measure_explicit_key() {
        let inst = Instruction::measure_with_key([QubitId(3)], "result");
        assert_eq!(inst.measurement_key(), Some(&MeasurementKey::new("result")));
    }

    #[test]
    fn test_validate_arity() {
        let bad = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert_eq!(
            bad.validate(),
            Err(IrError::QubitCountMismatch {
                gate_name: "cx".into(),
                expected: 2,
                got: 1,
            })
        );
        assert!(Instruction::cx(QubitId(0), QubitId(1)).validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_qubit() {
        let bad = Instruction::cx(QubitId(2), QubitId(2));
        assert!(matches!(
            bad.validate(),
            Err(IrError::DuplicateQubit { qubit: QubitId(2), .. })
        ));

        let bad_measure = Instruction::measure([QubitId(1), QubitId(1)]);
        assert!(bad_measure.validate().is_err());
    }

    #[test]
    fn test_validate_empty_measurement() {
        let inst = Instruction::measure_with_key(Vec::<QubitId>::new(), "nothing");
        assert_eq!(
            inst.validate(),
            Err(IrError::EmptyMeasurement("nothing".into()))
        );
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.qubits.len(), 3);
    }

    #[test]
    fn test_global_barrier_overlaps_everything() {
        let global = Instruction::barrier(Vec::<QubitId>::new());
        assert!(global.is_global());
        assert!(global.validate().is_ok());
        assert!(global.overlaps(&Instruction::h(QubitId(5))));
        assert!(Instruction::h(QubitId(5)).overlaps(&global));
        assert!(!Instruction::h(QubitId(5)).overlaps(&Instruction::h(QubitId(6))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::cx(QubitId(0), QubitId(1)).to_string(), "cx(q0, q1)");
        assert_eq!(
            Instruction::measure([QubitId(0), QubitId(1)]).to_string(),
            "measure(q0, q1) -> q0_q1"
        );
    }
}
