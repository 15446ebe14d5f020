//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, MeasurementKey};
use crate::moment::Moment;
use crate::qubit::QubitId;

/// Where appended operations land relative to existing moments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertStrategy {
    /// Slide each operation back to the first moment after the last one
    /// touching its qubits.
    #[default]
    Earliest,
    /// Every operation gets a fresh moment at the end.
    New,
    /// Join the last moment when possible, otherwise open a new one.
    Inline,
}

/// A quantum circuit: an ordered list of moments.
///
/// Qubits are not declared; the circuit acts on whatever qubits its
/// operations name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Moments in execution order.
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            moments: vec![],
        }
    }

    /// Build a circuit from a sequence of operations using [`InsertStrategy::Earliest`].
    pub fn from_ops(
        name: impl Into<String>,
        ops: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name);
        circuit.append(ops)?;
        Ok(circuit)
    }

    /// Append operations with [`InsertStrategy::Earliest`].
    pub fn append(&mut self, ops: impl IntoIterator<Item = Instruction>) -> IrResult<&mut Self> {
        self.append_with(ops, InsertStrategy::Earliest)
    }

    /// Append operations with an explicit strategy.
    ///
    /// The whole batch is validated before anything is inserted, so on
    /// error the circuit is unchanged.
    pub fn append_with(
        &mut self,
        ops: impl IntoIterator<Item = Instruction>,
        strategy: InsertStrategy,
    ) -> IrResult<&mut Self> {
        let ops: Vec<Instruction> = ops.into_iter().collect();

        let mut keys: FxHashSet<MeasurementKey> = self.measurement_keys().into_iter().collect();
        for op in &ops {
            op.validate()?;
            if let Some(key) = op.measurement_key() {
                if !keys.insert(key.clone()) {
                    return Err(IrError::DuplicateMeasurementKey(key.to_string()));
                }
            }
        }

        for op in ops {
            trace!(op = %op, ?strategy, "appending");
            self.insert(op, strategy);
        }
        Ok(self)
    }

    fn insert(&mut self, op: Instruction, strategy: InsertStrategy) {
        match strategy {
            InsertStrategy::Earliest => {
                let slot = self
                    .moments
                    .iter()
                    .rposition(|m| m.operates_on(&op.qubits))
                    .map_or(0, |i| i + 1);
                if slot == self.moments.len() {
                    self.moments.push(Moment::new());
                }
                self.moments[slot].push(op);
            }
            InsertStrategy::New => {
                let mut moment = Moment::new();
                moment.push(op);
                self.moments.push(moment);
            }
            InsertStrategy::Inline => match self.moments.last_mut() {
                Some(last) if !last.conflicts_with(&op) => last.push(op),
                _ => {
                    let mut moment = Moment::new();
                    moment.push(op);
                    self.moments.push(moment);
                }
            },
        }
    }

    // =========================================================================
    // Builder shortcuts
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::h(qubit)])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::x(qubit)])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::y(qubit)])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::z(qubit)])
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::cx(control, target)])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::cz(q1, q2)])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append([Instruction::swap(q1, q2)])
    }

    /// Jointly measure `qubits` under the default key.
    pub fn measure(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append([Instruction::measure(qubits)])
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append([Instruction::barrier(qubits)])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the moments.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Get the circuit depth (number of moments).
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// All qubits named by any operation, sorted.
    pub fn all_qubits(&self) -> BTreeSet<QubitId> {
        self.moments.iter().flat_map(Moment::qubits).collect()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.all_qubits().len()
    }

    /// Operations in moment order, then insertion order within a moment.
    pub fn all_operations(&self) -> impl Iterator<Item = &Instruction> {
        self.moments.iter().flat_map(|m| m.instructions().iter())
    }

    /// Get the number of operations.
    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Measurement keys in operation order.
    pub fn measurement_keys(&self) -> Vec<MeasurementKey> {
        self.all_operations()
            .filter_map(Instruction::measurement_key)
            .cloned()
            .collect()
    }

    /// Check whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.all_operations().any(Instruction::is_measure)
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} qubits, depth {})",
            self.name,
            self.num_qubits(),
            self.depth()
        )?;
        for (i, moment) in self.moments.iter().enumerate() {
            writeln!(f, "  {i:>3}: {moment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_earliest_packs_independent_ops() {
        let mut circuit = Circuit::new("test");
        circuit
            .append([Instruction::x(q(0)), Instruction::x(q(1)), Instruction::h(q(0))])
            .unwrap();

        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.moments()[0].len(), 2);
        assert_eq!(circuit.moments()[1].instructions(), &[Instruction::h(q(0))]);
    }

    #[test]
    fn test_earliest_slides_back() {
        let mut circuit = Circuit::new("test");
        circuit.h(q(0)).unwrap().h(q(0)).unwrap().h(q(0)).unwrap();
        circuit.x(q(1)).unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.moments()[0].len(), 2);
    }

    #[test]
    fn test_new_strategy() {
        let mut circuit = Circuit::new("test");
        circuit
            .append_with([Instruction::x(q(0)), Instruction::x(q(1))], InsertStrategy::New)
            .unwrap();
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_inline_strategy() {
        let mut circuit = Circuit::new("test");
        circuit.h(q(0)).unwrap().h(q(0)).unwrap();
        circuit
            .append_with([Instruction::x(q(1))], InsertStrategy::Inline)
            .unwrap();

        // Lands in the last moment, not the first.
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.moments()[1].len(), 2);

        circuit
            .append_with([Instruction::x(q(1))], InsertStrategy::Inline)
            .unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_all_operations_order() {
        let mut circuit = Circuit::new("bell");
        circuit.h(q(0)).unwrap().cx(q(0), q(1)).unwrap();
        circuit.measure([q(0), q(1)]).unwrap();

        let names: Vec<_> = circuit.all_operations().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "cx", "measure"]);
        assert_eq!(circuit.num_operations(), 3);
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_append_is_atomic() {
        let mut circuit = Circuit::new("test");
        circuit.h(q(0)).unwrap();

        let err = circuit
            .append([Instruction::x(q(1)), Instruction::cx(q(2), q(2))])
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
        assert_eq!(circuit.num_operations(), 1);
    }

    #[test]
    fn test_duplicate_measurement_key() {
        let mut circuit = Circuit::new("test");
        circuit.measure([q(0)]).unwrap();

        let err = circuit.measure([q(0)]).unwrap_err();
        assert_eq!(err, IrError::DuplicateMeasurementKey("q0".into()));

        let err = Circuit::new("batch")
            .append([
                Instruction::measure_with_key([q(0)], "m"),
                Instruction::measure_with_key([q(1)], "m"),
            ])
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, IrError::DuplicateMeasurementKey("m".into()));
    }

    #[test]
    fn test_global_barrier_lands_last_for_every_strategy() {
        for strategy in [
            InsertStrategy::Earliest,
            InsertStrategy::New,
            InsertStrategy::Inline,
        ] {
            let mut circuit =
                Circuit::from_ops("b", [Instruction::h(q(0)), Instruction::cx(q(0), q(1))])
                    .unwrap();
            circuit
                .append_with([Instruction::barrier(Vec::<QubitId>::new())], strategy)
                .unwrap();

            let names: Vec<_> = circuit.all_operations().map(Instruction::name).collect();
            assert_eq!(names, vec!["h", "cx", "barrier"], "{strategy:?}");
            assert_eq!(circuit.depth(), 3, "{strategy:?}");
        }
    }

    #[test]
    fn test_global_barrier_fences_later_ops() {
        let mut circuit = Circuit::new("fence");
        circuit.h(q(0)).unwrap().h(q(0)).unwrap();
        circuit.barrier(Vec::<QubitId>::new()).unwrap();
        circuit.x(q(1)).unwrap();

        let names: Vec<_> = circuit.all_operations().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "h", "barrier", "x"]);
        assert_eq!(circuit.depth(), 4);
    }

    #[test]
    fn test_sparse_qubits() {
        let circuit = Circuit::from_ops("sparse", [Instruction::cx(q(7), q(3))]).unwrap();
        let qubits: Vec<_> = circuit.all_qubits().into_iter().collect();
        assert_eq!(qubits, vec![q(3), q(7)]);
    }

    #[test]
    fn test_display() {
        let circuit =
            Circuit::from_ops("bell", [Instruction::h(q(0)), Instruction::cx(q(0), q(1))]).unwrap();
        let text = circuit.to_string();
        assert!(text.starts_with("circuit bell (2 qubits, depth 2)"));
        assert!(text.contains("h(q0)"));
        assert!(text.contains("cx(q0, q1)"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let circuit =
            Circuit::from_ops("bell", [Instruction::h(q(0)), Instruction::measure([q(0)])])
                .unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
