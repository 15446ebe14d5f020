//! Moments: layers of operations on disjoint qubits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A set of instructions that act on pairwise-disjoint qubits and
/// therefore execute in the same time step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    instructions: Vec<Instruction>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether any instruction in this moment touches `instruction`'s qubits.
    pub fn conflicts_with(&self, instruction: &Instruction) -> bool {
        self.instructions.iter().any(|op| op.overlaps(instruction))
    }

    /// Check whether this moment touches any of `qubits`.
    ///
    /// An empty `qubits` slice stands for every qubit, and a global
    /// instruction in the moment touches everything.
    pub fn operates_on(&self, qubits: &[QubitId]) -> bool {
        self.instructions.iter().any(|op| {
            qubits.is_empty() || op.is_global() || op.qubits.iter().any(|q| qubits.contains(q))
        })
    }

    /// Add an instruction. Callers guarantee it does not conflict.
    pub(crate) fn push(&mut self, instruction: Instruction) {
        debug_assert!(!self.conflicts_with(&instruction));
        self.instructions.push(instruction);
    }

    /// Instructions in insertion order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Qubits touched by this moment.
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        self.instructions
            .iter()
            .flat_map(|op| op.qubits.iter().copied())
            .collect()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the moment is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = self
            .instructions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("  ");
        f.write_str(&ops)
    }
}
