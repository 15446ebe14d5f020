//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation (op: {op_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the offending operation.
        op_name: String,
    },

    /// Measurement without any target qubits.
    #[error("Measurement '{0}' targets no qubits")]
    EmptyMeasurement(String),

    /// Measurement key already used in the circuit.
    #[error("Measurement key '{0}' is already used in this circuit")]
    DuplicateMeasurementKey(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
