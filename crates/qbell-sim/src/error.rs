//! Error types for the simulator.

use thiserror::Error;

/// Errors produced by circuit simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit exceeds the configured qubit limit.
    #[error("Circuit has {qubits} qubits but simulator only supports {max}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        qubits: usize,
        /// Configured limit.
        max: u32,
    },

    /// repetitions must be ≥ 1.
    #[error("repetitions must be at least 1")]
    ZeroRepetitions,

    /// No measurement was recorded under this key.
    #[error("No measurement recorded under key '{0}'")]
    UnknownKey(String),
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
