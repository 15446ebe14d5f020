//! Error types for the QASM3 emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Qasm3Error {
    /// Measurement key cannot be used as a register name.
    #[error("Measurement key '{0}' is not a valid OpenQASM identifier")]
    InvalidIdentifier(String),

    /// Measurement key collides with the qubit register.
    #[error("Measurement key '{0}' clashes with a reserved name")]
    ReservedIdentifier(String),
}

/// Result type for emission.
pub type Qasm3Result<T> = Result<T, Qasm3Error>;
