//! Error types for the gates crate.

use thiserror::Error;

/// Errors produced while parsing Bell indices.
///
/// Circuit errors from the sequence helpers are returned as
/// [`qbell_ir::IrError`] unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BellError {
    /// A Bell index component was not 0 or 1, or a string was not one of `00`, `01`, `10`, `11`.
    #[error("Invalid Bell index '{0}': expected two bits (00, 01, 10 or 11)")]
    InvalidIndex(String),
}
