//! Qubit handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a qubit.
///
/// Circuits do not declare their qubits up front; the set of qubits a
/// circuit touches is whatever its operations name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Get the raw index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Build a run of consecutive qubit handles starting at zero.
pub fn line_qubits(n: u32) -> Vec<QubitId> {
    (0..n).map(QubitId).collect()
}
