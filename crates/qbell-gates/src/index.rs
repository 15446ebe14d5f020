//! Bell-state indices and the states they select.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::error::BellError;

/// Two-bit selector for one of the four Bell states.
///
/// Each bit says whether the corresponding qubit is flipped with `X`
/// before the entangling `H` + `CNOT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BellIndex {
    /// Flip the first (control) qubit.
    pub flip_q0: bool,
    /// Flip the second (target) qubit.
    pub flip_q1: bool,
}

impl BellIndex {
    /// All four indices in binary order.
    pub const ALL: [BellIndex; 4] = [
        BellIndex::new(false, false),
        BellIndex::new(false, true),
        BellIndex::new(true, false),
        BellIndex::new(true, true),
    ];

    /// Create an index from its two bits.
    pub const fn new(flip_q0: bool, flip_q1: bool) -> Self {
        Self { flip_q0, flip_q1 }
    }

    /// The bits as `(q0, q1)`.
    pub fn bits(self) -> (u8, u8) {
        (u8::from(self.flip_q0), u8::from(self.flip_q1))
    }

    /// The Bell state this index prepares.
    pub fn state(self) -> BellState {
        match (self.flip_q0, self.flip_q1) {
            (false, false) => BellState::PhiPlus,
            (false, true) => BellState::PsiPlus,
            (true, false) => BellState::PhiMinus,
            (true, true) => BellState::PsiMinus,
        }
    }
}

impl From<(bool, bool)> for BellIndex {
    fn from((flip_q0, flip_q1): (bool, bool)) -> Self {
        Self::new(flip_q0, flip_q1)
    }
}

impl TryFrom<(u8, u8)> for BellIndex {
    type Error = BellError;

    fn try_from((b0, b1): (u8, u8)) -> Result<Self, Self::Error> {
        let bit = |b: u8| match b {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(BellError::InvalidIndex(format!("({b0}, {b1})"))),
        };
        Ok(Self::new(bit(b0)?, bit(b1)?))
    }
}

impl FromStr for BellIndex {
    type Err = BellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "00" => Ok(Self::new(false, false)),
            "01" => Ok(Self::new(false, true)),
            "10" => Ok(Self::new(true, false)),
            "11" => Ok(Self::new(true, true)),
            other => Err(BellError::InvalidIndex(other.to_string())),
        }
    }
}

impl fmt::Display for BellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b0, b1) = self.bits();
        write!(f, "{b0}{b1}")
    }
}

/// The four maximally entangled two-qubit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BellState {
    /// (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// (|00⟩ − |11⟩)/√2
    PhiMinus,
    /// (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// (|01⟩ − |10⟩)/√2
    PsiMinus,
}

impl BellState {
    /// The index that prepares this state.
    pub fn index(self) -> BellIndex {
        match self {
            BellState::PhiPlus => BellIndex::new(false, false),
            BellState::PsiPlus => BellIndex::new(false, true),
            BellState::PhiMinus => BellIndex::new(true, false),
            BellState::PsiMinus => BellIndex::new(true, true),
        }
    }

    /// Amplitudes over the basis `|q1 q0⟩` in little-endian order
    /// (`index = q0 + 2·q1`), matching statevector layout.
    pub fn amplitudes(self) -> [Complex64; 4] {
        let a = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        match self {
            // |00⟩ at 0, |11⟩ at 3
            BellState::PhiPlus => [a, zero, zero, a],
            BellState::PhiMinus => [a, zero, zero, -a],
            // q0=1,q1=0 at 1; q0=0,q1=1 at 2
            BellState::PsiPlus => [zero, a, a, zero],
            BellState::PsiMinus => [zero, -a, a, zero],
        }
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BellState::PhiPlus => "Φ+",
            BellState::PhiMinus => "Φ-",
            BellState::PsiPlus => "Ψ+",
            BellState::PsiMinus => "Ψ-",
        };
        f.write_str(s)
    }
}
