//! OpenQASM 3 output for qbell circuits.
//!
//! Qubits are packed into a single `q` register in sorted handle order;
//! each measurement key becomes its own `bit` register.
//!
//! ```rust
//! use qbell_ir::{Circuit, Instruction, QubitId};
//!
//! let (q0, q1) = (QubitId(0), QubitId(1));
//! let circuit = Circuit::from_ops(
//!     "bell",
//!     [Instruction::h(q0), Instruction::cx(q0, q1), Instruction::measure([q0, q1])],
//! )
//! .unwrap();
//!
//! let qasm = qbell_qasm3::emit(&circuit).unwrap();
//! assert!(qasm.contains("bit[2] q0_q1;"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::emit;
pub use error::{Qasm3Error, Qasm3Result};
