//! qbell circuit representation
//!
//! A circuit is an ordered list of [`Moment`]s; each moment holds
//! [`Instruction`]s acting on disjoint qubits. Qubits are opaque
//! [`QubitId`] handles and are never declared up front.
//!
//! # Example
//!
//! ```rust
//! use qbell_ir::{Circuit, Instruction, QubitId};
//!
//! let (q0, q1) = (QubitId(0), QubitId(1));
//! let mut circuit = Circuit::new("bell");
//! circuit.append([Instruction::h(q0), Instruction::cx(q0, q1)]).unwrap();
//! circuit.measure([q0, q1]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod moment;
pub mod qubit;

pub use circuit::{Circuit, InsertStrategy};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind, MeasurementKey};
pub use moment::Moment;
pub use qubit::{QubitId, line_qubits};
