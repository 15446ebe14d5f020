//! `qbell-gates` — Bell-state preparation and Bell-basis measurement.
//!
//! [`make_bell_state`] yields the gate sequence preparing one of the four
//! Bell states; [`bell_measurement`] appends the disentangling `CX` + `H`
//! and a joint measurement to an existing circuit.
//!
//! # Quick start
//!
//! ```rust
//! use qbell_gates::{BellIndex, bell_measurement, make_bell_state};
//! use qbell_ir::{Circuit, QubitId};
//!
//! let (q0, q1) = (QubitId(0), QubitId(1));
//! let mut circuit = Circuit::from_ops("bell", make_bell_state(q0, q1, BellIndex::new(true, true))).unwrap();
//! bell_measurement(&mut circuit, q0, q1).unwrap();
//!
//! assert_eq!(circuit.num_operations(), 7);
//! ```

pub mod error;
pub mod index;
pub mod measure;
pub mod prepare;

pub use error::BellError;
pub use index::{BellIndex, BellState};
pub use measure::{bell_measurement, bell_measurement_with_key, decode_outcome};
pub use prepare::{bell_state_circuit, make_bell_state};
