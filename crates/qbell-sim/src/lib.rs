//! `qbell-sim` — statevector simulation of qbell circuits.
//!
//! ```rust
//! use qbell_ir::{Circuit, Instruction, MeasurementKey, QubitId};
//! use qbell_sim::{Simulator, SimulatorConfig};
//!
//! let (q0, q1) = (QubitId(0), QubitId(1));
//! let circuit = Circuit::from_ops(
//!     "bell",
//!     [Instruction::h(q0), Instruction::cx(q0, q1), Instruction::measure([q0, q1])],
//! )
//! .unwrap();
//!
//! let mut sim = Simulator::with_config(SimulatorConfig::default().with_seed(7));
//! let result = sim.run(&circuit, 100).unwrap();
//! let counts = result.histogram(&MeasurementKey::new("q0_q1")).unwrap();
//! assert_eq!(counts.get("00") + counts.get("11"), 100);
//! ```

pub mod error;
pub mod simulator;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use simulator::{Counts, RunResult, Simulator, SimulatorConfig};
pub use statevector::Statevector;
