//! Bell-state preparation sequences.

use qbell_ir::{Circuit, Instruction, IrResult, QubitId};
use tracing::debug;

use crate::index::BellIndex;

/// Gate sequence preparing the Bell state selected by `index` on `(q0, q1)`.
///
/// Emits `X(q0)` if `index.flip_q0`, then `X(q1)` if `index.flip_q1`,
/// then `H(q0)` and `CX(q0, q1)`. The sequence is not validated; operand
/// errors surface when it is appended to a circuit.
pub fn make_bell_state(
    q0: QubitId,
    q1: QubitId,
    index: BellIndex,
) -> impl Iterator<Item = Instruction> {
    [
        index.flip_q0.then(|| Instruction::x(q0)),
        index.flip_q1.then(|| Instruction::x(q1)),
        Some(Instruction::h(q0)),
        Some(Instruction::cx(q0, q1)),
    ]
    .into_iter()
    .flatten()
}

/// Circuit holding only the preparation sequence for `index`.
pub fn bell_state_circuit(q0: QubitId, q1: QubitId, index: BellIndex) -> IrResult<Circuit> {
    debug!(%q0, %q1, %index, state = %index.state(), "preparing Bell state");
    Circuit::from_ops(format!("bell_{index}"), make_bell_state(q0, q1, index))
}
