//! Bell-basis measurement.

use qbell_ir::{Circuit, Instruction, IrResult, MeasurementKey, QubitId};
use tracing::debug;

use crate::index::BellIndex;

/// Append a Bell-basis measurement of `(q0, q1)` to `circuit`.
///
/// Appends `CX(q0, q1)` and `H(q0)`, then a joint measurement of both
/// qubits under the default key (`q0_q1` style). IR errors pass through
/// unchanged.
pub fn bell_measurement(circuit: &mut Circuit, q0: QubitId, q1: QubitId) -> IrResult<&mut Circuit> {
    let key = MeasurementKey::for_qubits(&[q0, q1]);
    bell_measurement_with_key(circuit, q0, q1, key)
}

/// Same as [`bell_measurement`], recording under an explicit key.
pub fn bell_measurement_with_key(
    circuit: &mut Circuit,
    q0: QubitId,
    q1: QubitId,
    key: impl Into<MeasurementKey>,
) -> IrResult<&mut Circuit> {
    let key = key.into();
    debug!(%q0, %q1, %key, circuit = circuit.name(), "appending Bell measurement");
    circuit.append([Instruction::cx(q0, q1), Instruction::h(q0)])?;
    circuit.append([Instruction::measure_with_key([q0, q1], key)])
}

/// Decode the `(q0, q1)` bits read by a Bell measurement.
///
/// A Bell measurement of the state prepared with index `(a, b)` reads
/// `(a, b)` with certainty.
pub fn decode_outcome(m0: bool, m1: bool) -> BellIndex {
    BellIndex::new(m0, m1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q0: QubitId = QubitId(0);
    const Q1: QubitId = QubitId(1);

    #[test]
    fn test_appends_in_order() {
        let mut circuit = Circuit::new("m");
        bell_measurement(&mut circuit, Q0, Q1).unwrap();

        let ops: Vec<_> = circuit.all_operations().cloned().collect();
        assert_eq!(
            ops,
            vec![
                Instruction::cx(Q0, Q1),
                Instruction::h(Q0),
                Instruction::measure([Q0, Q1]),
            ]
        );
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_appends_after_existing_ops() {
        let mut circuit = Circuit::new("m");
        circuit.x(QubitId(2)).unwrap().h(Q0).unwrap();
        bell_measurement(&mut circuit, Q0, Q1).unwrap();

        let tail: Vec<_> = circuit.all_operations().skip(2).cloned().collect();
        assert_eq!(
            tail,
            vec![
                Instruction::cx(Q0, Q1),
                Instruction::h(Q0),
                Instruction::measure([Q0, Q1]),
            ]
        );
    }

    #[test]
    fn test_returns_circuit_for_chaining() {
        let mut circuit = Circuit::new("m");
        let depth = bell_measurement(&mut circuit, Q0, Q1).unwrap().depth();
        assert_eq!(depth, 3);
    }

    #[test]
    fn test_explicit_key() {
        let mut circuit = Circuit::new("m");
        bell_measurement_with_key(&mut circuit, Q0, Q1, "bell").unwrap();
        assert_eq!(circuit.measurement_keys(), vec![MeasurementKey::new("bell")]);
    }

    #[test]
    fn test_second_measurement_same_pair_rejected() {
        let mut circuit = Circuit::new("m");
        bell_measurement(&mut circuit, Q0, Q1).unwrap();
        assert!(bell_measurement(&mut circuit, Q0, Q1).is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_outcome(true, false), BellIndex::new(true, false));
    }
}
