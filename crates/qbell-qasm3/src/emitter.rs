//! QASM3 emitter for serializing circuits.

use rustc_hash::FxHashMap;

use qbell_ir::{Circuit, Instruction, InstructionKind, MeasurementKey, QubitId};

use crate::error::{Qasm3Error, Qasm3Result};

/// Name of the qubit register in emitted programs.
const QUBIT_REGISTER: &str = "q";

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> Qasm3Result<String> {
    let mut emitter = Emitter::new(circuit);
    emitter.emit_circuit(circuit)
}

/// QASM3 emitter.
struct Emitter {
    output: String,
    /// Dense register index for each qubit handle.
    layout: FxHashMap<QubitId, usize>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> Self {
        let layout = circuit
            .all_qubits()
            .into_iter()
            .enumerate()
            .map(|(i, q)| (q, i))
            .collect();
        Self {
            output: String::new(),
            layout,
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> Qasm3Result<String> {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        let num_qubits = self.layout.len();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] {QUBIT_REGISTER};"));
        }

        let mut declared = false;
        for op in circuit.all_operations() {
            if let Some(key) = op.measurement_key() {
                check_identifier(key)?;
                self.writeln(&format!("bit[{}] {key};", op.qubits.len()));
                declared = true;
            }
        }

        if num_qubits > 0 || declared {
            self.writeln("");
        }

        for op in circuit.all_operations() {
            self.emit_instruction(op);
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits = self.emit_qubits(&instruction.qubits);
                self.writeln(&format!("{} {qubits};", gate.name()));
            }

            InstructionKind::Measure { key } => {
                for (bit, qubit) in instruction.qubits.iter().enumerate() {
                    let target = self.emit_qubit(*qubit);
                    self.writeln(&format!("{key}[{bit}] = measure {target};"));
                }
            }

            InstructionKind::Barrier => {
                let qubits = self.emit_qubits(&instruction.qubits);
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
    }

    fn emit_qubit(&self, qubit: QubitId) -> String {
        format!("{QUBIT_REGISTER}[{}]", self.layout[&qubit])
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|q| self.emit_qubit(*q))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Measurement keys become `bit` register names.
fn check_identifier(key: &MeasurementKey) -> Qasm3Result<()> {
    let name = key.as_str();
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Qasm3Error::InvalidIdentifier(name.to_string()));
    }
    if name == QUBIT_REGISTER || RESERVED.contains(&name) {
        return Err(Qasm3Error::ReservedIdentifier(name.to_string()));
    }
    Ok(())
}

const RESERVED: &[&str] = &[
    "qubit", "bit", "measure", "reset", "barrier", "gate", "include", "h", "x", "y", "z", "s",
    "sdg", "id", "cx", "cz", "swap",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_empty() {
        let circuit = Circuit::new("empty");
        let qasm = emit(&circuit).unwrap();
        assert_eq!(qasm, "OPENQASM 3.0;\ninclude \"stdgates.inc\";\n\n");
    }

    #[test]
    fn test_emit_sparse_layout() {
        let circuit =
            Circuit::from_ops("sparse", [Instruction::cx(QubitId(8), QubitId(3))]).unwrap();
        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("cx q[1], q[0];"));
    }

    #[test]
    fn test_global_barrier_keeps_position() {
        let mut circuit =
            Circuit::from_ops("b", [Instruction::h(QubitId(0)), Instruction::cx(QubitId(0), QubitId(1))])
                .unwrap();
        circuit.barrier(Vec::<QubitId>::new()).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.ends_with("h q[0];\ncx q[0], q[1];\nbarrier;\n"));
    }

    #[test]
    fn test_invalid_key() {
        let circuit = Circuit::from_ops(
            "bad",
            [Instruction::measure_with_key([QubitId(0)], "0bad")],
        )
        .unwrap();
        assert!(matches!(emit(&circuit), Err(Qasm3Error::InvalidIdentifier(_))));
    }

    #[test]
    fn test_reserved_key() {
        let circuit =
            Circuit::from_ops("bad", [Instruction::measure_with_key([QubitId(0)], "q")]).unwrap();
        assert!(matches!(emit(&circuit), Err(Qasm3Error::ReservedIdentifier(_))));
    }
}
