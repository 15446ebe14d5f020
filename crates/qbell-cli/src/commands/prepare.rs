//! Prepare command implementation.

use anyhow::Result;
use tracing::info;

use qbell_gates::BellIndex;
use qbell_ir::QubitId;

use super::common::{CircuitFormat, build_circuit, render_circuit};

/// Execute the prepare command.
pub fn execute(index: BellIndex, q0: u32, q1: u32, measure: bool, format: CircuitFormat) -> Result<()> {
    let circuit = build_circuit(index, QubitId(q0), QubitId(q1), measure)?;
    info!(
        "Built {}: {} operations, depth {}",
        circuit.name(),
        circuit.num_operations(),
        circuit.depth()
    );

    print!("{}", render_circuit(&circuit, format)?);
    if format == CircuitFormat::Json {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_all_formats() {
        for format in [CircuitFormat::Text, CircuitFormat::Json, CircuitFormat::Qasm] {
            execute(BellIndex::new(true, false), 0, 1, true, format).unwrap();
        }
    }

    #[test]
    fn test_execute_same_qubit_fails() {
        assert!(execute(BellIndex::default(), 4, 4, false, CircuitFormat::Text).is_err());
    }
}
