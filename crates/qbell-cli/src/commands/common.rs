//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::ValueEnum;

use qbell_gates::{BellIndex, bell_measurement, bell_state_circuit};
use qbell_ir::{Circuit, QubitId};

/// How `prepare` prints a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CircuitFormat {
    Text,
    Json,
    Qasm,
}

/// How `run` prints results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultFormat {
    Table,
    Json,
}

/// Build the preparation circuit, optionally followed by a Bell measurement.
pub fn build_circuit(index: BellIndex, q0: QubitId, q1: QubitId, measure: bool) -> Result<Circuit> {
    let mut circuit = bell_state_circuit(q0, q1, index)
        .with_context(|| format!("Failed to prepare Bell state {index} on ({q0}, {q1})"))?;
    if measure {
        bell_measurement(&mut circuit, q0, q1)
            .with_context(|| format!("Failed to append Bell measurement on ({q0}, {q1})"))?;
    }
    Ok(circuit)
}

/// Render a circuit in the requested format.
pub fn render_circuit(circuit: &Circuit, format: CircuitFormat) -> Result<String> {
    match format {
        CircuitFormat::Text => Ok(circuit.to_string()),
        CircuitFormat::Json => {
            serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")
        }
        CircuitFormat::Qasm => {
            qbell_qasm3::emit(circuit).map_err(|e| anyhow::anyhow!("QASM emission failed: {e}"))
        }
    }
}
