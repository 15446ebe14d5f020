//! States command implementation.

use anyhow::Result;
use console::style;

use qbell_gates::{BellIndex, make_bell_state};
use qbell_ir::QubitId;

/// Execute the states command.
pub fn execute() -> Result<()> {
    let (q0, q1) = (QubitId(0), QubitId(1));
    println!("{}", style("Bell states:").bold());
    for index in BellIndex::ALL {
        let sequence = make_bell_state(q0, q1, index)
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        println!(
            "  {} {:<3} {}",
            style(index).cyan(),
            style(index.state()).green(),
            sequence
        );
    }
    Ok(())
}
