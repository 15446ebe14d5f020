//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qbell_gates::{BellIndex, decode_outcome};
use qbell_ir::{MeasurementKey, QubitId};
use qbell_sim::{Simulator, SimulatorConfig};

use super::common::{ResultFormat, build_circuit};

/// JSON shape of a run.
#[derive(Serialize)]
struct RunReport<'a> {
    index: BellIndex,
    state: String,
    shots: u32,
    seed: Option<u64>,
    counts: Vec<(&'a str, u64)>,
    decoded: Option<BellIndex>,
}

/// Execute the run command.
pub fn execute(index: BellIndex, shots: u32, seed: Option<u64>, format: ResultFormat) -> Result<()> {
    let (q0, q1) = (QubitId(0), QubitId(1));
    let circuit = build_circuit(index, q0, q1, true)?;

    let mut simulator = Simulator::with_config(SimulatorConfig {
        seed,
        ..SimulatorConfig::default()
    });

    let result = simulator
        .run(&circuit, shots)
        .context("Simulation failed")?;
    let key = MeasurementKey::for_qubits(&[q0, q1]);
    let counts = result.histogram(&key).context("Missing Bell measurement record")?;

    let decoded = counts.most_frequent().and_then(|(bits, _)| parse_bits(bits));

    match format {
        ResultFormat::Json => {
            let report = RunReport {
                index,
                state: index.state().to_string(),
                shots,
                seed,
                counts: counts.sorted(),
                decoded,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ResultFormat::Table => {
            println!(
                "{} Bell state {} (index {}), {} shots",
                style("→").cyan().bold(),
                style(index.state()).green(),
                index,
                shots
            );
            println!();
            println!("  {:<10} {:>8} {:>8}", "Outcome", "Count", "Prob");
            println!("  {:-<10} {:->8} {:->8}", "", "", "");
            for (bits, count) in counts.sorted() {
                let prob = count as f64 / f64::from(shots);
                println!("  {bits:<10} {count:>8} {prob:>8.4}");
            }
            println!();
            match decoded {
                Some(found) if found == index => println!(
                    "{} Decoded index {} ({})",
                    style("✓").green().bold(),
                    found,
                    found.state()
                ),
                Some(found) => println!(
                    "{} Decoded index {} does not match prepared {}",
                    style("✗").red().bold(),
                    found,
                    index
                ),
                None => println!("{} No outcomes recorded", style("!").yellow().bold()),
            }
        }
    }
    Ok(())
}

/// Parse a two-character outcome string such as `"10"`.
fn parse_bits(bits: &str) -> Option<BellIndex> {
    let mut chars = bits.chars();
    let bit = |c: Option<char>| match c {
        Some('0') => Some(false),
        Some('1') => Some(true),
        _ => None,
    };
    let m0 = bit(chars.next())?;
    let m1 = bit(chars.next())?;
    chars.next().is_none().then(|| decode_outcome(m0, m1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("10"), Some(BellIndex::new(true, false)));
        assert_eq!(parse_bits("1"), None);
        assert_eq!(parse_bits("100"), None);
        assert_eq!(parse_bits("2x"), None);
    }

    #[test]
    fn test_execute_seeded() {
        for index in BellIndex::ALL {
            execute(index, 16, Some(3), ResultFormat::Json).unwrap();
        }
    }
}
