//! qbell command-line interface.
//!
//! Prepares Bell states, appends Bell-basis measurements and runs the
//! result on the local statevector simulator.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use qbell_gates::BellIndex;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{CircuitFormat, ResultFormat};
use commands::{prepare, run, states, version};

/// qbell - Bell-state preparation and measurement
#[derive(Parser)]
#[command(name = "qbell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the preparation circuit for a Bell state
    Prepare {
        /// Bell index as two bits (00, 01, 10, 11)
        #[arg(short, long, default_value = "00")]
        index: BellIndex,

        /// First (control) qubit
        #[arg(long, default_value = "0")]
        q0: u32,

        /// Second (target) qubit
        #[arg(long, default_value = "1")]
        q1: u32,

        /// Append a Bell-basis measurement
        #[arg(short, long)]
        measure: bool,

        /// Output format (text, json, qasm)
        #[arg(short, long, default_value = "text")]
        format: CircuitFormat,
    },

    /// Prepare a Bell state, measure it in the Bell basis and simulate
    Run {
        /// Bell index as two bits (00, 01, 10, 11)
        #[arg(short, long, default_value = "00")]
        index: BellIndex,

        /// Number of shots
        #[arg(short, long, default_value = "1024", env = "QBELL_SHOTS")]
        shots: u32,

        /// RNG seed for reproducible sampling
        #[arg(long, env = "QBELL_SEED")]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: ResultFormat,
    },

    /// List the four Bell states and their preparation sequences
    States,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Prepare {
            index,
            q0,
            q1,
            measure,
            format,
        } => prepare::execute(index, q0, q1, measure, format),

        Commands::Run {
            index,
            shots,
            seed,
            format,
        } => run::execute(index, shots, seed, format),

        Commands::States => states::execute(),

        Commands::Version => version::execute(),
    }
}
