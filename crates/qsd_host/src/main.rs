mod dump;
mod engine;
mod vector_engine;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qsd_core::amplitude::FormatConfig;
use qsd_io::reader;
use qsd_io::sink::StdoutChannel;
use qsd_io::target::OutputTarget;
use vector_engine::VectorEngine;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump raw amplitude pairs for a register or a qubit subset.
    Raw {
        /// State-vector file, one `re im` pair per line.
        #[arg(short, long)]
        state: String,
        /// Output file path; omit to print to the console.
        #[arg(short, long)]
        out: Option<String>,
        /// Comma-separated qubit ids to dump; omit for the whole register.
        #[arg(short, long, value_delimiter = ',')]
        qubits: Option<Vec<usize>>,
    },
    /// Dump in Dirac notation with fixed-precision amplitudes.
    Dirac {
        #[arg(short, long)]
        state: String,
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short, long, value_delimiter = ',')]
        qubits: Option<Vec<usize>>,
        /// Fractional digits kept when rendering magnitudes.
        #[arg(long, default_value_t = 3)]
        precision: usize,
        /// Components below this magnitude are treated as zero.
        #[arg(long, default_value_t = 1e-10)]
        tolerance: f64,
        /// Remove the global phase of the first significant amplitude.
        #[arg(long)]
        relative_phases: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut channel = StdoutChannel;
    match cli.command {
        Commands::Raw { state, out, qubits } => {
            let engine = VectorEngine::new(reader::load_state_file(&state)?);
            let target = OutputTarget::resolve(out.as_deref());
            match qubits {
                Some(qubits) => dump::dump_subset(&engine, &mut channel, &target, &qubits)?,
                None => dump::dump_all(&engine, &mut channel, &target)?,
            }
        }
        Commands::Dirac {
            state,
            out,
            qubits,
            precision,
            tolerance,
            relative_phases,
        } => {
            let engine = VectorEngine::new(reader::load_state_file(&state)?);
            let target = OutputTarget::resolve(out.as_deref());
            let config = FormatConfig {
                precision,
                zero_tolerance: tolerance,
                relative_phases,
            };
            dump::dump_dirac(&engine, &mut channel, &target, qubits.as_deref(), config)?;
        }
    }
    Ok(())
}
