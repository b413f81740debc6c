use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod demo;
mod info;
mod query;

/// aptread - Atom Probe Tomography Data Reader
#[derive(Parser)]
#[command(name = "aptread")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display summary information about a POS/RNG pair
    Info {
        /// Input POS file path
        #[arg(value_name = "POS")]
        pos: PathBuf,

        /// Input RNG file path
        #[arg(value_name = "RNG")]
        rng: PathBuf,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Query point positions by ion label, atom symbol, or range ids
    Query {
        /// Input POS file path
        #[arg(value_name = "POS")]
        pos: PathBuf,

        /// Input RNG file path
        #[arg(value_name = "RNG")]
        rng: PathBuf,

        /// Select by ion label, e.g. "Al2O3"
        #[arg(long)]
        ion: Option<String>,

        /// Select by atom symbol, e.g. "Al"
        #[arg(long)]
        atom: Option<String>,

        /// Select by range ids; -1 selects unranged points
        #[arg(long, num_args = 1.., allow_negative_numbers = true)]
        range: Option<Vec<i32>>,

        /// Write matching positions to a CSV file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic POS/RNG fixture pair
    Demo {
        /// Output directory for the fixture files
        #[arg(value_name = "DIR")]
        output: PathBuf,

        /// Number of points to generate
        #[arg(long, default_value_t = 10_000)]
        points: usize,
    },
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { pos, rng, json } => info::run(pos, rng, json),
        Commands::Query {
            pos,
            rng,
            ion,
            atom,
            range,
            output,
        } => query::run(pos, rng, ion, atom, range, output),
        Commands::Demo { output, points } => demo::run(output, points),
    }
}
