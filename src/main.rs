//! # aptread CLI
//!
//! Command-line companion to the `aptread` library.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize an acquisition
//! aptread info R04.pos R04.rng
//!
//! # Export all aluminium positions
//! aptread query R04.pos R04.rng --atom Al --output al.csv
//!
//! # Generate a synthetic fixture pair
//! aptread demo fixtures/
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
