//! Workbook CLI. Builds the static content artifact for the 28-day workbook.
//!
//! Parses two editions of the workbook text, merges the second edition's
//! example passages into the first, and writes the result for the UI.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
