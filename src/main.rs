//! Entry point for the nc-scan diagnostic tool.
//! Opens a NetCDF file, classifies its variables and prints the report.

use clap::Parser;
use nc_scan::{classify_path, write_report};
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> nc_scan::Result<()> {
    let classification = classify_path(&args.file)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&classification, &mut out)?;
    out.flush()?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(error) = run(&args) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}
