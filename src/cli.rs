//! Defines command-line interface options using `clap` for the nc-scan binary.

use clap::Parser;
use std::path::PathBuf;

/// Classify the variables of a NetCDF file into science and metadata sets
#[derive(Parser, Debug)]
#[command(
    version,
    name = "nc-scan",
    about = "Scan a NetCDF file and list its science and metadata variables"
)]
pub struct Args {
    /// Path to the NetCDF file
    pub file: PathBuf,
}
