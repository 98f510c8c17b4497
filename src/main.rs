//! mcpi CLI - Monte Carlo estimation of π
//!
//! Thin wrapper; all logic lives in `mcpi::cli`.

use std::process::ExitCode;

fn main() -> ExitCode {
    mcpi::cli::run_cli(mcpi::cli::Args::parse())
}
