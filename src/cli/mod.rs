//! Command-line interface.
//!
//! The entry point [`run_cli`] is called from `main.rs` with parsed
//! arguments; everything else here is reachable from tests.

mod args;
mod commands;
mod output;
pub mod prompt;

pub use args::{Args, Command, RunOptions};
pub use commands::{
    animate, animate_count_from, estimate, estimate_from, estimate_with, load_config, make_rng,
    run_cli,
};
pub use output::{format_summary, print_estimate_result, print_help, print_version, version_text};
