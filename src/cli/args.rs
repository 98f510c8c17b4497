//! CLI argument parsing.
//!
//! Hand-rolled so parsing can be driven from any iterator of strings in
//! tests. Point counts are kept as raw text here; they are validated by
//! [`parse_point_count`](super::prompt::parse_point_count) when the command
//! runs, so a bad value falls back to an interactive prompt.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options shared by the sampling commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed overriding the config file.
    pub seed_override: Option<u64>,
    /// Path to a YAML config file.
    pub config_path: Option<PathBuf>,
    /// Enable debug logging.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sample `interval²` points at once and print the result with a plot.
    Estimate {
        /// Raw interval argument, if given.
        interval: Option<String>,
        /// Shared options.
        options: RunOptions,
    },
    /// Animate sampling of `count` points in the terminal.
    Animate {
        /// Raw point count argument, if given.
        count: Option<String>,
        /// Shared options.
        options: RunOptions,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "estimate" => {
                let (interval, options) = Self::parse_run_args(&args[2..]);
                Command::Estimate { interval, options }
            }
            "animate" => {
                let (count, options) = Self::parse_run_args(&args[2..]);
                Command::Animate { count, options }
            }
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse `[POSITIONAL] [--seed N] [--config FILE] [-v]` in any order.
    fn parse_run_args(args: &[String]) -> (Option<String>, RunOptions) {
        let mut positional = None;
        let mut options = RunOptions::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    if let Some(value) = args.get(i + 1) {
                        match value.parse() {
                            Ok(seed) => options.seed_override = Some(seed),
                            Err(_) => eprintln!("Ignoring invalid seed: {value}"),
                        }
                        i += 2;
                    } else {
                        eprintln!("Error: '--seed' requires a value");
                        i += 1;
                    }
                }
                "--config" | "-c" => {
                    if let Some(value) = args.get(i + 1) {
                        options.config_path = Some(PathBuf::from(value));
                        i += 2;
                    } else {
                        eprintln!("Error: '--config' requires a path");
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                    i += 1;
                }
                other => {
                    if positional.is_none() {
                        positional = Some(other.to_string());
                    } else {
                        eprintln!("Ignoring extra argument: {other}");
                    }
                    i += 1;
                }
            }
        }

        (positional, options)
    }
}
