//! CLI command handlers.
//!
//! Each handler loads config, installs logging, resolves the point count
//! and runs. Errors are printed to stderr and turned into exit code 1.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use super::output::{print_estimate_result, print_help, print_version};
use super::prompt::{check_limit, resolve_accepted, COUNT_PROMPT, INTERVAL_PROMPT};
use super::{Args, Command, RunOptions};
use crate::config::PiConfig;
use crate::engine::{run_to_completion, RunState, SimRng};
use crate::error::SimResult;
use crate::logging::{self, Fallback};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Estimate { interval, options } => estimate(interval.as_deref(), &options),
        Command::Animate { count, options } => animate(count.as_deref(), &options),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load config and apply command-line overrides.
///
/// # Errors
///
/// Returns error if the config file cannot be loaded.
pub fn load_config(options: &RunOptions) -> SimResult<PiConfig> {
    let mut config = PiConfig::load_or_default(options.config_path.as_deref())?;
    if let Some(seed) = options.seed_override {
        config.seed = Some(seed);
    }
    Ok(config)
}

/// Build the random source from the configured seed or OS entropy.
///
/// # Errors
///
/// Returns [`crate::SimError::RandomSource`] if entropy is unavailable.
pub fn make_rng(seed: Option<u64>) -> SimResult<SimRng> {
    let rng = match seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy()?,
    };
    info!(seed = rng.master_seed(), fixed = seed.is_some(), "random source ready");
    Ok(rng)
}

fn start(options: &RunOptions, fallback: Fallback) -> SimResult<(PiConfig, Option<WorkerGuard>)> {
    let config = load_config(options)?;
    let guard = logging::init(&config.logging, options.verbose, fallback)?;
    Ok((config, guard))
}

/// Sample `interval²` points in one pass and print the result.
///
/// # Errors
///
/// Returns error on config, logging, input or random source failure.
pub fn estimate(raw_interval: Option<&str>, options: &RunOptions) -> SimResult<()> {
    let (config, _guard) = start(options, Fallback::Stderr)?;

    let state = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        estimate_from(raw_interval, &mut stdin.lock(), &mut stdout.lock(), &config)?
    };
    print_estimate_result(&state, &config.plot);
    Ok(())
}

/// Resolve an interval and run the static estimate, asking again while
/// `interval²` overflows or exceeds `max_points`.
///
/// # Errors
///
/// Returns input or random source failures.
pub fn estimate_from<R: BufRead, W: Write>(
    raw_interval: Option<&str>,
    input: &mut R,
    output: &mut W,
    config: &PiConfig,
) -> SimResult<RunState> {
    resolve_accepted(raw_interval, input, output, INTERVAL_PROMPT, |interval| {
        estimate_with(interval, config)
    })
}

/// Resolve the live view's point count, asking again while it exceeds
/// `max_points`.
///
/// # Errors
///
/// Returns input failures.
pub fn animate_count_from<R: BufRead, W: Write>(
    raw_count: Option<&str>,
    input: &mut R,
    output: &mut W,
    config: &PiConfig,
) -> SimResult<u64> {
    resolve_accepted(raw_count, input, output, COUNT_PROMPT, |count| {
        check_limit(count, config.max_points)
    })
}

/// Run the static estimate for `interval` with `config`.
///
/// # Errors
///
/// Same as [`run_to_completion`], plus random source failure.
pub fn estimate_with(interval: u64, config: &PiConfig) -> SimResult<RunState> {
    let mut rng = make_rng(config.seed)?;
    let state = run_to_completion(interval, config.max_points, &mut rng)?;
    info!(
        interval,
        points = state.total_points_generated(),
        inside = state.points_inside_circle(),
        estimate = state.pi_estimate().unwrap_or_default(),
        "static estimate complete"
    );
    Ok(state)
}

/// Animate sampling in the terminal.
///
/// # Errors
///
/// Returns error on config, logging, input, random source or terminal
/// failure.
#[cfg(feature = "tui")]
pub fn animate(raw_count: Option<&str>, options: &RunOptions) -> SimResult<()> {
    use crate::engine::Session;
    use crate::tui::{self, PiApp};

    let (config, _guard) = start(options, Fallback::Silent)?;

    let count = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        animate_count_from(raw_count, &mut stdin.lock(), &mut stdout.lock(), &config)?
    };

    let rng = make_rng(config.seed)?;
    let session = Session::new(count, rng, config.batch_size)?;
    let mut app = PiApp::configured(session, config.chart.clone(), config.max_points);
    tui::run(&mut app, config.tick_interval())
}

/// Animate sampling in the terminal.
///
/// # Errors
///
/// Always fails: the live view needs the `tui` feature.
#[cfg(not(feature = "tui"))]
pub fn animate(_raw_count: Option<&str>, _options: &RunOptions) -> SimResult<()> {
    Err(crate::error::SimError::config(
        "the live view requires building with the `tui` feature",
    ))
}
