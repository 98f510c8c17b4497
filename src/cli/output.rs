//! CLI output formatting.
//!
//! Text is built as `String`s so tests can check it; the `print_*`
//! functions only write it to stdout.

use crate::config::PlotConfig;
use crate::engine::RunState;

/// Version line with build metadata when available.
#[must_use]
pub fn version_text() -> String {
    let mut text = format!("mcpi {}", env!("CARGO_PKG_VERSION"));
    if let Some(hash) = option_env!("MCPI_GIT_HASH") {
        text.push_str(&format!(" ({hash})"));
    }
    if let Some(ts) = option_env!("MCPI_BUILD_TIMESTAMP") {
        text.push_str(&format!(" built {ts}"));
    }
    text
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_text());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"mcpi - Monte Carlo estimation of π

USAGE:
    mcpi <COMMAND> [OPTIONS]

COMMANDS:
    estimate [INTERVAL]         Sample INTERVAL² points, print the estimate and a plot
    animate [COUNT]             Watch COUNT points accumulate in the terminal

    help                        Show this help message
    version                     Show version information

OPTIONS:
    --seed <N>                  Use a fixed random seed
    -c, --config <FILE>         Load settings from a YAML file
    -v, --verbose               Enable debug logging

    A missing or invalid INTERVAL/COUNT is asked for interactively.

LIVE VIEW KEYS:
    Space, p                    Pause / resume
    r                           Reset with a new point count
    q, Esc                      Quit

EXAMPLES:
    mcpi estimate 300
    mcpi estimate 1000 --seed 42
    mcpi animate 5000 --config mcpi.yaml
"
    );
}

/// Summary lines of a static run.
#[must_use]
pub fn format_summary(state: &RunState) -> String {
    let estimate = state
        .pi_estimate()
        .map_or_else(|| "-".to_string(), |e| format!("{e:.6}"));
    format!(
        "Total points: {}\nPoints hit: {}\nPi estimate: {estimate}\n",
        state.total_points_generated(),
        state.points_inside_circle(),
    )
}

/// Print a finished static run followed by its scatter plot.
pub fn print_estimate_result(state: &RunState, plot: &PlotConfig) {
    print!("{}", format_summary(state));
    println!();
    print!("{}", plot_text(state, plot));
}

#[cfg(feature = "tui")]
fn plot_text(state: &RunState, plot: &PlotConfig) -> String {
    crate::tui::render_scatter(state, plot.width, plot.height)
}

#[cfg(not(feature = "tui"))]
fn plot_text(_state: &RunState, _plot: &PlotConfig) -> String {
    "(plot unavailable: built without the `tui` feature)\n".to_string()
}
