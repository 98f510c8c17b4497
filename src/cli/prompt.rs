//! Point-count input.
//!
//! Counts come from the command line or an interactive prompt. Invalid
//! input is reported and asked for again; nothing downstream sees it.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::error::{SimError, SimResult};

/// Prompt for the animated run's point count.
pub const COUNT_PROMPT: &str = "Enter the number of points to generate (positive integer): ";

/// Prompt for the static run's interval.
pub const INTERVAL_PROMPT: &str = "Enter the interval (points sampled = interval squared): ";

/// Reply to input that is not an integer.
pub const NOT_A_NUMBER: &str = "Invalid input. Please enter a positive integer.";

/// Reply to an integer that is zero or negative.
pub const NOT_POSITIVE: &str = "Please enter a positive integer.";

/// Parse a positive point count.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] carrying [`NOT_A_NUMBER`] or
/// [`NOT_POSITIVE`] as its message, or a range message for values above
/// `u64::MAX`.
pub fn parse_point_count(input: &str) -> SimResult<u64> {
    let value: i128 = input
        .trim()
        .parse()
        .map_err(|_| SimError::invalid_argument(NOT_A_NUMBER))?;
    if value <= 0 {
        return Err(SimError::invalid_argument(NOT_POSITIVE));
    }
    u64::try_from(value)
        .map_err(|_| SimError::invalid_argument(format!("{value} is too large")))
}

/// Ask until a positive integer is entered.
///
/// # Errors
///
/// Returns an I/O error if reading fails or input ends before a valid
/// count was given.
pub fn prompt_point_count<R, W>(input: &mut R, output: &mut W, prompt: &str) -> SimResult<u64>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(SimError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a point count was entered",
            )));
        }

        match parse_point_count(&line) {
            Ok(count) => return Ok(count),
            Err(SimError::InvalidArgument { message }) => {
                warn!(input = line.trim(), "rejected point count");
                writeln!(output, "{message}")?;
            }
            Err(other) => return Err(other),
        }
    }
}

/// Use `raw` if it is a valid count, otherwise fall back to prompting.
///
/// # Errors
///
/// Same as [`prompt_point_count`].
pub fn resolve_point_count<R, W>(
    raw: Option<&str>,
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> SimResult<u64>
where
    R: BufRead,
    W: Write,
{
    if let Some(raw) = raw {
        match parse_point_count(raw) {
            Ok(count) => return Ok(count),
            Err(SimError::InvalidArgument { message }) => {
                warn!(input = raw, "rejected point count argument");
                writeln!(output, "{message}")?;
            }
            Err(other) => return Err(other),
        }
    }
    prompt_point_count(input, output, prompt)
}

/// Reject counts above `max_points`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `count > max_points`.
pub fn check_limit(count: u64, max_points: u64) -> SimResult<u64> {
    if count > max_points {
        return Err(SimError::invalid_argument(format!(
            "{count} points requested, limit is {max_points}"
        )));
    }
    Ok(count)
}

/// Resolve a count and feed it to `accept`, asking again while `accept`
/// rejects it with a retryable error.
///
/// # Errors
///
/// Returns input errors from [`prompt_point_count`] and any non-retryable
/// error from `accept`.
pub fn resolve_accepted<R, W, T, F>(
    raw: Option<&str>,
    input: &mut R,
    output: &mut W,
    prompt: &str,
    mut accept: F,
) -> SimResult<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(u64) -> SimResult<T>,
{
    let mut raw = raw;
    loop {
        let count = resolve_point_count(raw.take(), input, output, prompt)?;
        match accept(count) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => {
                warn!(count, error = %err, "rejected point count");
                writeln!(output, "{err}")?;
            }
            Err(err) => return Err(err),
        }
    }
}
