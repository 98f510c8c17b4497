//! Monte Carlo π estimator.
//!
//! Uniform points are drawn from the square `[-1, 1] × [-1, 1]`; the share
//! landing inside the inscribed unit circle approaches `π / 4`.
//!
//! ```text
//! Estimator:     π̂ = 4 · k / n          (k inside, n sampled)
//! Error:         e = |π − π̂| / π · 100  (percent)
//! Standard Err:  SE = 4 · sqrt(p(1 − p) / n),  p = k / n
//! ```
//!
//! [`RunState`] is a plain value: the driving loop owns it and mutates it
//! only through [`RunState::advance`]. A reset builds a new value.

use serde::Serialize;
use std::f64::consts::PI;

use super::rng::SampleSource;
use crate::error::{SimError, SimResult};

/// Points added per animation tick unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: u64 = 50;

/// A sampled coordinate and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
    inside_circle: bool,
}

impl Point {
    /// Classify a coordinate against the unit circle (boundary counts as inside).
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            inside_circle: x * x + y * y <= 1.0,
        }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Whether the point lies within the unit circle.
    #[must_use]
    pub const fn inside_circle(&self) -> bool {
        self.inside_circle
    }
}

/// Draw one point uniformly from the square and classify it.
///
/// `x` is drawn before `y`; nothing else is consumed from `source`.
pub fn generate_point<S: SampleSource + ?Sized>(source: &mut S) -> Point {
    let x = source.sample_range(-1.0, 1.0);
    let y = source.sample_range(-1.0, 1.0);
    Point::new(x, y)
}

/// Relative deviation of `estimate` from π, in percent.
#[must_use]
pub fn error_percent(estimate: f64) -> f64 {
    ((PI - estimate) / PI * 100.0).abs()
}

/// State of one estimation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunState {
    /// Target number of points for this run (always positive).
    total_points_requested: u64,
    /// Points inside the circle so far.
    points_inside_circle: u64,
    /// Every generated point, in generation order.
    points: Vec<Point>,
    /// `(points generated, error percent)` after each point.
    error_history: Vec<(u64, f64)>,
}

impl RunState {
    /// Start a fresh run targeting `total_points` points.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `total_points` is zero.
    pub fn new(total_points: u64) -> SimResult<Self> {
        if total_points == 0 {
            return Err(SimError::invalid_argument(
                "point count must be a positive integer",
            ));
        }
        Ok(Self {
            total_points_requested: total_points,
            points_inside_circle: 0,
            points: Vec::new(),
            error_history: Vec::new(),
        })
    }

    /// Generate up to `batch_size` more points.
    ///
    /// Never overshoots the requested total; a finished run is left
    /// untouched. Returns the number of points actually added.
    pub fn advance<S: SampleSource + ?Sized>(&mut self, source: &mut S, batch_size: u64) -> u64 {
        let to_add = batch_size.min(self.remaining());
        if to_add == 0 {
            return 0;
        }

        if let Ok(additional) = usize::try_from(to_add) {
            self.points.reserve(additional);
            self.error_history.reserve(additional);
        }

        for _ in 0..to_add {
            let point = generate_point(source);
            if point.inside_circle() {
                self.points_inside_circle += 1;
            }
            self.points.push(point);

            let n = self.total_points_generated();
            let estimate = 4.0 * self.points_inside_circle as f64 / n as f64;
            self.error_history.push((n, error_percent(estimate)));
        }

        to_add
    }

    /// Whether every requested point has been generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_points_generated() >= self.total_points_requested
    }

    /// Target point count.
    #[must_use]
    pub const fn total_points_requested(&self) -> u64 {
        self.total_points_requested
    }

    /// Points generated so far.
    #[must_use]
    pub fn total_points_generated(&self) -> u64 {
        self.points.len() as u64
    }

    /// Points still to generate.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.total_points_requested
            .saturating_sub(self.total_points_generated())
    }

    /// Points that landed inside the circle.
    #[must_use]
    pub const fn points_inside_circle(&self) -> u64 {
        self.points_inside_circle
    }

    /// All generated points, oldest first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Error after each generated point, as `(n, percent)`.
    #[must_use]
    pub fn error_history(&self) -> &[(u64, f64)] {
        &self.error_history
    }

    /// Current π estimate, or `None` before the first point.
    #[must_use]
    pub fn pi_estimate(&self) -> Option<f64> {
        let n = self.total_points_generated();
        (n > 0).then(|| 4.0 * self.points_inside_circle as f64 / n as f64)
    }

    /// Error of the latest estimate in percent, or `None` before the first point.
    #[must_use]
    pub fn error_percent(&self) -> Option<f64> {
        self.error_history.last().map(|&(_, err)| err)
    }

    /// Share of points inside the circle in percent.
    #[must_use]
    pub fn hit_percent(&self) -> Option<f64> {
        let n = self.total_points_generated();
        (n > 0).then(|| self.points_inside_circle as f64 / n as f64 * 100.0)
    }

    /// Binomial standard error of the π estimate.
    #[must_use]
    pub fn standard_error(&self) -> Option<f64> {
        let n = self.total_points_generated();
        if n == 0 {
            return None;
        }
        let p = self.points_inside_circle as f64 / n as f64;
        Some(4.0 * (p * (1.0 - p) / n as f64).sqrt())
    }

    /// Largest error seen so far, in percent.
    #[must_use]
    pub fn max_error_percent(&self) -> f64 {
        self.error_history
            .iter()
            .map(|&(_, err)| err)
            .fold(0.0, f64::max)
    }
}

/// Sample `interval²` points in one pass.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `interval` is zero, if
/// `interval²` overflows, or if it exceeds `max_points`.
pub fn run_to_completion<S: SampleSource + ?Sized>(
    interval: u64,
    max_points: u64,
    source: &mut S,
) -> SimResult<RunState> {
    let total = interval
        .checked_mul(interval)
        .ok_or_else(|| SimError::invalid_argument(format!("interval {interval} is too large")))?;
    if total > max_points {
        return Err(SimError::invalid_argument(format!(
            "interval {interval} requests {total} points, limit is {max_points}"
        )));
    }

    let mut state = RunState::new(total)?;
    state.advance(source, total);
    Ok(state)
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;
    use crate::engine::rng::SimRng;

    #[test]
    fn test_point_classification() {
        assert!(Point::new(0.0, 0.0).inside_circle());
        assert!(Point::new(0.5, 0.5).inside_circle());
        assert!(!Point::new(0.9, 0.9).inside_circle());
        assert!(!Point::new(-0.9, 0.5).inside_circle());
    }

    #[test]
    fn test_point_boundary_is_inside() {
        assert!(Point::new(1.0, 0.0).inside_circle());
        assert!(Point::new(0.0, -1.0).inside_circle());
        assert!(Point::new(-1.0, 0.0).inside_circle());
    }

    #[test]
    fn test_generate_point_draws_x_then_y() {
        let mut source = ScriptedSource::new(&[0.25, -0.75]);
        let p = generate_point(&mut source);
        assert!((p.x() - 0.25).abs() < f64::EPSILON);
        assert!((p.y() + 0.75).abs() < f64::EPSILON);
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn test_generate_point_bounds() {
        let mut rng = SimRng::new(42);
        for _ in 0..10_000 {
            let p = generate_point(&mut rng);
            assert!(p.x().abs() <= 1.0 && p.y().abs() <= 1.0, "{p:?}");
        }
    }

    #[test]
    fn test_new_rejects_zero() {
        let err = RunState::new(0).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { .. }));
    }

    #[test]
    fn test_new_is_empty() {
        let state = RunState::new(10).unwrap();
        assert_eq!(state.total_points_requested(), 10);
        assert_eq!(state.total_points_generated(), 0);
        assert_eq!(state.points_inside_circle(), 0);
        assert!(state.points().is_empty());
        assert!(state.error_history().is_empty());
        assert!(!state.is_complete());
        assert_eq!(state.remaining(), 10);
    }

    #[test]
    fn test_estimates_undefined_before_first_point() {
        let state = RunState::new(10).unwrap();
        assert!(state.pi_estimate().is_none());
        assert!(state.error_percent().is_none());
        assert!(state.hit_percent().is_none());
        assert!(state.standard_error().is_none());
        assert!(state.max_error_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_scripted_sequence_exact_counts() {
        // in, out, in, in
        let mut source = ScriptedSource::new(&[0.0, 0.0, 0.9, 0.9, 0.5, 0.5, 1.0, 0.0]);
        let mut state = RunState::new(4).unwrap();
        let added = state.advance(&mut source, 10);

        assert_eq!(added, 4);
        assert_eq!(state.points_inside_circle(), 3);
        assert_eq!(state.pi_estimate(), Some(3.0));
        assert_eq!(state.hit_percent(), Some(75.0));

        let expected_error = (PI - 3.0) / PI * 100.0;
        let err = state.error_percent().unwrap();
        assert!((err - expected_error).abs() < 1e-12);
    }

    #[test]
    fn test_error_history_tracks_each_point() {
        // in, out, in, in => estimates 4, 2, 8/3, 3
        let mut source = ScriptedSource::new(&[0.0, 0.0, 0.9, 0.9, 0.5, 0.5, 1.0, 0.0]);
        let mut state = RunState::new(4).unwrap();
        state.advance(&mut source, 4);

        let expected: Vec<(u64, f64)> = [4.0, 2.0, 8.0 / 3.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &est)| (i as u64 + 1, error_percent(est)))
            .collect();
        assert_eq!(state.error_history(), expected.as_slice());
        assert!((state.max_error_percent() - error_percent(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_advance_never_overshoots() {
        let mut rng = SimRng::new(42);
        let mut state = RunState::new(120).unwrap();

        assert_eq!(state.advance(&mut rng, 50), 50);
        assert_eq!(state.advance(&mut rng, 50), 50);
        assert_eq!(state.advance(&mut rng, 50), 20);
        assert!(state.is_complete());
        assert_eq!(state.total_points_generated(), 120);
    }

    #[test]
    fn test_advance_when_complete_is_noop() {
        let mut rng = SimRng::new(42);
        let mut state = RunState::new(10).unwrap();
        state.advance(&mut rng, 10);
        let snapshot = state.clone();

        assert_eq!(state.advance(&mut rng, 50), 0);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_advance_zero_batch() {
        let mut source = ScriptedSource::new(&[0.0]);
        let mut state = RunState::new(10).unwrap();
        assert_eq!(state.advance(&mut source, 0), 0);
        assert_eq!(source.draws(), 0);
        assert_eq!(state.total_points_generated(), 0);
    }

    #[test]
    fn test_batch_size_does_not_change_result() {
        let run = |batch: u64| {
            let mut rng = SimRng::new(9);
            let mut state = RunState::new(1_000).unwrap();
            while !state.is_complete() {
                state.advance(&mut rng, batch);
            }
            state
        };

        let single = run(1);
        assert_eq!(single, run(50));
        assert_eq!(single, run(333));
        assert_eq!(single, run(5_000));
    }

    #[test]
    fn test_hundred_points_in_two_batches() {
        let mut rng = SimRng::new(42);
        let mut state = RunState::new(100).unwrap();
        state.advance(&mut rng, 50);
        state.advance(&mut rng, 50);

        assert_eq!(state.total_points_generated(), 100);
        assert!(state.is_complete());
        let ns: Vec<u64> = state.error_history().iter().map(|&(n, _)| n).collect();
        assert_eq!(ns, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_inside_count_matches_points() {
        let mut rng = SimRng::new(3);
        let mut state = RunState::new(5_000).unwrap();
        state.advance(&mut rng, 5_000);

        let counted = state.points().iter().filter(|p| p.inside_circle()).count() as u64;
        assert_eq!(counted, state.points_inside_circle());
    }

    #[test]
    fn test_standard_error_shrinks() {
        let mut rng = SimRng::new(42);
        let mut state = RunState::new(100_000).unwrap();
        state.advance(&mut rng, 1_000);
        let se_small = state.standard_error().unwrap();
        state.advance(&mut rng, 99_000);
        let se_large = state.standard_error().unwrap();
        assert!(se_large < se_small, "{se_large} !< {se_small}");
    }

    #[test]
    fn test_large_sample_convergence() {
        let mut rng = SimRng::new(42);
        let state = run_to_completion(1_000, 1_000_000, &mut rng).unwrap();

        assert_eq!(state.total_points_generated(), 1_000_000);
        let estimate = state.pi_estimate().unwrap();
        assert!(
            (estimate - PI).abs() / PI < 0.01,
            "estimate {estimate} not within 1% of π"
        );
    }

    #[test]
    fn test_run_to_completion_squares_interval() {
        let mut rng = SimRng::new(1);
        let state = run_to_completion(12, 1_000, &mut rng).unwrap();
        assert_eq!(state.total_points_requested(), 144);
        assert!(state.is_complete());
    }

    #[test]
    fn test_run_to_completion_rejects_zero() {
        let mut rng = SimRng::new(1);
        assert!(run_to_completion(0, 1_000, &mut rng).is_err());
    }

    #[test]
    fn test_run_to_completion_rejects_overflow() {
        let mut rng = SimRng::new(1);
        let err = run_to_completion(u64::MAX, u64::MAX, &mut rng).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_run_to_completion_respects_limit() {
        let mut rng = SimRng::new(1);
        let err = run_to_completion(101, 10_000, &mut rng).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("limit is 10000"));
    }

    #[test]
    fn test_error_percent_exact_pi() {
        assert!(error_percent(PI).abs() < f64::EPSILON);
        assert!((error_percent(0.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let mut source = ScriptedSource::new(&[0.0, 0.0]);
        let mut state = RunState::new(2).unwrap();
        state.advance(&mut source, 2);
        let json = serde_json::to_string(&state).expect("serialize");
        assert!(json.contains("points_inside_circle"));
        assert!(json.contains("error_history"));
    }
}
