//! Live run state machine.
//!
//! A [`Session`] owns the single [`RunState`] of the animated view together
//! with its random source, and turns ticks and user events into transitions:
//!
//! ```text
//!            pause            complete
//!  Running ─────────► Paused   Running ─────────► Finished
//!     ▲      resume     │
//!     └─────────────────┘
//!  reset(n) from any phase ──► Running (fresh state)
//! ```
//!
//! Ticks outside `Running` leave the state untouched.

use serde::Serialize;
use tracing::{debug, info};

use super::estimator::RunState;
use super::rng::{SampleSource, SimRng};
use crate::error::{SimError, SimResult};

/// Phase of a live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Points are added on every tick.
    Running,
    /// Ticks are ignored until resumed.
    Paused,
    /// Every requested point has been generated.
    Finished,
}

impl Phase {
    /// Short upper-case label for status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Finished => "FINISHED",
        }
    }
}

/// Single-owner driver for one live estimation run.
#[derive(Debug, Clone)]
pub struct Session<S: SampleSource = SimRng> {
    state: RunState,
    phase: Phase,
    source: S,
    batch_size: u64,
}

impl<S: SampleSource> Session<S> {
    /// Start a running session targeting `total_points`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `total_points` or
    /// `batch_size` is zero.
    pub fn new(total_points: u64, source: S, batch_size: u64) -> SimResult<Self> {
        if batch_size == 0 {
            return Err(SimError::invalid_argument("batch size must be positive"));
        }
        let state = RunState::new(total_points)?;
        info!(total_points, batch_size, "run started");
        Ok(Self {
            state,
            phase: Phase::Running,
            source,
            batch_size,
        })
    }

    /// Advance one batch if running. Returns the number of points added.
    pub fn tick(&mut self) -> u64 {
        if self.phase != Phase::Running {
            return 0;
        }

        let added = self.state.advance(&mut self.source, self.batch_size);
        if self.state.is_complete() {
            self.phase = Phase::Finished;
            info!(
                points = self.state.total_points_generated(),
                inside = self.state.points_inside_circle(),
                estimate = self.state.pi_estimate().unwrap_or_default(),
                "run finished"
            );
        }
        added
    }

    /// Flip between `Running` and `Paused`. `Finished` stays finished.
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Finished => Phase::Finished,
        };
        debug!(phase = self.phase.label(), "pause toggled");
        self.phase
    }

    /// Discard the current run and start a new one with `total_points`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `total_points` is zero; the
    /// current run is kept in that case.
    pub fn reset(&mut self, total_points: u64) -> SimResult<()> {
        let state = RunState::new(total_points)?;
        debug!(
            discarded = self.state.total_points_generated(),
            total_points, "run reset"
        );
        self.state = state;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the run.
    #[must_use]
    pub const fn state(&self) -> &RunState {
        &self.state
    }

    /// Points added per tick.
    #[must_use]
    pub const fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Consume the session, keeping the run.
    #[must_use]
    pub fn into_state(self) -> RunState {
        self.state
    }
}
