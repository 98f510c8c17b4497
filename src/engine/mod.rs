//! Core estimation engine.
//!
//! - Deterministic RNG (PCG seeded from a master seed)
//! - Monte Carlo π estimator over an explicit [`RunState`]
//! - Running/Paused/Finished session state machine for the live view

pub mod estimator;
pub mod rng;
pub mod session;

pub use estimator::{
    error_percent, generate_point, run_to_completion, Point, RunState, DEFAULT_BATCH_SIZE,
};
pub use rng::{SampleSource, SimRng};
pub use session::{Phase, Session};
