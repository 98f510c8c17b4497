//! # mcpi
//!
//! Monte Carlo estimation of π.
//!
//! Points are drawn uniformly from the square `[-1, 1)²`; the share that
//! lands inside the unit circle approaches `π / 4`. Two front ends share
//! one engine:
//! - `mcpi estimate N` samples `N²` points at once and prints the result
//!   with a scatter plot
//! - `mcpi animate N` grows a run batch by batch in a live terminal view
//!   with pause, resume and reset
//!
//! ## Example
//!
//! ```rust
//! use mcpi::prelude::*;
//!
//! let mut rng = SimRng::new(42);
//! let mut state = RunState::new(10_000).unwrap();
//! while !state.is_complete() {
//!     state.advance(&mut rng, 500);
//! }
//! let estimate = state.pi_estimate().unwrap();
//! assert!((estimate - std::f64::consts::PI).abs() < 0.1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{PiConfig, PiConfigBuilder};
    pub use crate::engine::{
        generate_point, run_to_completion, Phase, Point, RunState, SampleSource, Session, SimRng,
    };
    pub use crate::error::{SimError, SimResult};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
