//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) seeded from a single
//! master seed, so every run can be replayed bit-for-bit with `--seed`.
//!
//! The estimator does not talk to `SimRng` directly; it draws through the
//! [`SampleSource`] trait so tests can inject scripted coordinates.

use rand::prelude::*;
use rand::rngs::OsRng;
use rand_pcg::Pcg64;

use crate::error::{SimError, SimResult};

/// Source of uniformly distributed coordinates.
pub trait SampleSource {
    /// Draw a value uniformly from `[min, max)`.
    fn sample_range(&mut self, min: f64, max: f64) -> f64;
}

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RandomSource`] if the OS entropy pool cannot be
    /// read. Callers must abort rather than fall back to a fixed seed.
    pub fn from_entropy() -> SimResult<Self> {
        let mut bytes = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SimError::random_source(e.to_string()))?;
        Ok(Self::new(u64::from_le_bytes(bytes)))
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }
}

impl SampleSource for SimRng {
    fn sample_range(&mut self, min: f64, max: f64) -> f64 {
        self.gen_range_f64(min, max)
    }
}
