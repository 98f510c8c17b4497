//! Error types for mcpi.
//!
//! Every fallible operation returns `Result<T, SimError>`; nothing in the
//! library panics on bad input.

use thiserror::Error;

/// Result type alias for mcpi operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all mcpi operations.
///
/// Invalid input is rejected at the boundary, before any
/// [`RunState`](crate::engine::RunState) is built or mutated, so callers
/// can re-prompt without cleanup.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Input Errors =====
    /// Non-positive, non-numeric or otherwise unusable argument.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong with the argument.
        message: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Runtime Errors =====
    /// The random source could not be initialized.
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// Logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Create an invalid-argument error with a message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a random-source error.
    #[must_use]
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSource(message.into())
    }

    /// Create a logging setup error.
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    /// Whether the caller may recover by asking for new input.
    ///
    /// Only argument errors are retryable; everything else aborts the run.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
