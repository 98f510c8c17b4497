//! Configuration with YAML loading and validation.
//!
//! Every field has a default, so an absent config file and an empty one
//! behave the same. Values are checked in two passes:
//! - field ranges via `validator`
//! - cross-field semantic checks in [`PiConfig::validate_semantic`]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::engine::DEFAULT_BATCH_SIZE;
use crate::error::{SimError, SimResult};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PiConfig {
    /// Fixed seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Points generated per tick of the live view.
    #[validate(range(min = 1, max = 1_000_000))]
    pub batch_size: u64,

    /// Tick interval of the live view in milliseconds.
    #[validate(range(min = 1, max = 1000))]
    pub tick_ms: u64,

    /// Upper bound on points a single run may request.
    #[validate(range(min = 1))]
    pub max_points: u64,

    /// Static scatter plot dimensions.
    #[validate(nested)]
    pub plot: PlotConfig,

    /// Error chart axes of the live view.
    #[validate(nested)]
    pub chart: ChartConfig,

    /// Logging setup.
    #[validate(nested)]
    pub logging: LogConfig,
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            seed: None,
            batch_size: DEFAULT_BATCH_SIZE,
            tick_ms: 20,
            max_points: 10_000_000,
            plot: PlotConfig::default(),
            chart: ChartConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl PiConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> SimResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> PiConfigBuilder {
        PiConfigBuilder::default()
    }

    /// Validate constraints that span fields.
    fn validate_semantic(&self) -> SimResult<()> {
        if self.batch_size > self.max_points {
            return Err(SimError::config(format!(
                "batch_size {} exceeds max_points {}",
                self.batch_size, self.max_points
            )));
        }

        if !self.chart.error_ceiling_percent.is_finite() {
            return Err(SimError::config("chart.error_ceiling_percent must be finite"));
        }

        if !self.chart.x_headroom.is_finite() {
            return Err(SimError::config("chart.x_headroom must be finite"));
        }

        Ok(())
    }

    /// Tick interval as a `Duration`.
    #[must_use]
    pub const fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct PiConfigBuilder {
    seed: Option<u64>,
    batch_size: Option<u64>,
    tick_ms: Option<u64>,
    max_points: Option<u64>,
}

impl PiConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the points generated per tick.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Set the tick interval in milliseconds.
    #[must_use]
    pub const fn tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = Some(tick_ms);
        self
    }

    /// Set the per-run point limit.
    #[must_use]
    pub const fn max_points(mut self, max_points: u64) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> PiConfig {
        let mut config = PiConfig::default();

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }

        config
    }
}

/// Static scatter plot size in terminal cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Width in columns.
    #[validate(range(min = 8, max = 500))]
    pub width: u16,
    /// Height in rows.
    #[validate(range(min = 8, max = 500))]
    pub height: u16,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
        }
    }
}

/// Axes of the error-vs-points chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Initial upper bound of the error axis in percent.
    #[validate(range(min = 0.1, max = 400.0))]
    pub error_ceiling_percent: f64,
    /// The point axis spans `requested × x_headroom`.
    #[validate(range(min = 1.0, max = 10.0))]
    pub x_headroom: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            error_ceiling_percent: 15.0,
            x_headroom: 1.1,
        }
    }
}

/// Logging setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Level or `EnvFilter` directive (`RUST_LOG` takes precedence).
    #[validate(length(min = 1))]
    pub level: String,
    /// Directory for daily-rotated log files; `None` disables file logging.
    pub dir: Option<PathBuf>,
    /// File name prefix inside `dir`.
    #[validate(length(min = 1))]
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            dir: None,
            file_prefix: "mcpi".to_string(),
        }
    }
}
