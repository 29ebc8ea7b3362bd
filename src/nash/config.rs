//! Configuration options for the equilibrium solver.
//!
//! The original engine hard-coded its tolerance, iteration cap, and trial
//! count; here they are configuration with those values as defaults.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::nash::NashSolver`].
///
/// # Example
/// ```
/// use count_game_nash::nash::SolverConfig;
///
/// let config = SolverConfig::default().with_seed(42);
/// assert_eq!(config.max_iterations, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Absolute tolerance used everywhere: Newton residual acceptance,
    /// feasibility range checks, solution deduplication, and best-response
    /// validity slack.
    pub tolerance: f64,

    /// Newton-Raphson iteration cap per solve attempt.
    pub max_iterations: usize,

    /// Number of randomized starting points per multi-start search.
    pub num_trials: usize,

    /// Random seed for reproducibility.
    ///
    /// If set, starting probabilities are drawn from a seeded generator,
    /// making searches reproducible. If `None`, entropy-seeded.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            num_trials: 100,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the absolute tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set the Newton iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set the multi-start trial count.
    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidCap("max_iterations"));
        }
        if self.num_trials == 0 {
            return Err(ConfigError::InvalidCap("num_trials"));
        }
        Ok(())
    }
}

/// Errors that can occur when validating solver configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Tolerance is not a finite positive number.
    InvalidTolerance(f64),
    /// An iteration or trial cap is zero.
    InvalidCap(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTolerance(val) => {
                write!(f, "Tolerance {} must be finite and positive", val)
            }
            ConfigError::InvalidCap(name) => {
                write!(f, "{} must be at least 1", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
