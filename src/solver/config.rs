use crate::solver::constants::{
    DEFAULT_FACTORIAL_LIMIT, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_POWER_LIMIT, DEFAULT_VALUE_MAX,
    DEFAULT_VALUE_MIN,
};

/// Limits applied while growing generations
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Smallest value kept as a candidate
    pub value_min: f64,
    /// Largest value kept as a candidate
    pub value_max: f64,
    /// Largest integer exponent tried in a power
    pub power_limit: u64,
    /// Largest integer whose factorial is tried
    pub factorial_limit: u64,
    /// Cross on the rayon pool once the latest generation is larger than this
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            value_min: DEFAULT_VALUE_MIN,
            value_max: DEFAULT_VALUE_MAX,
            power_limit: DEFAULT_POWER_LIMIT,
            factorial_limit: DEFAULT_FACTORIAL_LIMIT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
