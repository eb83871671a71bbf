// Default search limits
pub const DEFAULT_VALUE_MIN: f64 = 1e-8;
pub const DEFAULT_VALUE_MAX: f64 = 1e8;
pub const DEFAULT_POWER_LIMIT: u64 = 30;
pub const DEFAULT_FACTORIAL_LIMIT: u64 = 15;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;
pub const DEFAULT_SEARCH_DEPTH: usize = 20;
