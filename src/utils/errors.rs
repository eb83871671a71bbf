use thiserror::Error;

/// Errors raised while validating search inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Seed must be a digit between 1 and 9, got {0}")]
    InvalidSeed(u8),
    #[error("Target must be a positive integer")]
    NonPositiveTarget,
    #[error("Search depth must be at least 1")]
    ZeroDepth,
}
