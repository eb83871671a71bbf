use log::{debug, warn};

use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if the seed is not a single non-zero digit.
pub fn validate_seed(seed: u8) -> Result<(), UtilsError> {
    if !(1..=9).contains(&seed) {
        warn!("Seed out of range: {}", seed);
        return Err(UtilsError::InvalidSeed(seed));
    }
    debug!("Seed validation successful");
    Ok(())
}

/// # Errors
///
/// Returns an error if the target is zero.
pub fn validate_target(target: u64) -> Result<(), UtilsError> {
    if target == 0 {
        warn!("Target is not positive");
        return Err(UtilsError::NonPositiveTarget);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the search depth is zero.
pub fn validate_depth(depth: usize) -> Result<(), UtilsError> {
    if depth == 0 {
        warn!("Search depth is zero");
        return Err(UtilsError::ZeroDepth);
    }
    Ok(())
}
