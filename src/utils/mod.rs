//! Repeated-digit literals and input validation

mod digits;
mod errors;
mod validation;

pub use digits::{repdigit, repdigit_text};
pub use errors::UtilsError;
pub use validation::{validate_depth, validate_seed, validate_target};
