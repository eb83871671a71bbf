//! Numeric values carried by expression nodes
//!
//! A value is either an exact arbitrary-precision integer or an approximate
//! real. Every value produced by arithmetic goes through [`Value::normalize`],
//! so a real that lands within [`NORMALIZATION_EPSILON`] of an integer is
//! always stored as that integer.

pub mod constants;
mod numeric;

pub use constants::NORMALIZATION_EPSILON;
pub use numeric::{Value, ValueKey};
