// Tolerance for snapping a real onto the nearest integer
pub const NORMALIZATION_EPSILON: f64 = 1e-10;
