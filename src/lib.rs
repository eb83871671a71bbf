//! Seed Digits - A library for building a target integer out of one repeated digit
//!
//! Expressions may only use blocks of a single seed digit (`7`, `77`, `777`, ...)
//! combined with `+ - * / ^`, factorial and square root. The search grows one
//! generation per digit used, so the first match it reports uses as few digits
//! as the search depth allows.

pub mod expression;
pub mod solver;
pub mod utils;
pub mod value;

// Re-export the main public API
pub use expression::{BinaryOp, ExpressionError, Node, NodeKind, evaluate_evaluable};
pub use solver::{
    ExpressionSolver, GenerationTrace, SearchEngine, SearchState, SolverConfig, SolverError,
};
pub use utils::UtilsError;
pub use value::Value;

/// Find an expression over `seed` that evaluates to `target`
///
/// This is a convenience function that runs a default-configured solver.
///
/// # Arguments
///
/// * `target` - The positive integer to reach
/// * `seed` - The digit every literal is made of, 1 through 9
/// * `depth` - The most seed digits a solution may use
/// * `trace` - Called once per completed generation
///
/// # Returns
///
/// * `Ok(Some(Node))` - If a matching expression is found
/// * `Ok(None)` - If nothing matches within `depth` digits
/// * `Err(SolverError)` - If the inputs are invalid
///
/// # Errors
///
/// This function will return an error if:
/// * The seed is outside 1..=9
/// * The target is zero
/// * The depth is zero
///
/// # Examples
///
/// ```
/// use seed_digits::solve;
///
/// match solve(9, 3, 5, None) {
///     Ok(Some(expr)) => println!("Found: {}", expr),
///     Ok(None) => println!("No solution found"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn solve(
    target: u64,
    seed: u8,
    depth: usize,
    trace: Option<&mut dyn FnMut(&GenerationTrace)>,
) -> Result<Option<Node>, SolverError> {
    ExpressionSolver::default().solve(target, seed, depth, trace)
}
