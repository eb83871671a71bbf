use log::info;

use crate::expression::Node;
use crate::solver::config::SolverConfig;
use crate::solver::engine::SearchEngine;
use crate::solver::errors::SolverError;
use crate::solver::round::GenerationTrace;
use crate::utils::{validate_depth, validate_seed, validate_target};

/// Entry point that validates inputs and runs one search session per call
#[derive(Debug, Clone, Default)]
pub struct ExpressionSolver {
    config: SolverConfig,
}

impl ExpressionSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Search for an expression over `seed` that evaluates to `target`
    ///
    /// Returns `Ok(None)` when nothing matches within `depth` generations.
    ///
    /// # Errors
    ///
    /// Returns an error before any search work if the seed is not in 1..=9,
    /// the target is zero, or the depth is zero.
    pub fn solve(
        &self,
        target: u64,
        seed: u8,
        depth: usize,
        trace: Option<&mut dyn FnMut(&GenerationTrace)>,
    ) -> Result<Option<Node>, SolverError> {
        validate_target(target)?;
        validate_seed(seed)?;
        validate_depth(depth)?;

        let mut engine = SearchEngine::new(target, seed, self.config.clone());
        let result = engine.run(depth, trace);

        match &result {
            Some(node) => info!(
                "{} = {} ({} digits)",
                engine.target(),
                node,
                node.digit_occurrences()
            ),
            None => info!(
                "{} not reachable with seed {}",
                engine.target(),
                engine.seed()
            ),
        }

        Ok(result)
    }
}
