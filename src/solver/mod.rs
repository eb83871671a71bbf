pub mod constants;
mod config;
mod core;
mod engine;
mod errors;
mod index;
mod round;

pub use config::SolverConfig;
pub use self::core::ExpressionSolver;
pub use engine::{AcceptOutcome, SearchEngine, SearchState};
pub use errors::SolverError;
pub use index::CandidateIndex;
pub use round::{GenerationTrace, RoundState};
