//! Expression nodes, their renderings and evaluation

mod ast;
mod display;
mod errors;
mod eval;

pub use ast::{BinaryOp, Node, NodeKind};
pub use errors::ExpressionError;
pub use eval::evaluate_evaluable;
