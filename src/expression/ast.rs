use std::sync::Arc;

use crate::utils::{repdigit, repdigit_text};
use crate::value::Value;

/// Binary operators available when crossing two generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Shape of an expression node
#[derive(Debug)]
pub enum NodeKind {
    Literal(String),
    Factorial(Node),
    SquareRoot(Node),
    Binary {
        op: BinaryOp,
        left: Node,
        right: Node,
    },
}

#[derive(Debug)]
struct NodeInner {
    kind: NodeKind,
    value: Value,
}

/// Immutable expression node with its value computed at construction
///
/// Cloning is cheap: children are shared, so accepted nodes form a DAG that
/// later expressions reuse without copying.
#[derive(Debug, Clone)]
pub struct Node(Arc<NodeInner>);

impl Node {
    fn new(kind: NodeKind, value: Value) -> Self {
        Self(Arc::new(NodeInner {
            kind,
            value: value.normalize(),
        }))
    }

    /// The seed digit repeated `repeats` times, read as a decimal integer
    pub fn literal(seed: u8, repeats: usize) -> Self {
        Self::new(
            NodeKind::Literal(repdigit_text(seed, repeats)),
            Value::Integer(repdigit(seed, repeats)),
        )
    }

    pub fn factorial(child: &Node) -> Self {
        Self::new(
            NodeKind::Factorial(child.clone()),
            child.value().factorial(),
        )
    }

    pub fn square_root(child: &Node) -> Self {
        Self::new(NodeKind::SquareRoot(child.clone()), child.value().sqrt())
    }

    pub fn binary(op: BinaryOp, left: &Node, right: &Node) -> Self {
        Self::new(
            NodeKind::Binary {
                op,
                left: left.clone(),
                right: right.clone(),
            },
            op.apply(left.value(), right.value()),
        )
    }

    pub fn value(&self) -> &Value {
        &self.0.value
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.kind(), NodeKind::Binary { .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind(), NodeKind::Literal(_))
    }

    /// Number of seed digits written out when the expression is rendered
    pub fn digit_occurrences(&self) -> usize {
        match self.kind() {
            NodeKind::Literal(text) => text.len(),
            NodeKind::Factorial(child) | NodeKind::SquareRoot(child) => child.digit_occurrences(),
            NodeKind::Binary { left, right, .. } => {
                left.digit_occurrences() + right.digit_occurrences()
            }
        }
    }

    /// True when both handles point at the same shared node
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
