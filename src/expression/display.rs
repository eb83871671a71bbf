use std::fmt;

use crate::expression::ast::{BinaryOp, Node, NodeKind};

impl BinaryOp {
    /// Operator token in the human-readable rendering
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// Operator token in the evaluable rendering
    pub fn evaluable_symbol(&self) -> &'static str {
        match self {
            BinaryOp::Pow => "**",
            other => other.symbol(),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// Binary children are always parenthesized, whatever their operator.
fn write_operand(f: &mut fmt::Formatter, node: &Node) -> fmt::Result {
    if node.is_binary() {
        write!(f, "({})", node)
    } else {
        write!(f, "{}", node)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            NodeKind::Literal(text) => f.write_str(text),
            NodeKind::Factorial(child) => {
                if child.is_binary() {
                    write!(f, "({})!", child)
                } else {
                    write!(f, "{}!", child)
                }
            }
            NodeKind::SquareRoot(child) => {
                if child.is_literal() {
                    write!(f, "√{}", child)
                } else {
                    write!(f, "√({})", child)
                }
            }
            NodeKind::Binary { op, left, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op)?;
                write_operand(f, right)
            }
        }
    }
}

impl Node {
    /// Human-readable rendering, e.g. `(3 + 3)! / √3`
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Canonical rendering for mechanical re-evaluation
    ///
    /// Factorial becomes `factorial(round(..))`, square root becomes
    /// `(round(..) ** 0.5)` and power uses `**`.
    pub fn evaluable(&self) -> String {
        let mut out = String::new();
        write_evaluable(&mut out, self);
        out
    }
}

fn write_evaluable(out: &mut String, node: &Node) {
    match node.kind() {
        NodeKind::Literal(text) => out.push_str(text),
        NodeKind::Factorial(child) => {
            out.push_str("factorial(round(");
            write_evaluable(out, child);
            out.push_str("))");
        }
        NodeKind::SquareRoot(child) => {
            out.push_str("(round(");
            write_evaluable(out, child);
            out.push_str(") ** 0.5)");
        }
        NodeKind::Binary { op, left, right } => {
            write_evaluable_operand(out, left);
            out.push(' ');
            out.push_str(op.evaluable_symbol());
            out.push(' ');
            write_evaluable_operand(out, right);
        }
    }
}

fn write_evaluable_operand(out: &mut String, node: &Node) {
    if node.is_binary() {
        out.push('(');
        write_evaluable(out, node);
        out.push(')');
    } else {
        write_evaluable(out, node);
    }
}
