use std::fmt;

use crate::expression::Node;

/// Nodes accepted during the round in progress
#[derive(Debug, Default)]
pub struct RoundState {
    accepted: Vec<Node>,
    min: Option<f64>,
    max: Option<f64>,
}

impl RoundState {
    pub fn push(&mut self, node: Node) {
        let value = node.value().as_f64();
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
        self.accepted.push(node);
    }

    /// Combine the partial states of two workers
    #[must_use]
    pub fn merge(mut self, other: RoundState) -> RoundState {
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.accepted.extend(other.accepted);
        self
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.accepted
    }
}

/// Summary of a frozen generation, handed to the trace callback
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTrace {
    pub seed: u8,
    pub generation: usize,
    pub size: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl fmt::Display for GenerationTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Seed: {}, G{} size: {}",
            self.seed, self.generation, self.size
        )?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            write!(f, ", min: {}, max: {}", min, max)?;
        }
        Ok(())
    }
}
