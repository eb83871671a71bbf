use log::{debug, info};
use num_bigint::BigInt;
use rayon::prelude::*;
use std::ops::ControlFlow;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::expression::{BinaryOp, Node};
use crate::solver::config::SolverConfig;
use crate::solver::index::CandidateIndex;
use crate::solver::round::{GenerationTrace, RoundState};

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching { round: usize },
    Found,
    Exhausted,
}

/// Result of offering one node to the candidate index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The node equals the target; the session is over
    Matched,
    /// Stored as the sole representative of its value
    Accepted,
    /// Out of range or a duplicate value
    Rejected,
}

/// Generational search for one (target, seed) pair
///
/// Round `r` crosses frozen generations `i` and `j` with `i + j + 2 == r`,
/// then adds the literal made of `r` seed digits. Every accepted node is
/// immediately expanded under factorial and square root.
pub struct SearchEngine {
    target: BigInt,
    seed: u8,
    config: SolverConfig,
    index: CandidateIndex,
    generations: Vec<Vec<Node>>,
    state: SearchState,
    found: AtomicBool,
    result: OnceLock<Node>,
}

impl SearchEngine {
    pub fn new(target: u64, seed: u8, config: SolverConfig) -> Self {
        Self {
            target: BigInt::from(target),
            seed,
            config,
            index: CandidateIndex::new(),
            generations: Vec::new(),
            state: SearchState::Idle,
            found: AtomicBool::new(false),
            result: OnceLock::new(),
        }
    }

    pub fn target(&self) -> &BigInt {
        &self.target
    }

    pub fn seed(&self) -> u8 {
        self.seed
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Frozen generations; index `k` holds nodes using `k + 1` seed digits
    pub fn generations(&self) -> &[Vec<Node>] {
        &self.generations
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    pub fn result(&self) -> Option<&Node> {
        self.result.get()
    }

    fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Run rounds until the target is matched or `depth` generations exist
    ///
    /// Calling `run` again with a larger depth resumes where the previous
    /// call stopped.
    pub fn run(
        &mut self,
        depth: usize,
        mut trace: Option<&mut dyn FnMut(&GenerationTrace)>,
    ) -> Option<Node> {
        info!(
            "Searching for {} with seed {} up to depth {}",
            self.target, self.seed, depth
        );

        while !self.is_found() && self.generations.len() < depth {
            let round = self.generations.len() + 1;
            self.state = SearchState::Searching { round };

            match self.run_round(round) {
                ControlFlow::Break(()) => break,
                ControlFlow::Continue(round_state) => {
                    let record = self.freeze(round, round_state);
                    if let Some(trace) = trace.as_deref_mut() {
                        trace(&record);
                    }
                }
            }
        }

        if self.is_found() {
            self.state = SearchState::Found;
            if let Some(node) = self.result() {
                info!("Found {} = {}", self.target, node);
            }
        } else {
            self.state = SearchState::Exhausted;
            info!(
                "No expression for {} within {} generations ({} values reached)",
                self.target,
                self.generations.len(),
                self.index.len()
            );
        }

        self.result().cloned()
    }

    fn run_round(&self, round: usize) -> ControlFlow<(), RoundState> {
        let mut round_state = match self.cross_generations(RoundState::default()) {
            ControlFlow::Break(()) => return ControlFlow::Break(()),
            ControlFlow::Continue(round_state) => round_state,
        };

        if self
            .admit(Node::literal(self.seed, round), &mut round_state)
            .is_break()
        {
            return ControlFlow::Break(());
        }

        ControlFlow::Continue(round_state)
    }

    fn freeze(&mut self, round: usize, round_state: RoundState) -> GenerationTrace {
        let record = GenerationTrace {
            seed: self.seed,
            generation: round,
            size: round_state.len(),
            min: round_state.min(),
            max: round_state.max(),
        };
        info!("{}", record);
        self.generations.push(round_state.into_nodes());
        record
    }

    /// Cross generation `i` with generation `last - i` for every `i <= last - i`
    fn cross_generations(&self, mut round_state: RoundState) -> ControlFlow<(), RoundState> {
        let Some(last) = self.generations.len().checked_sub(1) else {
            return ControlFlow::Continue(round_state);
        };

        let parallel = self
            .generations
            .last()
            .is_some_and(|latest| latest.len() > self.config.parallel_threshold);

        for i in 0..=last / 2 {
            let (Some(first), Some(second)) =
                (self.generations.get(i), self.generations.get(last - i))
            else {
                continue;
            };

            let step = if parallel {
                self.cross_pair_parallel(first, second, round_state)
            } else {
                self.cross_pair(first, second, round_state)
            };

            round_state = match step {
                ControlFlow::Break(()) => return ControlFlow::Break(()),
                ControlFlow::Continue(round_state) => round_state,
            };
        }

        ControlFlow::Continue(round_state)
    }

    fn cross_pair(
        &self,
        first: &[Node],
        second: &[Node],
        mut round_state: RoundState,
    ) -> ControlFlow<(), RoundState> {
        for a in first {
            for b in second {
                if self.cross_nodes(a, b, &mut round_state).is_break() {
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(round_state)
    }

    fn cross_pair_parallel(
        &self,
        first: &[Node],
        second: &[Node],
        round_state: RoundState,
    ) -> ControlFlow<(), RoundState> {
        debug!(
            "Crossing {} x {} nodes on the rayon pool",
            first.len(),
            second.len()
        );

        let crossed = first
            .par_iter()
            .fold(RoundState::default, |mut local, a| {
                for b in second {
                    if self.cross_nodes(a, b, &mut local).is_break() {
                        break;
                    }
                }
                local
            })
            .reduce(RoundState::default, RoundState::merge);

        if self.is_found() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(round_state.merge(crossed))
        }
    }

    fn cross_nodes(&self, a: &Node, b: &Node, round_state: &mut RoundState) -> ControlFlow<()> {
        if self.is_found() {
            return ControlFlow::Break(());
        }
        for node in self.crossings(a, b) {
            if self.admit(node, round_state).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Binary candidates for one ordered pair, in the order they are tried
    fn crossings(&self, a: &Node, b: &Node) -> Vec<Node> {
        let (x, y) = (a.value(), b.value());
        let mut nodes = Vec::with_capacity(7);

        nodes.push(Node::binary(BinaryOp::Add, a, b));

        // Larger operand first so differences stay non-negative
        if x > y {
            nodes.push(Node::binary(BinaryOp::Sub, a, b));
        } else {
            nodes.push(Node::binary(BinaryOp::Sub, b, a));
        }

        nodes.push(Node::binary(BinaryOp::Mul, a, b));

        if !x.is_zero() && !y.is_zero() {
            nodes.push(Node::binary(BinaryOp::Div, a, b));
            nodes.push(Node::binary(BinaryOp::Div, b, a));
        }

        if y.is_integer_at_most(self.config.power_limit) {
            nodes.push(Node::binary(BinaryOp::Pow, a, b));
        }
        if x.is_integer_at_most(self.config.power_limit) {
            nodes.push(Node::binary(BinaryOp::Pow, b, a));
        }

        nodes
    }

    /// Offer `node` to the index and expand everything it lets in
    ///
    /// Unary expansions run off an explicit work stack in depth-first order:
    /// a node's factorial chain is exhausted before its square root.
    pub(crate) fn admit(&self, node: Node, round_state: &mut RoundState) -> ControlFlow<()> {
        let mut pending = vec![node];

        while let Some(node) = pending.pop() {
            if self.is_found() {
                return ControlFlow::Break(());
            }

            match self.accept(&node, round_state) {
                AcceptOutcome::Matched => return ControlFlow::Break(()),
                AcceptOutcome::Rejected => {}
                AcceptOutcome::Accepted => {
                    let value = node.value();
                    if value.is_positive_integer() {
                        pending.push(Node::square_root(&node));
                    }
                    if value.is_integer_at_most(self.config.factorial_limit) {
                        pending.push(Node::factorial(&node));
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Match check, then range gate, then deduplication
    pub(crate) fn accept(&self, node: &Node, round_state: &mut RoundState) -> AcceptOutcome {
        let value = node.value();

        if value.equals_target(&self.target) {
            debug!("Matched target with {}", node);
            // Under parallel crossing the first worker to match wins
            let _ = self.result.set(node.clone());
            self.found.store(true, Ordering::Release);
            return AcceptOutcome::Matched;
        }

        if !value.in_range(self.config.value_min, self.config.value_max) {
            debug!("Rejected {} = {}: out of range", node, value);
            return AcceptOutcome::Rejected;
        }

        if !self.index.insert(value) {
            debug!("Rejected {} = {}: value already reached", node, value);
            return AcceptOutcome::Rejected;
        }

        debug!("Accepted {} = {}", node, value);
        round_state.push(node.clone());
        AcceptOutcome::Accepted
    }
}
