//! Depth-first branch-and-bound over a trailed space

use crate::engine::monitor::{SearchCommand, SearchMonitor};
use crate::engine::result::SearchOutcome;
use crate::engine::space::{Space, Var};
use crate::engine::stats::SearchStatistics;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// A branching choice on one variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Try `var = value`, then `var ≠ value`
    Binary {
        /// Variable to branch on
        var: Var,
        /// Value tried first
        value: i32,
    },
    /// Set `var = value` without an alternative
    Commit {
        /// Variable to fix
        var: Var,
        /// Value to fix it to
        value: i32,
    },
}

impl Decision {
    /// Variable the decision is about
    pub const fn var(&self) -> Var {
        match *self {
            Self::Binary { var, .. } | Self::Commit { var, .. } => var,
        }
    }

    /// Value tried first
    pub const fn value(&self) -> i32 {
        match *self {
            Self::Binary { value, .. } | Self::Commit { value, .. } => value,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { var, value } => write!(f, "{var} = {value} | {var} != {value}"),
            Self::Commit { var, value } => write!(f, "{var} := {value}"),
        }
    }
}

/// Chooses the next decision at a propagated, non-failed node
///
/// Returning `None` declares the node a solution, so a brancher must only do
/// that once every variable relevant to the caller is assigned.
pub trait Brancher {
    /// Next decision, or `None` at a leaf
    fn choose(&self, space: &Space) -> Option<Decision>;
}

/// Maximizing branch-and-bound driver
///
/// The tree is explored depth first on one space. Each binary decision opens
/// a frame on the space's trail, and backtracking pops it before the
/// refutation `var ≠ value` is tried, so memory grows with the changes along
/// the current path rather than with a copy of the model per open branch.
///
/// Every node explored after an improving solution of value `S` is first
/// restricted to `objective ≥ S + 1`, so each accepted solution is strictly
/// better than the previous one and the last one is optimal once the tree is
/// exhausted.
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBound {
    objective: Var,
}

/// A binary decision whose refutation is still to be explored
#[derive(Debug, Clone, Copy)]
struct OpenChoice {
    var: Var,
    value: i32,
    depth: u64,
}

impl BranchAndBound {
    /// Driver maximizing `objective`
    pub const fn new(objective: Var) -> Self {
        Self { objective }
    }

    /// Explore the tree below `root` and return the best space found
    pub fn maximize<B, M>(&self, root: Space, brancher: &B, monitor: &mut M) -> SearchOutcome<Space>
    where
        B: Brancher + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let start = Instant::now();
        let mut statistics = SearchStatistics::default();
        let mut best: Option<(Space, i32)> = None;
        let mut abort_reason: Option<String> = None;

        monitor.on_enter_search(&root);
        info!(
            variables = root.variable_count(),
            propagators = root.propagator_count(),
            "branch and bound started"
        );

        let mut space = root;
        let mut open: Vec<OpenChoice> = Vec::new();
        let mut depth = 0u64;

        loop {
            if let SearchCommand::Terminate(reason) = monitor.search_command(&statistics) {
                abort_reason = Some(reason);
                break;
            }
            statistics.on_node(depth);
            monitor.on_node(&statistics);

            let incumbent = best.as_ref().map(|(_, score)| *score);
            if self.explore(&mut space, incumbent, &mut statistics, monitor) {
                match brancher.choose(&space) {
                    None => {
                        let objective = space.min(self.objective);
                        statistics.on_solution(objective);
                        debug!(objective, depth, "improving solution");
                        monitor.on_solution_found(&space, objective, &statistics);
                        best = Some((space.snapshot(), objective));
                    }
                    Some(Decision::Binary { var, value }) => {
                        statistics.on_decision();
                        open.push(OpenChoice { var, value, depth });
                        space.push_frame();
                        if space.assign(var, value).is_ok() {
                            depth += 1;
                            continue;
                        }
                    }
                    Some(Decision::Commit { var, value }) => {
                        statistics.on_decision();
                        if space.assign(var, value).is_ok() {
                            depth += 1;
                            continue;
                        }
                    }
                }
            }

            let Some(resumed) = backtrack(&mut space, &mut open) else {
                break;
            };
            depth = resumed;
        }

        statistics.time_total = start.elapsed();
        monitor.on_exit_search(&statistics);

        let outcome = match (abort_reason, best) {
            (Some(reason), best) => {
                SearchOutcome::aborted(best.map(|(space, _)| space), reason, statistics)
            }
            (None, Some((space, _))) => SearchOutcome::optimal(space, statistics),
            (None, None) => SearchOutcome::infeasible(statistics),
        };
        info!(
            result = %outcome.result,
            reason = %outcome.termination_reason,
            nodes = outcome.statistics.nodes,
            "branch and bound finished"
        );
        outcome
    }

    // Apply the incumbent bound and propagate; false if the node fails
    fn explore<M>(
        &self,
        space: &mut Space,
        incumbent: Option<i32>,
        statistics: &mut SearchStatistics,
        monitor: &mut M,
    ) -> bool
    where
        M: SearchMonitor + ?Sized,
    {
        let bounded = incumbent.is_none_or(|score| space.set_min(self.objective, score + 1).is_ok());
        if !bounded {
            statistics.on_pruning_bound();
            monitor.on_failure(statistics);
            return false;
        }
        let outcome = space.propagate();
        statistics.add_propagations(space.take_propagations());
        if outcome.is_err() {
            statistics.on_failure();
            monitor.on_failure(statistics);
            return false;
        }
        true
    }
}

// Undo to the deepest open choice whose refutation is consistent and return
// the depth to resume at, or `None` once the tree is exhausted
fn backtrack(space: &mut Space, open: &mut Vec<OpenChoice>) -> Option<u64> {
    while let Some(choice) = open.pop() {
        space.pop_frame();
        if space.remove(choice.var, choice.value).is_ok() {
            return Some(choice.depth + 1);
        }
    }
    None
}
