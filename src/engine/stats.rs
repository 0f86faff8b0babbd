//! Counters collected while the search runs

use std::fmt;
use std::time::Duration;

/// Search effort and outcome counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes popped from the search stack
    pub nodes: u64,
    /// Nodes whose propagation failed, including bound prunings
    pub failures: u64,
    /// Nodes cut by the incumbent bound before propagation
    pub prunings_bound: u64,
    /// Branching decisions taken
    pub decisions: u64,
    /// Improving solutions accepted
    pub solutions: u64,
    /// Deepest node reached
    pub max_depth: u64,
    /// Propagator executions
    pub propagations: u64,
    /// Objective of the best solution, if any
    pub best_objective: Option<i32>,
    /// Wall-clock time spent in the search
    pub time_total: Duration,
}

impl SearchStatistics {
    /// Count a visited node at `depth`
    #[inline]
    pub fn on_node(&mut self, depth: u64) {
        self.nodes = self.nodes.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    /// Count a failed node
    #[inline]
    pub const fn on_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    /// Count a node cut by the incumbent bound
    #[inline]
    pub const fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
        self.on_failure();
    }

    /// Count a branching decision
    #[inline]
    pub const fn on_decision(&mut self) {
        self.decisions = self.decisions.saturating_add(1);
    }

    /// Record an improving solution
    #[inline]
    pub const fn on_solution(&mut self, objective: i32) {
        self.solutions = self.solutions.saturating_add(1);
        self.best_objective = Some(objective);
    }

    /// Add propagator executions
    #[inline]
    pub const fn add_propagations(&mut self, count: u64) {
        self.propagations = self.propagations.saturating_add(count);
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Nodes:            {}", self.nodes)?;
        writeln!(f, "  Failures:         {}", self.failures)?;
        writeln!(f, "  Bound prunings:   {}", self.prunings_bound)?;
        writeln!(f, "  Decisions:        {}", self.decisions)?;
        writeln!(f, "  Max depth:        {}", self.max_depth)?;
        writeln!(f, "  Propagations:     {}", self.propagations)?;
        writeln!(f, "  Solutions:        {}", self.solutions)?;
        match self.best_objective {
            Some(objective) => writeln!(f, "  Best objective:   {objective}")?,
            None => writeln!(f, "  Best objective:   none")?,
        }
        write!(f, "  Total time:       {:.2?}", self.time_total)
    }
}
