//! Hooks through which the search reports progress and accepts stop requests

use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;
use std::fmt;

/// Instruction returned by a monitor before each node
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching
    #[default]
    Continue,
    /// Stop, giving the reason
    Terminate(String),
}

impl fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::Terminate(reason) => write!(f, "Terminate: {reason}"),
        }
    }
}

/// Observer of a branch-and-bound search
pub trait SearchMonitor {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called once with the root space before propagation
    fn on_enter_search(&mut self, _root: &Space) {}

    /// Called once after the search stopped
    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    /// Called for every node taken from the stack
    fn on_node(&mut self, _statistics: &SearchStatistics) {}

    /// Called when a node fails
    fn on_failure(&mut self, _statistics: &SearchStatistics) {}

    /// Called with every improving solution
    fn on_solution_found(&mut self, _space: &Space, _objective: i32, _statistics: &SearchStatistics) {
    }

    /// Asked before each node whether to go on
    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<M: SearchMonitor + ?Sized> SearchMonitor for &mut M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, root: &Space) {
        (**self).on_enter_search(root);
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        (**self).on_exit_search(statistics);
    }

    fn on_node(&mut self, statistics: &SearchStatistics) {
        (**self).on_node(statistics);
    }

    fn on_failure(&mut self, statistics: &SearchStatistics) {
        (**self).on_failure(statistics);
    }

    fn on_solution_found(&mut self, space: &Space, objective: i32, statistics: &SearchStatistics) {
        (**self).on_solution_found(space, objective, statistics);
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }
}

impl fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// Monitor that observes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    /// Create the monitor
    pub const fn new() -> Self {
        Self
    }
}

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}
