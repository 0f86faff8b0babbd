//! Time and node budgets

use crate::engine::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;
use std::time::{Duration, Instant};

/// Stops the search once a wall-clock budget is spent
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    steps_since_check: u64,
}

impl TimeLimitMonitor {
    /// Budget of `time_limit`, reading the clock every `check_interval` nodes
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            check_interval: check_interval.max(1),
            steps_since_check: 0,
        }
    }

    /// Budget of `time_limit` with the clock read at every node
    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, 1)
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _root: &Space) {
        self.start_time = Some(Instant::now());
        self.steps_since_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
        self.start_time = None;
    }

    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        self.steps_since_check = self.steps_since_check.saturating_add(1);
        if self.steps_since_check < self.check_interval {
            return SearchCommand::Continue;
        }
        self.steps_since_check = 0;
        if let Some(start) = self.start_time
            && start.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate(format!(
                "time limit of {:.2?} exceeded",
                self.time_limit
            ));
        }
        SearchCommand::Continue
    }
}

/// Stops the search after a fixed number of nodes
#[derive(Debug, Clone, Copy)]
pub struct NodeLimitMonitor {
    node_limit: u64,
}

impl NodeLimitMonitor {
    /// Allow at most `node_limit` nodes
    pub const fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }
}

impl SearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        if statistics.nodes >= self.node_limit {
            SearchCommand::Terminate(format!("node limit of {} reached", self.node_limit))
        } else {
            SearchCommand::Continue
        }
    }
}
