//! Periodic search progress through `tracing`

use crate::engine::monitor::search_monitor::SearchMonitor;
use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;
use crate::io::configuration::{LOG_CLOCK_CHECK_MASK, LOG_INTERVAL_MS};
use std::time::{Duration, Instant};
use tracing::info;

/// Emits an `info` event at most once per interval, plus one per solution
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogMonitor {
    /// Log every `log_interval`, reading the clock when `nodes & clock_check_mask == 0`
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
        }
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_millis(LOG_INTERVAL_MS), LOG_CLOCK_CHECK_MASK)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, root: &Space) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        info!(
            variables = root.variable_count(),
            propagators = root.propagator_count(),
            "search started"
        );
    }

    fn on_node(&mut self, statistics: &SearchStatistics) {
        if statistics.nodes & self.clock_check_mask == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.last_log_time = Instant::now();
            info!(
                elapsed = ?self.start_time.elapsed(),
                nodes = statistics.nodes,
                failures = statistics.failures,
                depth = statistics.max_depth,
                best = ?statistics.best_objective,
                "searching"
            );
        }
    }

    fn on_solution_found(&mut self, _space: &Space, objective: i32, statistics: &SearchStatistics) {
        info!(
            objective,
            nodes = statistics.nodes,
            elapsed = ?self.start_time.elapsed(),
            "solution found"
        );
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        info!(
            nodes = statistics.nodes,
            failures = statistics.failures,
            solutions = statistics.solutions,
            elapsed = ?statistics.time_total,
            "search finished"
        );
    }
}
