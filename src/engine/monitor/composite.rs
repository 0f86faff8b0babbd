//! Fan-out of search events to several monitors

use crate::engine::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;

/// Forwards every event to its children; the first stop request wins
#[derive(Debug, Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    /// Create an empty composite
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a monitor
    pub fn add_monitor<M: SearchMonitor + 'a>(&mut self, monitor: M) {
        self.monitors.push(Box::new(monitor));
    }

    /// Number of child monitors
    pub const fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Whether there are no child monitors
    pub const fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, root: &Space) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(root);
        }
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn on_node(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node(statistics);
        }
    }

    fn on_failure(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_failure(statistics);
        }
    }

    fn on_solution_found(&mut self, space: &Space, objective: i32, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(space, objective, statistics);
        }
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command(statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}
