//! Tests for the tracing progress monitor

#[cfg(test)]
mod tests {
    use nmbr9::engine::monitor::{LogMonitor, SearchCommand, SearchMonitor};
    use nmbr9::engine::space::Space;
    use nmbr9::engine::stats::SearchStatistics;
    use std::time::Duration;

    // Verifies the log monitor observes a whole search without stopping it
    // Verified by returning Terminate from the log monitor
    #[test]
    fn test_observes_without_stopping() {
        let mut monitor = LogMonitor::new(Duration::ZERO, 0);
        let mut stats = SearchStatistics::default();
        monitor.on_enter_search(&Space::new());
        for depth in 0..5 {
            stats.on_node(depth);
            monitor.on_node(&stats);
        }
        monitor.on_solution_found(&Space::new(), 4, &stats);
        monitor.on_exit_search(&stats);
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        assert_eq!(monitor.name(), "LogMonitor");
    }

    // Tests the default monitor can be built and named
    // Verified by changing the monitor name
    #[test]
    fn test_default() {
        let monitor = LogMonitor::default();
        assert_eq!(monitor.name(), "LogMonitor");
    }
}
