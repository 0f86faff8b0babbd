//! Tests for the search progress display

#[cfg(test)]
mod tests {
    use nmbr9::engine::monitor::SearchMonitor;
    use nmbr9::engine::space::Space;
    use nmbr9::engine::stats::SearchStatistics;
    use nmbr9::io::progress::ProgressMonitor;

    // Verifies the best score follows reported solutions
    // Verified by never updating the best score
    #[test]
    fn test_tracks_best() {
        let mut monitor = ProgressMonitor::hidden();
        let statistics = SearchStatistics::default();
        assert_eq!(monitor.best(), None);
        assert_eq!(monitor.name(), "ProgressMonitor");
        monitor.on_solution_found(&Space::new(), 3, &statistics);
        monitor.on_solution_found(&Space::new(), 7, &statistics);
        assert_eq!(monitor.best(), Some(7));
    }

    // Tests a full search lifecycle with both display kinds
    // Verified by panicking on refresh past the bar length
    #[test]
    fn test_lifecycle() {
        for limit in [Some(4), None] {
            let mut monitor = ProgressMonitor::new(limit);
            let mut statistics = SearchStatistics::default();
            monitor.on_enter_search(&Space::new());
            for depth in 0..200 {
                statistics.on_node(depth);
                monitor.on_node(&statistics);
            }
            monitor.on_failure(&statistics);
            monitor.on_exit_search(&statistics);
            assert_eq!(monitor.best(), None);
        }
    }
}
