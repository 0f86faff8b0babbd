//! Tests for cooperative cancellation

#[cfg(test)]
mod tests {
    use nmbr9::engine::monitor::{InterruptMonitor, SearchCommand, SearchMonitor};
    use nmbr9::engine::stats::SearchStatistics;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    // Verifies raising the shared flag stops the search
    // Verified by reading a private copy of the flag
    #[test]
    fn test_flag_stops_search() {
        let mut monitor = InterruptMonitor::new(Arc::new(AtomicBool::new(false)));
        let stats = SearchStatistics::default();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        monitor.handle().store(true, Ordering::Relaxed);
        assert_eq!(
            monitor.search_command(&stats),
            SearchCommand::Terminate("interrupted".into())
        );
    }
}
