//! Tests for search counters and their report

#[cfg(test)]
mod tests {
    use nmbr9::engine::stats::SearchStatistics;

    // Verifies depth tracking keeps the maximum seen
    // Verified by assigning the latest depth instead of the maximum
    #[test]
    fn test_on_node_tracks_max_depth() {
        let mut stats = SearchStatistics::default();
        stats.on_node(3);
        stats.on_node(7);
        stats.on_node(2);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.max_depth, 7);
    }

    // Tests bound prunings also count as failures
    // Verified by not counting a failure in on_pruning_bound
    #[test]
    fn test_pruning_counts_failure() {
        let mut stats = SearchStatistics::default();
        stats.on_pruning_bound();
        stats.on_failure();
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.failures, 2);
    }

    // Tests solutions record the latest objective
    // Verified by keeping the first objective
    #[test]
    fn test_on_solution_records_objective() {
        let mut stats = SearchStatistics::default();
        stats.on_solution(4);
        stats.on_solution(9);
        stats.add_propagations(10);
        stats.add_propagations(5);
        stats.on_decision();
        assert_eq!(stats.solutions, 2);
        assert_eq!(stats.best_objective, Some(9));
        assert_eq!(stats.propagations, 15);
        assert_eq!(stats.decisions, 1);
    }

    // Tests the report lists counters and the best objective
    // Verified by omitting the objective line
    #[test]
    fn test_display() {
        let mut stats = SearchStatistics::default();
        let empty = stats.to_string();
        assert!(empty.contains("Best objective:   none"));
        stats.on_node(0);
        stats.on_solution(12);
        let report = stats.to_string();
        assert!(report.contains("Nodes:            1"));
        assert!(report.contains("Best objective:   12"));
    }
}
