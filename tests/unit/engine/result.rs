//! Tests for search results, termination reasons, and outcomes

#[cfg(test)]
mod tests {
    use nmbr9::engine::result::{SearchOutcome, SearchResult, TerminationReason};
    use nmbr9::engine::stats::SearchStatistics;

    // Verifies an aborted search with an incumbent is feasible, never optimal
    // Verified by mapping an aborted incumbent to Optimal
    #[test]
    fn test_aborted_with_incumbent_is_feasible() {
        let outcome = SearchOutcome::aborted(Some(5), "node limit".into(), SearchStatistics::default());
        assert_eq!(outcome.result, SearchResult::Feasible(5));
        assert!(!outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(
            outcome.termination_reason,
            TerminationReason::Aborted("node limit".into())
        );
    }

    // Tests an aborted search without incumbent is unknown, not infeasible
    // Verified by returning Infeasible for an empty abort
    #[test]
    fn test_aborted_without_incumbent_is_unknown() {
        let outcome: SearchOutcome<i32> =
            SearchOutcome::aborted(None, "time".into(), SearchStatistics::default());
        assert_eq!(outcome.result, SearchResult::Unknown);
        assert!(!outcome.is_infeasible());
        assert!(!outcome.has_solution());
    }

    // Tests map converts the solution and keeps the classification
    // Verified by returning Unknown from map
    #[test]
    fn test_map_keeps_status() {
        let outcome = SearchOutcome::optimal(3, SearchStatistics::default()).map(|x| x * 10);
        assert_eq!(outcome.result, SearchResult::Optimal(30));
        assert_eq!(outcome.termination_reason, TerminationReason::OptimalityProven);
        assert_eq!(SearchResult::<i32>::Infeasible.map(|x| x + 1), SearchResult::Infeasible);
        assert_eq!(SearchResult::Feasible(1).solution(), Some(&1));
    }

    // Tests the outcome display names result, reason, and objective
    // Verified by omitting the termination reason from the display
    #[test]
    fn test_display() {
        let mut stats = SearchStatistics::default();
        stats.on_solution(8);
        let outcome = SearchOutcome::optimal((), stats);
        assert_eq!(outcome.to_string(), "Optimal (Optimality proven), objective 8");
        let infeasible: SearchOutcome<()> = SearchOutcome::infeasible(SearchStatistics::default());
        assert!(infeasible.is_infeasible());
        assert_eq!(infeasible.to_string(), "Infeasible (Infeasibility proven)");
    }
}
