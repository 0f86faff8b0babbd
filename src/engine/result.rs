//! Classification of a finished search

use crate::engine::stats::SearchStatistics;
use std::fmt;

/// What the search established about the problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<S> {
    /// The best solution, proven optimal
    Optimal(S),
    /// The best solution found before the search was stopped
    Feasible(S),
    /// No solution exists
    Infeasible,
    /// The search was stopped before finding any solution
    Unknown,
}

impl<S> SearchResult<S> {
    /// The carried solution, if any
    pub const fn solution(&self) -> Option<&S> {
        match self {
            Self::Optimal(solution) | Self::Feasible(solution) => Some(solution),
            Self::Infeasible | Self::Unknown => None,
        }
    }

    /// Convert the carried solution
    pub fn map<T, F>(self, f: F) -> SearchResult<T>
    where
        F: FnOnce(S) -> T,
    {
        match self {
            Self::Optimal(solution) => SearchResult::Optimal(f(solution)),
            Self::Feasible(solution) => SearchResult::Feasible(f(solution)),
            Self::Infeasible => SearchResult::Infeasible,
            Self::Unknown => SearchResult::Unknown,
        }
    }
}

impl<S> fmt::Display for SearchResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal(_) => write!(f, "Optimal"),
            Self::Feasible(_) => write!(f, "Feasible"),
            Self::Infeasible => write!(f, "Infeasible"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the search stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree was exhausted after finding a solution
    OptimalityProven,
    /// The tree was exhausted without a solution
    InfeasibilityProven,
    /// A monitor stopped the search
    Aborted(String),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OptimalityProven => write!(f, "Optimality proven"),
            Self::InfeasibilityProven => write!(f, "Infeasibility proven"),
            Self::Aborted(reason) => write!(f, "Aborted: {reason}"),
        }
    }
}

/// Result, termination reason, and statistics of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<S> {
    /// Best solution and its status
    pub result: SearchResult<S>,
    /// Why the search ended
    pub termination_reason: TerminationReason,
    /// Effort counters
    pub statistics: SearchStatistics,
}

impl<S> SearchOutcome<S> {
    /// Exhausted search that found `solution`
    pub const fn optimal(solution: S, statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Exhausted search without any solution
    pub const fn infeasible(statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// Stopped search, keeping the incumbent when there is one
    pub fn aborted(best: Option<S>, reason: String, statistics: SearchStatistics) -> Self {
        Self {
            result: best.map_or(SearchResult::Unknown, SearchResult::Feasible),
            termination_reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    /// Whether the solution is proven optimal
    pub const fn is_optimal(&self) -> bool {
        matches!(self.result, SearchResult::Optimal(_))
    }

    /// Whether the problem is proven infeasible
    pub const fn is_infeasible(&self) -> bool {
        matches!(self.result, SearchResult::Infeasible)
    }

    /// Whether a solution is available
    pub const fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }

    /// Convert the carried solution
    pub fn map<T, F>(self, f: F) -> SearchOutcome<T>
    where
        F: FnOnce(S) -> T,
    {
        SearchOutcome {
            result: self.result.map(f),
            termination_reason: self.termination_reason,
            statistics: self.statistics,
        }
    }
}

impl<S> fmt::Display for SearchOutcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.result, self.termination_reason)?;
        if let Some(objective) = self.statistics.best_objective {
            write!(f, ", objective {objective}")?;
        }
        Ok(())
    }
}
