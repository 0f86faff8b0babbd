//! Finite-domain constraint engine
//!
//! Integer variables live in a [`Space`] together with the propagators that
//! filter them. Search explores the tree depth first on one space, undoing
//! domain changes through a trail, and tightens the objective bound after
//! every solution.

/// Bitset domain storage
pub mod domain;
/// Search monitors
pub mod monitor;
/// Constraint propagators
pub mod propagators;
/// Search outcomes
pub mod result;
/// Branch-and-bound driver and branching interface
pub mod search;
/// Variables, propagation queue, and backtracking frames
pub mod space;
/// Search counters
pub mod stats;

pub use domain::{Inconsistency, PropResult};
pub use result::{SearchOutcome, SearchResult, TerminationReason};
pub use search::{BranchAndBound, Brancher, Decision};
pub use space::{Propagator, PropagatorCost, Space, Var};
pub use stats::SearchStatistics;
