//! The Nmbr9 constraint model and its solve pipeline
//!
//! A [`ModelConfig`] is validated, turned into a [`BoardModel`] holding every
//! variable and rule, narrowed by symmetry breaking, and searched with the
//! phased brancher under branch-and-bound. Solutions come back as plain
//! [`Solution`] snapshots that [`validate_solution`] can re-check.

/// Variables and constraints of the stacking rules
pub mod board;
/// Branching order and the known-deck dealer
pub mod branching;
/// Model configuration and search budgets
pub mod config;
/// Instance key of a tile set and board
pub mod instance;
/// Solution snapshots
pub mod solution;
/// End-to-end solve
pub mod solve;
/// Symmetry-breaking constraints
pub mod symmetry;
/// Independent rule checks on solutions
pub mod validation;

pub use board::BoardModel;
pub use config::{ModelConfig, SearchLimits};
pub use instance::{Instance, PlayType};
pub use solution::Solution;
pub use solve::{SolveReport, solve, solve_until_stopped, solve_with_monitor};
pub use validation::{Violation, validate_solution};
