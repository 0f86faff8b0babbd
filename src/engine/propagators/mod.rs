//! Filtering algorithms available to models

/// Boolean connectives and one-hot channeling
pub mod boolean;
/// Occurrence counting and inverse channeling
pub mod counting;
/// Indexed lookup
pub mod element;
/// Weighted sums
pub mod linear;
/// Lexicographic ordering and value precedence
pub mod ordering;
/// Comparisons reified on a boolean
pub mod reified;
/// Automaton membership
pub mod regular;

pub use boolean::{BoolAnd, BoolChannel, BoolOr};
pub use counting::{CountEq, InverseChannel};
pub use element::{Element, ElementConst};
pub use linear::{Linear, Relation};
pub use ordering::{LexGeq, Precede};
pub use regular::{Nfa, Regular};
pub use reified::{ReifiedEqConst, ReifiedLess, ReifiedLessConst};
