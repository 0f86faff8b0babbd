//! Constraint model and branch-and-bound search for the highest-scoring
//! Nmbr9 tile stacking
//!
//! Tiles are placed on a square board over several levels. The model encodes
//! every placement as a word of a tile automaton, ties levels together with
//! support and stability rules, and maximizes the level-weighted tile values.

#![forbid(unsafe_code)]

/// Finite-domain variables, propagators, and search
pub mod engine;
/// Command line, configuration constants, errors, and output
pub mod io;
/// The board model, symmetry breaking, branching, and solving
pub mod model;
/// Tile shapes, placement automata, and the tile catalog
pub mod spatial;

pub use io::error::{Nmbr9Error, Result};
