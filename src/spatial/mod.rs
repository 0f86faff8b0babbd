//! Tile geometry and placement encoding
//!
//! This module contains the spatial side of the model:
//! - Grid geometry, rotations and traversal orders
//! - Tile shapes and their orientations
//! - Placement patterns compiled to automata
//! - The cached tile catalog

/// The tile set and its cache
pub mod catalog;
/// Cell kinds, indexing, rotations, spiral order
pub mod grid;
/// Placement patterns and their compilation
pub mod pattern;
/// Tile outlines
pub mod shape;

pub use catalog::{TileCatalog, TileSource};
pub use grid::Cell;
pub use shape::TileShape;
