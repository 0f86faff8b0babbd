//! Immutable tile outlines and their rotations

use crate::spatial::grid::{Cell, rotate_quarter};
use ndarray::Array2;
use std::fmt;

/// A `height × width` grid of [`Cell`]s describing one tile orientation
///
/// Equality compares dimensions and every cell, so a non-square shape and its
/// quarter rotation are always distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileShape {
    cells: Array2<Cell>,
}

impl TileShape {
    /// Parse a shape from equally long pattern rows
    ///
    /// # Panics
    ///
    /// Panics on an empty pattern, ragged rows, or characters other than
    /// `' '`, `'X'` and `'.'`.
    pub fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        assert!(height > 0 && width > 0, "tile pattern must not be empty");

        let mut cells = Array2::<Cell>::default((height, width));
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "ragged tile pattern row {r}");
            for (c, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch)
                    .unwrap_or_else(|| panic!("invalid tile pattern character {ch:?}"));
                if let Some(slot) = cells.get_mut([r, c]) {
                    *slot = cell;
                }
            }
        }
        Self { cells }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Cell at `(row, col)`, empty outside the shape
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells.get([row, col]).copied().unwrap_or_default()
    }

    /// Underlying cell grid
    pub const fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Number of covered cells
    pub fn area(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Mark).count()
    }

    /// Coordinates of every cell of `kind`, row-major
    pub fn positions(&self, kind: Cell) -> Vec<(usize, usize)> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == kind)
            .map(|(position, _)| position)
            .collect()
    }

    /// The shape turned a quarter clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            cells: rotate_quarter(&self.cells),
        }
    }

    /// Distinct orientations among the four quarter rotations, identity first
    pub fn unique_rotations(&self) -> Vec<Self> {
        let mut unique: Vec<Self> = Vec::with_capacity(4);
        let mut current = self.clone();
        for _ in 0..4 {
            let next = current.rotated();
            if !unique.contains(&current) {
                unique.push(current);
            }
            current = next;
        }
        unique
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}
