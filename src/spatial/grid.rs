//! Square grid geometry: cell kinds, row-major indexing, rotations, and the
//! center-outward traversal used when filling boards

use ndarray::Array2;
use std::fmt;

/// Kind of one cell of a tile shape or placement board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Cell {
    /// Not touched by the tile
    #[default]
    Empty,
    /// Covered by the tile
    Mark,
    /// Adjacent to the tile without being covered
    Border,
}

impl Cell {
    /// Parse a pattern character: `' '` empty, `'X'` mark, `'.'` border
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Empty),
            'X' => Some(Self::Mark),
            '.' => Some(Self::Border),
            _ => None,
        }
    }

    /// Symbol of the cell in placement sequences
    pub const fn symbol(self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Mark => 1,
            Self::Border => 2,
        }
    }

    /// Pattern character of the cell
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Mark => 'X',
            Self::Border => '.',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Row-major index of `(row, col)` in a grid `width` cells wide
#[inline]
pub const fn square_index(row: usize, col: usize, width: usize) -> usize {
    row * width + col
}

/// Whether `(row, col)` is on the outer ring of a `side × side` grid
#[inline]
pub const fn is_outer(row: usize, col: usize, side: usize) -> bool {
    row == 0 || col == 0 || row + 1 == side || col + 1 == side
}

/// Rotate a grid a quarter turn clockwise
///
/// The result is `height × width`, with `out[r][c] = input[height - 1 - c][r]`.
pub fn rotate_quarter<T: Clone + Default>(input: &Array2<T>) -> Array2<T> {
    let (height, width) = input.dim();
    let mut rotated = Array2::<T>::default((width, height));
    for ((r, c), cell) in rotated.indexed_iter_mut() {
        if let Some(value) = input.get([height - 1 - c, r]) {
            *cell = value.clone();
        }
    }
    rotated
}

/// Source index for every cell of a square board turned `quarter_turns`
/// times clockwise
///
/// `rotated[i] = board[rotation_map[i]]` for a row-major `side × side` board.
pub fn rotation_map(side: usize, quarter_turns: usize) -> Vec<usize> {
    let mut map: Vec<usize> = (0..side * side).collect();
    for _ in 0..quarter_turns % 4 {
        map = (0..side * side)
            .map(|i| {
                let (r, c) = (i / side, i % side);
                map.get(square_index(side - 1 - c, r, side))
                    .copied()
                    .unwrap_or(i)
            })
            .collect();
    }
    map
}

/// Cell indices of a `side × side` grid, innermost first
///
/// The grid is peeled as a clockwise spiral from the top-left corner and the
/// resulting order is reversed, so the sequence starts at the geometric center
/// and winds outward.
pub fn center_out_spiral(side: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(side * side);
    let (mut top, mut bottom, mut left, mut right) = (0, side, 0, side);

    while top < bottom && left < right {
        for c in left..right {
            order.push(square_index(top, c, side));
        }
        top += 1;

        for r in top..bottom {
            order.push(square_index(r, right - 1, side));
        }
        right -= 1;

        if top < bottom {
            for c in (left..right).rev() {
                order.push(square_index(bottom - 1, c, side));
            }
            bottom -= 1;
        }

        if left < right {
            for r in (top..bottom).rev() {
                order.push(square_index(r, left, side));
            }
            left += 1;
        }
    }

    debug_assert_eq!(order.len(), side * side);
    order.reverse();
    order
}
