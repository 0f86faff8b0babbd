//! Rule checks on a finished solution, independent of the constraint model

use crate::model::solution::Solution;
use crate::spatial::catalog::TileCatalog;
use crate::spatial::grid::{Cell, is_outer};
use ndarray::ArrayBase;
use std::collections::HashSet;
use std::fmt;

/// A broken game rule found in a solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A cell of the outer ring is covered
    OuterCellCovered {
        /// Level of the cell
        level: usize,
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },
    /// The cells of a part match no orientation of its tile
    NotATile {
        /// Offending part
        part: usize,
        /// Level where the cells are
        level: usize,
    },
    /// A part shows up on a level other than its own, or while unused
    MisplacedPart {
        /// Offending part
        part: usize,
        /// Level where it was found
        level: usize,
    },
    /// Deck and part levels disagree, or a part is dealt twice
    InconsistentDeck(String),
    /// A value board cell does not carry its tile's value
    ValueMismatch {
        /// Level of the cell
        level: usize,
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },
    /// A part that is not first on its level touches no earlier part there
    Disconnected {
        /// Offending part
        part: usize,
        /// Its level
        level: usize,
    },
    /// A covered cell above the bottom has no earlier part underneath
    Unsupported {
        /// Offending part
        part: usize,
        /// Its level
        level: usize,
    },
    /// A part above the bottom rests on fewer than two earlier parts
    Unstable {
        /// Offending part
        part: usize,
        /// Its level
        level: usize,
        /// Distinct earlier parts below it
        supports: usize,
    },
    /// The recorded score differs from the recomputed one
    ScoreMismatch {
        /// Score stored in the solution
        recorded: i32,
        /// Score recomputed from the part levels
        expected: i32,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OuterCellCovered { level, row, col } => {
                write!(f, "outer cell ({row}, {col}) covered on level {level}")
            }
            Self::NotATile { part, level } => {
                write!(f, "part {part} on level {level} is not a placed tile")
            }
            Self::MisplacedPart { part, level } => {
                write!(f, "part {part} found on level {level} where it does not belong")
            }
            Self::InconsistentDeck(reason) => write!(f, "inconsistent deck: {reason}"),
            Self::ValueMismatch { level, row, col } => {
                write!(f, "wrong value at ({row}, {col}) on level {level}")
            }
            Self::Disconnected { part, level } => {
                write!(f, "part {part} on level {level} touches no earlier part")
            }
            Self::Unsupported { part, level } => {
                write!(f, "part {part} on level {level} overhangs")
            }
            Self::Unstable {
                part,
                level,
                supports,
            } => write!(
                f,
                "part {part} on level {level} rests on {supports} earlier part(s)"
            ),
            Self::ScoreMismatch { recorded, expected } => {
                write!(f, "score {recorded} recorded, {expected} expected")
            }
        }
    }
}

type Position = (usize, usize);

struct Footprint {
    marks: Vec<Position>,
    borders: Vec<Position>,
}

fn cells_of(solution: &Solution, level: usize, part: usize) -> Vec<Position> {
    let color = part as i32 + 1;
    solution.boards[level]
        .indexed_iter()
        .filter(|&(_, &c)| c == color)
        .map(|(position, _)| position)
        .collect()
}

// Match the covered cells against every orientation of the part's tile
fn footprint(catalog: &TileCatalog, part: usize, cells: &[Position], side: usize) -> Option<Footprint> {
    let &(anchor_row, anchor_col) = cells.first()?;
    for shape in catalog.source(part).shapes() {
        let shape_marks = shape.positions(Cell::Mark);
        let Some(&(first_row, first_col)) = shape_marks.first() else {
            continue;
        };
        let shift = |&(r, c): &Position| -> Option<Position> {
            let row = (anchor_row + r).checked_sub(first_row)?;
            let col = (anchor_col + c).checked_sub(first_col)?;
            (row < side && col < side).then_some((row, col))
        };
        let Some(marks) = shape_marks.iter().map(shift).collect::<Option<Vec<_>>>() else {
            continue;
        };
        if marks == cells {
            let borders = shape
                .positions(Cell::Border)
                .iter()
                .filter_map(shift)
                .collect();
            return Some(Footprint { marks, borders });
        }
    }
    None
}

/// Check `solution` against every game rule
///
/// Returns the list of violations found, empty for a legal stacking.
pub fn validate_solution(solution: &Solution, catalog: &TileCatalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    let levels = solution.levels();
    let parts = solution.part_levels.len();
    let side = solution.boards.first().map_or(0, ArrayBase::nrows);

    check_deck(solution, &mut violations);

    for (level, board) in solution.boards.iter().enumerate() {
        for ((row, col), &color) in board.indexed_iter() {
            if color != 0 && is_outer(row, col, side) {
                violations.push(Violation::OuterCellCovered { level, row, col });
            }
            let expected = usize::try_from(color - 1)
                .ok()
                .filter(|&part| part < parts)
                .map_or(0, |part| catalog.source(part).value());
            if solution.value_boards[level][(row, col)] != expected {
                violations.push(Violation::ValueMismatch { level, row, col });
            }
        }
    }

    let position_in_deck = |part: usize| solution.deck.iter().position(|&slot| slot == Some(part));
    let is_earlier = |earlier: usize, part: usize| match (position_in_deck(earlier), position_in_deck(part)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    };

    let mut footprints: Vec<Option<Footprint>> = Vec::with_capacity(parts);
    for part in 0..parts {
        let home = solution.part_levels[part];
        for level in 0..levels {
            if Some(level) != home && !cells_of(solution, level, part).is_empty() {
                violations.push(Violation::MisplacedPart { part, level });
            }
        }
        let placed = home.and_then(|level| {
            let cells = cells_of(solution, level, part);
            let found = footprint(catalog, part, &cells, side);
            if found.is_none() {
                violations.push(Violation::NotATile { part, level });
            }
            found
        });
        footprints.push(placed);
    }

    for part in 0..parts {
        let (Some(level), Some(print)) = (solution.part_levels[part], &footprints[part]) else {
            continue;
        };
        let owner = |lvl: usize, (row, col): Position| {
            usize::try_from(solution.boards[lvl][(row, col)] - 1).ok()
        };

        let not_first = (0..parts)
            .any(|other| other != part && solution.part_levels[other] == Some(level) && is_earlier(other, part));
        if not_first {
            let touches = print.borders.iter().any(|&cell| {
                owner(level, cell).is_some_and(|other| is_earlier(other, part))
            });
            if !touches {
                violations.push(Violation::Disconnected { part, level });
            }
        }

        if level > 0 {
            let mut supports = HashSet::new();
            let mut overhang = false;
            for &cell in &print.marks {
                let below = owner(level - 1, cell).filter(|&below| is_earlier(below, part));
                overhang |= below.is_none();
                supports.extend(below);
            }
            if overhang {
                violations.push(Violation::Unsupported { part, level });
            }
            if supports.len() < 2 {
                violations.push(Violation::Unstable {
                    part,
                    level,
                    supports: supports.len(),
                });
            }
        }
    }

    let expected: i32 = solution
        .part_levels
        .iter()
        .enumerate()
        .filter_map(|(part, level)| {
            level.map(|l| catalog.source(part).value() * l as i32)
        })
        .sum();
    if expected != solution.score {
        violations.push(Violation::ScoreMismatch {
            recorded: solution.score,
            expected,
        });
    }

    violations
}

fn check_deck(solution: &Solution, violations: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    let mut ended = false;
    for slot in &solution.deck {
        let Some(part) = slot else {
            ended = true;
            continue;
        };
        if ended {
            violations.push(Violation::InconsistentDeck(format!(
                "part {part} dealt after an empty slot"
            )));
        }
        if !seen.insert(*part) {
            violations.push(Violation::InconsistentDeck(format!("part {part} dealt twice")));
        }
    }
    for (part, level) in solution.part_levels.iter().enumerate() {
        if level.is_some() != seen.contains(&part) {
            violations.push(Violation::InconsistentDeck(format!(
                "part {part} is {} but {} the deck",
                if level.is_some() { "placed" } else { "unplaced" },
                if seen.contains(&part) { "in" } else { "not in" },
            )));
        }
    }
}
