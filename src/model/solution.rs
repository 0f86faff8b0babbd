//! Plain-data snapshot of a solved board model

use crate::engine::space::{Space, Var};
use crate::model::board::BoardModel;
use ndarray::Array2;
use std::fmt;

/// One complete stacking: boards, deck, part levels, and score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Color boards, bottom first; 0 is empty, `p + 1` is part `p`
    pub boards: Vec<Array2<i32>>,
    /// Tile value under each cell, 0 where empty
    pub value_boards: Vec<Array2<i32>>,
    /// Part in each deck slot, `None` for an empty slot
    pub deck: Vec<Option<usize>>,
    /// Level of each part, `None` for an unused part
    pub part_levels: Vec<Option<usize>>,
    /// Tile values of the deck slots, matching `deck`
    pub deck_values: Vec<Option<i32>>,
    /// Objective value
    pub score: i32,
}

/// Character of a part in printed boards: `0`-`9`, then `A` onward
pub fn part_symbol(part: usize) -> char {
    if part < 10 {
        char::from(b'0' + part as u8)
    } else {
        u32::try_from(part - 10)
            .ok()
            .and_then(|offset| char::from_u32(u32::from('A') + offset))
            .unwrap_or('?')
    }
}

impl Solution {
    /// Read the solution of `model` out of a space produced by search
    ///
    /// Unassigned variables read as their minimum, so the snapshot is only
    /// meaningful for spaces the brancher accepted as leaves.
    pub fn extract(model: &BoardModel, space: &Space) -> Self {
        let side = model.grid_size();
        let read_board = |vars: &[Var]| {
            let cells: Vec<i32> = vars.iter().map(|&var| space.min(var)).collect();
            Array2::from_shape_vec((side, side), cells).unwrap_or_else(|_| Array2::zeros((side, side)))
        };
        let boards = model.boards().iter().map(|b| read_board(b)).collect();
        let value_boards = model.value_boards().iter().map(|b| read_board(b)).collect();

        let parts = model.parts();
        let deck: Vec<Option<usize>> = model
            .deck()
            .iter()
            .map(|&slot| {
                usize::try_from(space.min(slot))
                    .ok()
                    .filter(|&part| part < parts)
            })
            .collect();
        let deck_values = deck
            .iter()
            .map(|slot| slot.map(|part| model.catalog().source(part).value()))
            .collect();
        let part_levels = model
            .level_codes()
            .iter()
            .map(|&code| usize::try_from(space.min(code) - 1).ok())
            .collect();

        Self {
            boards,
            value_boards,
            deck,
            part_levels,
            deck_values,
            score: space.min(model.score()),
        }
    }

    /// Number of levels
    pub const fn levels(&self) -> usize {
        self.boards.len()
    }

    /// Parts placed on `level`
    pub fn parts_on_level(&self, level: usize) -> Vec<usize> {
        self.part_levels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == Some(level))
            .map(|(part, _)| part)
            .collect()
    }

    /// Used parts in deck order
    pub fn played_parts(&self) -> Vec<usize> {
        self.deck.iter().flatten().copied().collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, board) in self.boards.iter().enumerate() {
            writeln!(f, "Level {level}")?;
            for row in board.rows() {
                write!(f, "\t")?;
                for &color in row {
                    let symbol = usize::try_from(color - 1).map_or('_', part_symbol);
                    write!(f, "{symbol}")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        let slots: Vec<String> = self
            .deck
            .iter()
            .map(|slot| slot.map_or_else(|| " -".to_owned(), |part| format!("{part:>2}")))
            .collect();
        writeln!(f, "Deck used :  {{{}}}", slots.join(", "))?;
        let values: Vec<String> = self
            .deck_values
            .iter()
            .map(|value| value.map_or_else(|| " -".to_owned(), |v| format!("{v:>2}")))
            .collect();
        writeln!(f, "Part values: {{{}}}", values.join(", "))?;
        writeln!(f, "Score : {}", self.score)
    }
}
