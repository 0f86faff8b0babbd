//! Branching order of the stacking model and the known-deck dealer

use crate::engine::domain::{Inconsistency, PropResult};
use crate::engine::search::{Brancher, Decision};
use crate::engine::space::{Space, Var};
use crate::model::board::BoardModel;
use crate::spatial::grid::center_out_spiral;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use tracing::debug;

/// Phased brancher over the board model's variables
///
/// The phases run in sequence and a phase is only left once all of its
/// variables are assigned:
/// 1. deck slots in index order, smallest value first
/// 2. level codes, largest value first
/// 3. color cells level by level from the bottom, each level from the center
///    outward, preferring the smallest nonzero color
/// 4. order variables, committed to their minimum
/// 5. any other unassigned variable, smallest value first
#[derive(Debug, Clone)]
pub struct StackingBrancher {
    deck: Vec<Var>,
    level_codes: Vec<Var>,
    cells: Vec<Var>,
    order: Vec<Var>,
}

impl StackingBrancher {
    /// Capture the branching variables of `model`
    pub fn new(model: &BoardModel) -> Self {
        let spiral = center_out_spiral(model.grid_size());
        let cells = model
            .boards()
            .iter()
            .flat_map(|board| spiral.iter().map(|&s| board[s]))
            .collect();
        Self {
            deck: model.deck().to_vec(),
            level_codes: model.level_codes().to_vec(),
            cells,
            order: model.order().to_vec(),
        }
    }

    fn first_open(space: &Space, vars: &[Var]) -> Option<Var> {
        vars.iter().copied().find(|&var| !space.is_assigned(var))
    }
}

impl Brancher for StackingBrancher {
    fn choose(&self, space: &Space) -> Option<Decision> {
        if let Some(var) = Self::first_open(space, &self.deck) {
            return Some(Decision::Binary {
                var,
                value: space.min(var),
            });
        }
        if let Some(var) = Self::first_open(space, &self.level_codes) {
            return Some(Decision::Binary {
                var,
                value: space.max(var),
            });
        }
        if let Some(var) = Self::first_open(space, &self.cells) {
            let min = space.min(var);
            let value = if min > 0 {
                min
            } else {
                space.values(var).find(|&v| v > 0).unwrap_or(min)
            };
            return Some(Decision::Binary { var, value });
        }
        if let Some(var) = Self::first_open(space, &self.order) {
            return Some(Decision::Commit {
                var,
                value: space.min(var),
            });
        }
        space
            .variables()
            .find(|&var| !space.is_assigned(var))
            .map(|var| Decision::Binary {
                var,
                value: space.min(var),
            })
    }
}

/// Deal a known deck: each slot in turn takes a uniformly drawn value from
/// its current domain, excluding the empty-slot marker, and the model is
/// propagated after every draw
///
/// # Errors
///
/// Returns `Inconsistency` if propagation fails or a slot has no part left.
pub fn deal_known_deck(model: &mut BoardModel, seed: u64) -> PropResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let sentinel = model.parts() as i32;
    let deck = model.deck().to_vec();
    model.space_mut().propagate()?;
    for (slot, &var) in deck.iter().enumerate() {
        let part = model
            .space()
            .values(var)
            .filter(|&value| value != sentinel)
            .choose(&mut rng)
            .ok_or(Inconsistency)?;
        debug!(slot, part, "dealt");
        model.fix_deck(slot, part)?;
        model.space_mut().propagate()?;
    }
    Ok(())
}
