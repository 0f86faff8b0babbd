//! Symmetry-breaking constraints on top of a built board model

use crate::engine::propagators::{Element, LexGeq, Linear, Precede};
use crate::model::board::BoardModel;
use crate::model::config::ModelConfig;
use crate::model::instance::PlayType;
use crate::spatial::grid::rotation_map;
use tracing::debug;

/// Post the symmetry-breaking constraints enabled in `config`
///
/// With `symmetry_breaking` set, copies of the same tile value enter the deck
/// in index order and the bottom board is lexicographically at least each of
/// its three rotations. With `deck_level_symmetry` set under free play, level
/// codes are non-decreasing along the deck.
pub fn post_symmetry_breaking(model: &mut BoardModel, config: &ModelConfig) {
    if config.symmetry_breaking {
        post_copy_precedence(model, config);
        post_rotation_breaking(model);
    }
    if config.deck_level_symmetry && config.play_type == PlayType::Free {
        post_deck_level_order(model);
    }
}

fn post_copy_precedence(model: &mut BoardModel, config: &ModelConfig) {
    let deck = model.deck().to_vec();
    let mut posted = 0usize;
    for value in 0..=config.max_value {
        let first = value * config.copies;
        for part in first..first + config.copies - 1 {
            model
                .space_mut()
                .post(Precede::new(&deck, part as i32, part as i32 + 1));
            posted += 1;
        }
    }
    debug!(posted, "copy precedence");
}

fn post_rotation_breaking(model: &mut BoardModel) {
    let side = model.grid_size();
    let bottom = model.board(0).to_vec();
    for quarter_turns in 1..4 {
        let rotated: Vec<_> = rotation_map(side, quarter_turns)
            .into_iter()
            .map(|source| bottom[source])
            .collect();
        model.space_mut().post(LexGeq::new(&bottom, &rotated));
    }
}

fn post_deck_level_order(model: &mut BoardModel) {
    let levels = model.levels() as i32;
    let mut codes = model.level_codes().to_vec();
    let deck = model.deck().to_vec();
    let space = model.space_mut();
    // empty slots read the top code so they never constrain a used slot
    codes.push(space.constant(levels));
    let slot_codes: Vec<_> = deck
        .iter()
        .map(|&slot| {
            let code = space.new_var(0, levels);
            space.post(Element::new(&codes, slot, code));
            code
        })
        .collect();
    for pair in slot_codes.windows(2) {
        space.post(Linear::less_equal(pair[0], pair[1]));
    }
}
