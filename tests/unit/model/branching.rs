//! Tests for the phased brancher and the known-deck deal

#[cfg(test)]
mod tests {
    use nmbr9::engine::search::{Brancher, Decision};
    use nmbr9::model::board::BoardModel;
    use nmbr9::model::branching::{StackingBrancher, deal_known_deck};
    use nmbr9::model::config::ModelConfig;
    use nmbr9::model::instance::PlayType;
    use nmbr9::spatial::catalog::TileCatalog;
    use nmbr9::spatial::grid::square_index;
    use std::collections::HashSet;

    fn build(play_type: PlayType, max_value: usize, copies: usize, deck_size: usize, grid_size: usize) -> BoardModel {
        let config = ModelConfig {
            play_type,
            max_value,
            copies,
            deck_size,
            grid_size,
            max_layers: 1,
            symmetry_breaking: false,
            deck_level_symmetry: false,
            seed: 0,
        };
        BoardModel::build(&config, TileCatalog::for_instance(&config.instance()))
    }

    // Verifies the deck is branched first, smallest part first
    // Verified by starting with the level codes
    #[test]
    fn test_deck_first() {
        let mut model = build(PlayType::Free, 1, 1, 2, 7);
        assert!(model.space_mut().propagate().is_ok());
        let brancher = StackingBrancher::new(&model);
        let decision = brancher.choose(model.space());
        assert_eq!(
            decision,
            Some(Decision::Binary {
                var: model.deck()[0],
                value: 0
            })
        );
    }

    // Tests level codes come next, highest level first
    // Verified by trying the lowest code first
    #[test]
    fn test_level_codes_second() {
        let config = ModelConfig {
            play_type: PlayType::Free,
            max_value: 1,
            copies: 1,
            deck_size: 2,
            grid_size: 8,
            max_layers: 2,
            symmetry_breaking: false,
            deck_level_symmetry: false,
            seed: 0,
        };
        let mut model = BoardModel::build(&config, TileCatalog::for_instance(&config.instance()));
        assert!(model.fix_deck(0, 0).is_ok());
        assert!(model.fix_deck(1, 2).is_ok());
        let brancher = StackingBrancher::new(&model);
        let decision = brancher.choose(model.space());
        assert_eq!(
            decision,
            Some(Decision::Binary {
                var: model.level_codes()[0],
                value: 2
            })
        );
    }

    // Tests cells are branched from the center with a nonzero color first
    // Verified by visiting cells in row-major order
    #[test]
    fn test_cells_from_center() {
        let mut model = build(PlayType::Free, 0, 1, 1, 7);
        assert!(model.fix_deck(0, 0).is_ok());
        assert!(model.space_mut().propagate().is_ok());
        assert_eq!(model.space().value(model.level_codes()[0]), Some(1));
        let brancher = StackingBrancher::new(&model);
        let decision = brancher.choose(model.space());
        assert_eq!(
            decision,
            Some(Decision::Binary {
                var: model.board(0)[square_index(3, 3, 7)],
                value: 1
            })
        );
    }

    // Tests a known deal fills every slot with distinct parts
    // Verified by allowing the empty-slot marker in the draw
    #[test]
    fn test_deal_fills_deck() {
        let mut model = build(PlayType::Known, 1, 2, 4, 12);
        assert!(deal_known_deck(&mut model, 7).is_ok());
        let space = model.space();
        let dealt: Vec<i32> = model
            .deck()
            .iter()
            .filter_map(|&slot| space.value(slot))
            .collect();
        assert_eq!(dealt.len(), 4);
        assert!(dealt.iter().all(|&part| (0..4).contains(&part)));
        assert_eq!(dealt.iter().collect::<HashSet<_>>().len(), 4);
    }

    // Tests the same seed deals the same deck
    // Verified by seeding from entropy
    #[test]
    fn test_deal_reproducible() {
        let deal = |seed| {
            let mut model = build(PlayType::Known, 1, 2, 4, 12);
            assert!(deal_known_deck(&mut model, seed).is_ok());
            model
                .deck()
                .iter()
                .map(|&slot| model.space().value(slot))
                .collect::<Vec<_>>()
        };
        assert_eq!(deal(11), deal(11));
    }

    // Tests a deal that cannot fit on the board is reported
    // Verified by ignoring propagation failures during the deal
    #[test]
    fn test_deal_overfull_board() {
        let mut model = build(PlayType::Known, 1, 2, 4, 6);
        assert!(deal_known_deck(&mut model, 3).is_err());
    }
}
