//! Tests for the stacking model's variables and rule propagation

#[cfg(test)]
mod tests {
    use nmbr9::model::board::BoardModel;
    use nmbr9::model::config::ModelConfig;
    use nmbr9::model::instance::PlayType;
    use nmbr9::spatial::catalog::{BASE_TILES, TileCatalog};
    use nmbr9::spatial::grid::{Cell, square_index};
    use nmbr9::spatial::shape::TileShape;

    fn config(max_value: usize, copies: usize, deck_size: usize, grid_size: usize, max_layers: usize) -> ModelConfig {
        ModelConfig {
            play_type: PlayType::Free,
            max_value,
            copies,
            deck_size,
            grid_size,
            max_layers,
            symmetry_breaking: false,
            deck_level_symmetry: false,
            seed: 0,
        }
    }

    fn build(config: &ModelConfig) -> BoardModel {
        BoardModel::build(config, TileCatalog::for_instance(&config.instance()))
    }

    // Covered cells of tile `value` in its base orientation, shifted by (row, col)
    fn tile_cells(value: usize, row: usize, col: usize) -> Vec<(usize, usize)> {
        TileShape::parse(BASE_TILES[value])
            .positions(Cell::Mark)
            .into_iter()
            .map(|(r, c)| (r + row, c + col))
            .collect()
    }

    // Two 0 tiles side by side on the bottom and a 1 tile on top at column
    // offset `top_col`; deck order 0, 1, 2 with part 3 unused
    fn stacked(top_col: usize) -> BoardModel {
        let mut model = build(&config(1, 2, 3, 8, 2));
        for (slot, part) in [0, 1, 2].into_iter().enumerate() {
            assert!(model.fix_deck(slot, part).is_ok());
        }
        for (part, code) in [(0, 1), (1, 1), (2, 2), (3, 0)] {
            assert!(model.fix_level(part, code).is_ok());
        }
        for (row, col) in tile_cells(0, 0, 0) {
            assert!(model.fix_cell(0, row, col, 1).is_ok());
        }
        for (row, col) in tile_cells(0, 0, 3) {
            assert!(model.fix_cell(0, row, col, 2).is_ok());
        }
        for (row, col) in tile_cells(1, 0, top_col) {
            assert!(model.fix_cell(1, row, col, 3).is_ok());
        }
        model
    }

    // Verifies variable counts and initial domains
    // Verified by giving outer cells the full color range
    #[test]
    fn test_dimensions_and_domains() {
        let model = build(&config(1, 1, 2, 7, 2));
        let space = model.space();
        assert_eq!(
            (model.parts(), model.cards(), model.levels(), model.grid_size()),
            (2, 2, 2, 7)
        );
        assert_eq!(model.boards().len(), 2);
        assert_eq!(model.board(0).len(), 49);
        assert_eq!(model.value_boards()[1].len(), 49);
        assert_eq!(model.placement(1, 1).len(), 49);
        assert_eq!(model.marks(0, 0).len(), 49);
        assert_eq!(model.borders(0, 0).len(), 49);

        assert_eq!(space.value(model.board(0)[0]), Some(0));
        assert_eq!(space.value(model.board(1)[48]), Some(0));
        assert_eq!(space.value(model.board(0)[square_index(0, 3, 7)]), Some(0));
        let inner = model.board(0)[square_index(3, 3, 7)];
        assert_eq!((space.min(inner), space.max(inner)), (0, 2));

        assert!(model.deck().iter().all(|&slot| space.max(slot) == 2));
        assert!(model.order().iter().all(|&item| space.max(item) == 2));
        assert!(model.level_codes().iter().all(|&code| space.max(code) == 2));
        assert_eq!(space.value(model.before(1, 1)), Some(0));
        assert_eq!(space.max(model.score()), 1);
        assert_eq!(model.level_areas().len(), 2);
        assert_eq!(model.used().len(), 2);
        assert_eq!(model.not_used().len(), 2);
        assert_eq!(model.on_level(1).len(), 2);
        assert_eq!(model.config().deck_size, 2);
        assert_eq!(model.catalog().len(), 2);
    }

    // Tests an unused part leaves the deck and every board
    // Verified by dropping the usage count on the deck
    #[test]
    fn test_unused_part_disappears() {
        let mut model = build(&config(1, 1, 2, 7, 1));
        assert!(model.fix_level(1, 0).is_ok());
        assert!(model.space_mut().propagate().is_ok());
        let space = model.space();
        assert_eq!(space.value(model.used()[1]), Some(0));
        assert_eq!(space.value(model.not_used()[1]), Some(1));
        assert_eq!(space.value(model.order()[1]), Some(2));
        assert!(model.deck().iter().all(|&slot| !space.contains(slot, 1)));
        assert!(model.board(0).iter().all(|&cell| !space.contains(cell, 2)));
    }

    // Tests the empty deck slots form a suffix
    // Verified by removing the ordering of the empty-slot flags
    #[test]
    fn test_empty_slots_suffix() {
        let mut model = build(&config(1, 1, 2, 7, 1));
        assert!(model.fix_deck(0, 2).is_ok());
        assert!(model.space_mut().propagate().is_ok());
        assert_eq!(model.space().value(model.deck()[1]), Some(2));
        assert_eq!(model.space().value(model.score()), Some(0));
    }

    // Tests a legal two-level stack propagates to a complete assignment
    // Verified by computing the score from level codes without subtracting usage
    #[test]
    fn test_supported_stack() {
        let mut model = stacked(2);
        assert!(model.space_mut().propagate().is_ok());
        let space = model.space();
        assert_eq!(space.value(model.score()), Some(1));
        assert_eq!(
            model.order().iter().map(|&x| space.value(x)).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2), Some(3)]
        );
        assert_eq!(space.value(model.before(0, 2)), Some(1));
        assert_eq!(space.value(model.before(2, 1)), Some(0));
        assert_eq!(
            model.level_areas().iter().map(|&x| space.value(x)).collect::<Vec<_>>(),
            vec![Some(20), Some(5)]
        );
        // hole of the first 0 tile and an uncovered top cell
        assert_eq!(space.value(model.board(0)[square_index(2, 2, 8)]), Some(0));
        assert_eq!(space.value(model.board(1)[square_index(1, 1, 8)]), Some(0));
        assert_eq!(space.value(model.value_boards()[1][square_index(3, 4, 8)]), Some(1));
        assert_eq!(space.value(model.on_level(1)[2]), Some(1));
    }

    // Tests a tile over the hole of a 0 tile is rejected
    // Verified by posting support only on the bottom level
    #[test]
    fn test_overhanging_stack_fails() {
        let mut model = stacked(0);
        assert!(model.space_mut().propagate().is_err());
    }

    // Tests a second part on the bottom must touch an earlier one
    // Verified by removing the connectivity rule
    #[test]
    fn test_disconnected_bottom_fails() {
        let mut model = build(&config(1, 1, 2, 12, 1));
        assert!(model.fix_deck(0, 0).is_ok());
        assert!(model.fix_deck(1, 1).is_ok());
        for (row, col) in tile_cells(0, 0, 0) {
            assert!(model.fix_cell(0, row, col, 1).is_ok());
        }
        for (row, col) in tile_cells(1, 4, 5) {
            assert!(model.fix_cell(0, row, col, 2).is_ok());
        }
        assert!(model.space_mut().propagate().is_err());
    }

    // Tests a part above the bottom needs two distinct supports
    // Verified by requiring a single support
    #[test]
    fn test_single_support_fails() {
        let mut model = build(&config(1, 2, 3, 8, 2));
        for (slot, part) in [0, 2, 3].into_iter().enumerate() {
            assert!(model.fix_deck(slot, part).is_ok());
        }
        assert!(model.fix_level(3, 2).is_ok());
        for (row, col) in tile_cells(0, 0, 0) {
            assert!(model.fix_cell(0, row, col, 1).is_ok());
        }
        // the 1 tile turned upside down lies entirely on the 0 tile
        let upside_down = TileShape::parse(BASE_TILES[1]).rotated().rotated();
        for (row, col) in upside_down.positions(Cell::Mark) {
            assert!(model.fix_cell(1, row, col, 4).is_ok());
        }
        assert!(model.space_mut().propagate().is_err());
    }

    // Tests the upper parts of a deck prefix need as much area below them
    // within the same prefix, even when the level totals would allow it
    // Verified by dropping the per-part prefix area constraint
    #[test]
    fn test_deck_prefix_area_fails() {
        let mut model = build(&config(7, 1, 6, 8, 2));
        // areas 5 and 7 on level 0 cannot carry 10 and 8 on level 1
        for (slot, part) in [1, 7, 0, 4, 2, 3].into_iter().enumerate() {
            assert!(model.fix_deck(slot, part).is_ok());
        }
        for (part, code) in [(1, 1), (7, 1), (0, 2), (4, 2), (2, 1), (3, 1), (5, 0), (6, 0)] {
            assert!(model.fix_level(part, code).is_ok());
        }
        assert!(model.space_mut().propagate().is_err());
    }
}
