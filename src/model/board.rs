//! Variables and constraints of the Nmbr9 stacking model
//!
//! Levels are numbered from 0 at the bottom. A level's color board holds 0
//! for an empty cell and `part + 1` for a cell covered by `part`. Each part
//! additionally owns, per level, a placement board over {empty, mark, border}
//! that must spell a word of its tile automaton. Rules are posted in the
//! order below; the "earlier part marks this cell" booleans are shared by the
//! connectivity, support, and stability rules and exist only for interior
//! cells since the outer ring of every color board stays empty.

use crate::engine::domain::PropResult;
use crate::engine::propagators::{
    BoolAnd, BoolChannel, BoolOr, CountEq, Element, ElementConst, InverseChannel, Linear,
    Regular, ReifiedEqConst, ReifiedLess, ReifiedLessConst, Relation,
};
use crate::engine::space::{Space, Var};
use crate::model::config::ModelConfig;
use crate::spatial::catalog::{TileCatalog, TileSource};
use crate::spatial::grid::{is_outer, square_index};
use std::sync::Arc;
use tracing::info;

/// All variables of one model together with the space they live in
#[derive(Debug, Clone)]
pub struct BoardModel {
    space: Space,
    catalog: Arc<TileCatalog>,
    config: ModelConfig,
    wh: usize,
    levels: usize,
    parts: usize,
    cards: usize,
    boards: Vec<Vec<Var>>,
    value_boards: Vec<Vec<Var>>,
    placements: Vec<Vec<Vec<Var>>>,
    marks: Vec<Vec<Vec<Var>>>,
    borders: Vec<Vec<Vec<Var>>>,
    used: Vec<Var>,
    not_used: Vec<Var>,
    on_level: Vec<Vec<Var>>,
    level_codes: Vec<Var>,
    before: Vec<Vec<Var>>,
    deck: Vec<Var>,
    order: Vec<Var>,
    score: Var,
    level_areas: Vec<Var>,
    // earlier_cover[l][p][s]: some part before p marks cell s of level l
    earlier_cover: Vec<Vec<Vec<Var>>>,
    // earlier_marks[l][p][p2][s]: p2 is before p and marks cell s of level l
    earlier_marks: Vec<Vec<Vec<Vec<Var>>>>,
    // earlier_on_level[l][p]: (p2, p2 is before p and lies on level l) for p2 ≠ p
    earlier_on_level: Vec<Vec<Vec<(usize, Var)>>>,
}

impl BoardModel {
    /// Allocate every variable and post rules 0 to 12 plus the implied
    /// constraints
    ///
    /// The configuration must have passed [`ModelConfig::validate`].
    ///
    /// # Panics
    ///
    /// Panics if the catalog was built for a different grid or part count.
    pub fn build(config: &ModelConfig, catalog: Arc<TileCatalog>) -> Self {
        assert_eq!(
            catalog.len(),
            config.number_of_parts(),
            "catalog does not match the configured part count"
        );
        assert_eq!(
            catalog.instance().grid_size(),
            config.grid_size,
            "catalog compiled for another grid size"
        );

        let wh = config.grid_size;
        let levels = config.max_layers;
        let parts = config.number_of_parts();
        let cards = config.deck_size;
        let squares = wh * wh;
        let mut space = Space::new();

        // rule 0: outer rows and columns stay empty
        let boards: Vec<Vec<Var>> = (0..levels)
            .map(|_| {
                (0..squares)
                    .map(|s| {
                        if is_outer(s / wh, s % wh, wh) {
                            space.constant(0)
                        } else {
                            space.new_var(0, parts as i32)
                        }
                    })
                    .collect()
            })
            .collect();
        let max_tile_value = catalog.sources().map(TileSource::value).max().unwrap_or(0);
        let value_boards = (0..levels)
            .map(|_| space.new_vars(squares, 0, max_tile_value))
            .collect();
        let placements = (0..levels)
            .map(|_| (0..parts).map(|_| space.new_vars(squares, 0, 2)).collect())
            .collect();
        let marks = (0..levels)
            .map(|_| (0..parts).map(|_| space.new_bools(squares)).collect())
            .collect();
        let borders = (0..levels)
            .map(|_| (0..parts).map(|_| space.new_bools(squares)).collect())
            .collect();
        let used = space.new_bools(parts);
        let not_used = space.new_bools(parts);
        let on_level = (0..levels).map(|_| space.new_bools(parts)).collect();
        let level_codes = space.new_vars(parts, 0, levels as i32);
        let before = (0..parts)
            .map(|p1| {
                (0..parts)
                    .map(|p2| if p1 == p2 { space.constant(0) } else { space.new_bool() })
                    .collect()
            })
            .collect();
        let deck = space.new_vars(cards, 0, parts as i32);
        let order = space.new_vars(parts, 0, cards as i32);
        let max_score: i32 = catalog
            .sources()
            .map(|source| source.value() * (levels as i32 - 1))
            .sum();
        let score = space.new_var(0, max_score);
        let interior = ((wh - 2) * (wh - 2)) as i32;
        let level_areas = space.new_vars(levels, 0, interior);

        let mut model = Self {
            space,
            catalog,
            config: *config,
            wh,
            levels,
            parts,
            cards,
            boards,
            value_boards,
            placements,
            marks,
            borders,
            used,
            not_used,
            on_level,
            level_codes,
            before,
            deck,
            order,
            score,
            level_areas,
            earlier_cover: Vec::new(),
            earlier_marks: Vec::new(),
            earlier_on_level: Vec::new(),
        };

        model.post_deck_usage();
        model.post_placements();
        model.post_order_channels();
        model.post_level_codes();
        model.post_placement_decomposition();
        model.post_color_links();
        model.post_earlier_marks();
        model.post_earlier_on_level();
        model.post_connectivity();
        model.post_support();
        model.post_stability();
        model.post_score();
        model.post_implied();

        info!(
            parts,
            levels,
            cards,
            grid = wh,
            variables = model.space.variable_count(),
            propagators = model.space.propagator_count(),
            "board model built"
        );
        model
    }

    const fn is_interior(&self, s: usize) -> bool {
        !is_outer(s / self.wh, s % self.wh, self.wh)
    }

    fn tile_value(&self, part: usize) -> i32 {
        self.catalog.source(part).value()
    }

    // rule 1: each part occurs in the deck exactly when it is used, and the
    // empty slots form a suffix
    fn post_deck_usage(&mut self) {
        for p in 0..self.parts {
            self.space
                .post(CountEq::new(&self.deck, p as i32, self.used[p]));
        }
        let sentinel = self.parts as i32;
        let empty_slots = self.space.new_bools(self.cards);
        for (i, &slot) in self.deck.iter().enumerate() {
            self.space
                .post(ReifiedEqConst::new(slot, sentinel, empty_slots[i]));
        }
        for pair in empty_slots.windows(2) {
            self.space.post(Linear::less_equal(pair[0], pair[1]));
        }
    }

    // rule 2: the placement board of a part on a level is a word of its tile
    // automaton, led by the on-level flag
    fn post_placements(&mut self) {
        for p in 0..self.parts {
            let automaton = self.catalog.source(p).automaton();
            for l in 0..self.levels {
                let mut sequence = Vec::with_capacity(1 + self.wh * self.wh);
                sequence.push(self.on_level[l][p]);
                sequence.extend_from_slice(&self.placements[l][p]);
                self.space
                    .post(Regular::new(&sequence, Arc::clone(&automaton)));
            }
        }
    }

    // rules 3 and 4: deck and order are inverse, order induces before and usage
    fn post_order_channels(&mut self) {
        self.space.post(InverseChannel::new(&self.deck, &self.order));
        for p1 in 0..self.parts {
            for p2 in 0..self.parts {
                if p1 != p2 {
                    self.space.post(ReifiedLess::new(
                        self.order[p1],
                        self.order[p2],
                        self.before[p1][p2],
                    ));
                }
            }
        }
        for p in 0..self.parts {
            self.space.post(ReifiedLessConst::new(
                self.order[p],
                self.cards as i32,
                self.used[p],
            ));
        }
    }

    // rules 5 and 6: level code decodes {not used, on level 0, ...}
    fn post_level_codes(&mut self) {
        for p in 0..self.parts {
            let mut flags = Vec::with_capacity(self.levels + 1);
            flags.push(self.not_used[p]);
            flags.extend((0..self.levels).map(|l| self.on_level[l][p]));
            self.space.post(BoolChannel::new(&flags, self.level_codes[p]));
            self.space
                .post(Linear::sum_eq(&[self.used[p], self.not_used[p]], 1));
        }
    }

    // rule 7: placement cell = 0 for neither, 1 for mark, 2 for border
    fn post_placement_decomposition(&mut self) {
        for l in 0..self.levels {
            for p in 0..self.parts {
                for s in 0..self.wh * self.wh {
                    let neither = self.space.new_bool();
                    self.space.post(BoolChannel::new(
                        &[neither, self.marks[l][p][s], self.borders[l][p][s]],
                        self.placements[l][p][s],
                    ));
                }
            }
        }
    }

    // rule 8: color p+1 exactly where p marks; value board follows the color
    fn post_color_links(&mut self) {
        let mut values = Vec::with_capacity(self.parts + 1);
        values.push(0);
        values.extend((0..self.parts).map(|p| self.tile_value(p)));
        for l in 0..self.levels {
            for s in 0..self.wh * self.wh {
                for p in 0..self.parts {
                    self.space.post(ReifiedEqConst::new(
                        self.boards[l][s],
                        p as i32 + 1,
                        self.marks[l][p][s],
                    ));
                }
                self.space.post(ElementConst::new(
                    &values,
                    self.boards[l][s],
                    self.value_boards[l][s],
                ));
            }
        }
    }

    fn post_earlier_marks(&mut self) {
        let squares = self.wh * self.wh;
        let mut cover = Vec::with_capacity(self.levels);
        let mut earlier = Vec::with_capacity(self.levels);
        for l in 0..self.levels {
            let mut cover_level = Vec::with_capacity(self.parts);
            let mut earlier_level = Vec::with_capacity(self.parts);
            for p in 0..self.parts {
                let mut per_other = vec![Vec::new(); self.parts];
                let mut cover_part = Vec::with_capacity(squares);
                for s in 0..squares {
                    if !self.is_interior(s) {
                        cover_part.push(self.space.constant(0));
                        continue;
                    }
                    let mut witnesses = Vec::with_capacity(self.parts - 1);
                    for p2 in (0..self.parts).filter(|&p2| p2 != p) {
                        let witness = self.space.new_bool();
                        self.space.post(BoolAnd::new(
                            &[self.before[p2][p], self.marks[l][p2][s]],
                            witness,
                        ));
                        per_other[p2].push(witness);
                        witnesses.push(witness);
                    }
                    let covered = self.or_of(&witnesses);
                    cover_part.push(covered);
                }
                cover_level.push(cover_part);
                earlier_level.push(per_other);
            }
            cover.push(cover_level);
            earlier.push(earlier_level);
        }
        self.earlier_cover = cover;
        self.earlier_marks = earlier;
    }

    fn or_of(&mut self, operands: &[Var]) -> Var {
        if operands.is_empty() {
            return self.space.constant(0);
        }
        let result = self.space.new_bool();
        self.space.post(BoolOr::new(operands, result));
        result
    }

    fn interior_squares(&self) -> Vec<usize> {
        (0..self.wh * self.wh)
            .filter(|&s| self.is_interior(s))
            .collect()
    }

    fn post_earlier_on_level(&mut self) {
        let mut flags = Vec::with_capacity(self.levels);
        for l in 0..self.levels {
            let mut level = Vec::with_capacity(self.parts);
            for p in 0..self.parts {
                let mut per_part = Vec::with_capacity(self.parts - 1);
                for p2 in (0..self.parts).filter(|&p2| p2 != p) {
                    let flag = self.space.new_bool();
                    self.space.post(BoolAnd::new(
                        &[self.before[p2][p], self.on_level[l][p2]],
                        flag,
                    ));
                    per_part.push((p2, flag));
                }
                level.push(per_part);
            }
            flags.push(level);
        }
        self.earlier_on_level = flags;
    }

    // rule 9: a part that is not the first on its level has a border cell
    // over a mark of an earlier part on the same level
    fn post_connectivity(&mut self) {
        let interior = self.interior_squares();
        for l in 0..self.levels {
            for p in 0..self.parts {
                let earlier_on_level: Vec<Var> = self.earlier_on_level[l][p]
                    .iter()
                    .map(|&(_, flag)| flag)
                    .collect();
                let not_first = self.or_of(&earlier_on_level);

                let mut touching = Vec::with_capacity(interior.len());
                for &s in &interior {
                    let touch = self.space.new_bool();
                    self.space.post(BoolAnd::new(
                        &[self.borders[l][p][s], self.earlier_cover[l][p][s]],
                        touch,
                    ));
                    touching.push(touch);
                }
                let connected = self.or_of(&touching);

                // on_level ∧ not_first ⇒ connected
                self.space.post(Linear::new(
                    &[
                        (1, self.on_level[l][p]),
                        (1, not_first),
                        (-1, connected),
                    ],
                    Relation::Le,
                    1,
                ));
            }
        }
    }

    // rule 10: above the bottom level every mark sits on an earlier mark
    fn post_support(&mut self) {
        let interior = self.interior_squares();
        for l in 1..self.levels {
            for p in 0..self.parts {
                for &s in &interior {
                    self.space.post(Linear::implies(
                        self.marks[l][p][s],
                        self.earlier_cover[l - 1][p][s],
                    ));
                }
            }
        }
    }

    // rule 11: above the bottom level a part rests on two distinct earlier parts
    fn post_stability(&mut self) {
        let interior = self.interior_squares();
        for l in 1..self.levels {
            for p in 0..self.parts {
                let mut rests_on = Vec::with_capacity(self.parts - 1);
                for p2 in (0..self.parts).filter(|&p2| p2 != p) {
                    let below = self.earlier_marks[l - 1][p][p2].clone();
                    let mut contacts = Vec::with_capacity(below.len());
                    for (&s, &earlier) in interior.iter().zip(&below) {
                        let contact = self.space.new_bool();
                        self.space
                            .post(BoolAnd::new(&[self.marks[l][p][s], earlier], contact));
                        contacts.push(contact);
                    }
                    let rests = self.or_of(&contacts);
                    rests_on.push(rests);
                }
                let mut terms: Vec<(i64, Var)> = rests_on.iter().map(|&x| (1, x)).collect();
                terms.push((-2, self.on_level[l][p]));
                self.space.post(Linear::new(&terms, Relation::Ge, 0));
            }
        }
    }

    // rule 12: score = Σ value · (level code − used)
    fn post_score(&mut self) {
        let mut terms = Vec::with_capacity(2 * self.parts + 1);
        for p in 0..self.parts {
            let value = i64::from(self.tile_value(p));
            terms.push((value, self.level_codes[p]));
            terms.push((-value, self.used[p]));
        }
        terms.push((-1, self.score));
        self.space.post(Linear::new(&terms, Relation::Eq, 0));
    }

    fn post_implied(&mut self) {
        // a card at slot i sits at most on level ⌈(i+1)/2⌉ - 1
        let zero = self.space.constant(0);
        let mut codes = self.level_codes.clone();
        codes.push(zero);
        for i in 0..self.cards {
            let cap = (i as i32 + 2) / 2;
            let slot_level = self.space.new_var(0, cap);
            self.space.post(Element::new(&codes, self.deck[i], slot_level));
        }

        // covered area never grows going up
        for l in 0..self.levels {
            let mut terms: Vec<(i64, Var)> = (0..self.parts)
                .map(|p| (self.catalog.source(p).area() as i64, self.on_level[l][p]))
                .collect();
            terms.push((-1, self.level_areas[l]));
            self.space.post(Linear::new(&terms, Relation::Eq, 0));
        }
        for pair in self.level_areas.windows(2) {
            self.space.post(Linear::less_equal(pair[1], pair[0]));
        }

        // the same holds for every deck prefix: the parts before p on level
        // l, and p itself when it lies there, rest on parts before p on
        // level l - 1
        for l in 1..self.levels {
            for p in 0..self.parts {
                let area = |part: usize| self.catalog.source(part).area() as i64;
                let mut terms = vec![(-area(p), self.on_level[l][p])];
                terms.extend(
                    self.earlier_on_level[l - 1][p]
                        .iter()
                        .map(|&(p2, flag)| (area(p2), flag)),
                );
                terms.extend(
                    self.earlier_on_level[l][p]
                        .iter()
                        .map(|&(p2, flag)| (-area(p2), flag)),
                );
                self.space.post(Linear::new(&terms, Relation::Ge, 0));
            }
        }
    }

    /// Configuration the model was built from
    pub const fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Tile catalog in use
    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Current space
    pub const fn space(&self) -> &Space {
        &self.space
    }

    /// Mutable access for posting additional constraints
    pub const fn space_mut(&mut self) -> &mut Space {
        &mut self.space
    }

    /// Move the space out for search, leaving an empty one behind
    ///
    /// Variable handles stay valid for reading the searched space.
    pub fn take_space(&mut self) -> Space {
        std::mem::take(&mut self.space)
    }

    /// Grid side length
    pub const fn grid_size(&self) -> usize {
        self.wh
    }

    /// Number of levels
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// Number of parts
    pub const fn parts(&self) -> usize {
        self.parts
    }

    /// Number of deck slots
    pub const fn cards(&self) -> usize {
        self.cards
    }

    /// Row-major color board of `level`
    pub fn board(&self, level: usize) -> &[Var] {
        &self.boards[level]
    }

    /// Color boards, bottom first
    pub fn boards(&self) -> &[Vec<Var>] {
        &self.boards
    }

    /// Value boards, bottom first
    pub fn value_boards(&self) -> &[Vec<Var>] {
        &self.value_boards
    }

    /// Placement board of `part` on `level`
    pub fn placement(&self, level: usize, part: usize) -> &[Var] {
        &self.placements[level][part]
    }

    /// Mark cells of `part` on `level`
    pub fn marks(&self, level: usize, part: usize) -> &[Var] {
        &self.marks[level][part]
    }

    /// Border cells of `part` on `level`
    pub fn borders(&self, level: usize, part: usize) -> &[Var] {
        &self.borders[level][part]
    }

    /// Usage flags per part
    pub fn used(&self) -> &[Var] {
        &self.used
    }

    /// Non-usage flags per part
    pub fn not_used(&self) -> &[Var] {
        &self.not_used
    }

    /// On-level flags of every part for `level`
    pub fn on_level(&self, level: usize) -> &[Var] {
        &self.on_level[level]
    }

    /// Level codes per part: 0 unused, `l + 1` on level `l`
    pub fn level_codes(&self) -> &[Var] {
        &self.level_codes
    }

    /// Whether `p1` is drawn before `p2`
    pub fn before(&self, p1: usize, p2: usize) -> Var {
        self.before[p1][p2]
    }

    /// Deck slots; value `parts` marks an empty slot
    pub fn deck(&self) -> &[Var] {
        &self.deck
    }

    /// Deck position per part; value `cards` marks an unused part
    pub fn order(&self) -> &[Var] {
        &self.order
    }

    /// Covered area per level
    pub fn level_areas(&self) -> &[Var] {
        &self.level_areas
    }

    /// Objective variable
    pub const fn score(&self) -> Var {
        self.score
    }

    /// Fix the color of one cell
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the color is impossible there.
    pub fn fix_cell(&mut self, level: usize, row: usize, col: usize, color: i32) -> PropResult {
        let var = self.boards[level][square_index(row, col, self.wh)];
        self.space.assign(var, color)?;
        Ok(())
    }

    /// Fix the part in one deck slot
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the part is impossible there.
    pub fn fix_deck(&mut self, slot: usize, part: i32) -> PropResult {
        self.space.assign(self.deck[slot], part)?;
        Ok(())
    }

    /// Fix the level code of one part
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the code is impossible.
    pub fn fix_level(&mut self, part: usize, code: i32) -> PropResult {
        self.space.assign(self.level_codes[part], code)?;
        Ok(())
    }

    /// Hand the space to the search
    pub fn into_space(self) -> Space {
        self.space
    }
}
