//! Regular patterns describing where a tile may sit in a flattened grid
//!
//! A shape `w` wide placed on a grid `wh` wide shows up in the row-major cell
//! sequence as its rows separated by exactly `wh - w` empty cells, preceded
//! and followed by any number of empty cells. Alternating the orientations of
//! a tile and compiling the result gives one automaton per tile.

use crate::engine::propagators::Nfa;
use crate::spatial::grid::Cell;
use crate::spatial::shape::TileShape;
use std::collections::BTreeSet;

/// Regular expression over integer symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A single symbol
    Symbol(i32),
    /// Sequence of sub-patterns; empty matches the empty word
    Concat(Vec<Pattern>),
    /// Choice between sub-patterns
    Alt(Vec<Pattern>),
    /// Zero or more repetitions
    Star(Box<Pattern>),
    /// Exactly `n` repetitions
    Repeat(Box<Pattern>, usize),
}

impl Pattern {
    /// A single symbol
    pub const fn symbol(symbol: i32) -> Self {
        Self::Symbol(symbol)
    }

    /// Sequence of `parts`
    pub const fn concat(parts: Vec<Self>) -> Self {
        Self::Concat(parts)
    }

    /// Choice between `options`
    pub const fn alt(options: Vec<Self>) -> Self {
        Self::Alt(options)
    }

    /// Zero or more repetitions of `inner`
    pub fn star(inner: Self) -> Self {
        Self::Star(Box::new(inner))
    }

    /// Exactly `count` repetitions of `inner`
    pub fn repeat(inner: Self, count: usize) -> Self {
        Self::Repeat(Box::new(inner), count)
    }

    /// Compile into an epsilon-free automaton with only useful states
    pub fn compile(&self) -> Nfa {
        let mut builder = ThompsonBuilder::default();
        let (start, accept) = builder.fragment(self);
        builder.finish(start, accept)
    }
}

/// Automaton with epsilon moves under construction
#[derive(Debug, Default)]
struct ThompsonBuilder {
    moves: Vec<Vec<(Option<i32>, usize)>>,
}

impl ThompsonBuilder {
    fn state(&mut self) -> usize {
        self.moves.push(Vec::new());
        self.moves.len() - 1
    }

    fn edge(&mut self, from: usize, label: Option<i32>, to: usize) {
        if let Some(edges) = self.moves.get_mut(from) {
            edges.push((label, to));
        }
    }

    fn fragment(&mut self, pattern: &Pattern) -> (usize, usize) {
        match pattern {
            Pattern::Symbol(symbol) => {
                let start = self.state();
                let end = self.state();
                self.edge(start, Some(*symbol), end);
                (start, end)
            }
            Pattern::Concat(parts) => {
                let start = self.state();
                let mut end = start;
                for part in parts {
                    let (s, e) = self.fragment(part);
                    self.edge(end, None, s);
                    end = e;
                }
                (start, end)
            }
            Pattern::Alt(options) => {
                let start = self.state();
                let end = self.state();
                for option in options {
                    let (s, e) = self.fragment(option);
                    self.edge(start, None, s);
                    self.edge(e, None, end);
                }
                (start, end)
            }
            Pattern::Star(inner) => {
                let start = self.state();
                let end = self.state();
                let (s, e) = self.fragment(inner);
                self.edge(start, None, s);
                self.edge(start, None, end);
                self.edge(e, None, s);
                self.edge(e, None, end);
                (start, end)
            }
            Pattern::Repeat(inner, count) => {
                let start = self.state();
                let mut end = start;
                for _ in 0..*count {
                    let (s, e) = self.fragment(inner);
                    self.edge(end, None, s);
                    end = e;
                }
                (start, end)
            }
        }
    }

    fn closure(&self, state: usize) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([state]);
        let mut stack = vec![state];
        while let Some(current) = stack.pop() {
            for &(label, target) in self.moves.get(current).map_or(&[][..], Vec::as_slice) {
                if label.is_none() && seen.insert(target) {
                    stack.push(target);
                }
            }
        }
        seen
    }

    /// Remove epsilon moves, then keep the states on some accepting path
    fn finish(self, start: usize, accept: usize) -> Nfa {
        let count = self.moves.len();
        let mut transitions: Vec<Vec<(i32, usize)>> = vec![Vec::new(); count];
        let mut accepting = vec![false; count];

        for state in 0..count {
            let closure = self.closure(state);
            accepting[state] = closure.contains(&accept);
            let mut out = BTreeSet::new();
            for &member in &closure {
                for &(label, target) in self.moves.get(member).map_or(&[][..], Vec::as_slice) {
                    if let Some(symbol) = label {
                        out.insert((symbol, target));
                    }
                }
            }
            transitions[state] = out.into_iter().collect();
        }

        let mut forward = vec![false; count];
        forward[start] = true;
        let mut stack = vec![start];
        while let Some(state) = stack.pop() {
            for &(_, target) in &transitions[state] {
                if !forward[target] {
                    forward[target] = true;
                    stack.push(target);
                }
            }
        }

        let mut backward = accepting.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for state in 0..count {
                if !backward[state]
                    && transitions[state].iter().any(|&(_, target)| backward[target])
                {
                    backward[state] = true;
                    changed = true;
                }
            }
        }

        let mut renumber = vec![None; count];
        let mut next = 0;
        for state in 0..count {
            if (forward[state] && backward[state]) || state == start {
                renumber[state] = Some(next);
                next += 1;
            }
        }

        let mut kept_transitions = Vec::with_capacity(next);
        let mut kept_accepting = Vec::with_capacity(next);
        for state in 0..count {
            if renumber[state].is_none() {
                continue;
            }
            kept_transitions.push(
                transitions[state]
                    .iter()
                    .filter_map(|&(symbol, target)| {
                        renumber[target].filter(|_| backward[target]).map(|t| (symbol, t))
                    })
                    .collect(),
            );
            kept_accepting.push(accepting[state]);
        }

        let start = renumber[start].unwrap_or(0);
        Nfa::new(start, kept_transitions, kept_accepting)
    }
}

fn row_pattern(shape: &TileShape, row: usize) -> impl Iterator<Item = Pattern> + '_ {
    (0..shape.width()).map(move |col| Pattern::symbol(shape.get(row, col).symbol()))
}

/// Every row-major placement of `shape` on a `wh × wh` grid
///
/// # Panics
///
/// Panics if the shape does not fit on the grid.
pub fn placement_pattern(shape: &TileShape, wh: usize) -> Pattern {
    assert!(
        shape.width() <= wh && shape.height() <= wh,
        "{}x{} shape does not fit a {wh}x{wh} grid",
        shape.width(),
        shape.height()
    );
    let empty = Pattern::symbol(Cell::Empty.symbol());
    let mut parts = vec![Pattern::star(empty.clone())];
    for row in 0..shape.height() {
        if row > 0 {
            parts.push(Pattern::repeat(empty.clone(), wh - shape.width()));
        }
        parts.extend(row_pattern(shape, row));
    }
    parts.push(Pattern::star(empty));
    Pattern::concat(parts)
}

/// Placements of any of `shapes`, led by a control symbol
///
/// Control `1` is followed by one placement; control `0` by empty cells only.
/// Matching always runs over exactly `1 + wh²` symbols, so the unplaced branch
/// can use an unbounded run of empty cells.
pub fn reified_placement_pattern(shapes: &[TileShape], wh: usize) -> Pattern {
    let empty = Cell::Empty.symbol();
    let placed = Pattern::concat(vec![
        Pattern::symbol(1),
        Pattern::alt(shapes.iter().map(|shape| placement_pattern(shape, wh)).collect()),
    ]);
    let unplaced = Pattern::concat(vec![Pattern::symbol(0), Pattern::star(Pattern::symbol(empty))]);
    Pattern::alt(vec![placed, unplaced])
}
