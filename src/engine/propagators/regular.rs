//! Automaton membership over a sequence of variables

use crate::engine::domain::{Inconsistency, PropResult};
use crate::engine::space::{Propagator, PropagatorCost, Space, Var};
use bitvec::vec::BitVec;
use std::sync::Arc;

/// Epsilon-free nondeterministic finite automaton over integer symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    start: usize,
    transitions: Vec<Vec<(i32, usize)>>,
    accepting: Vec<bool>,
}

impl Nfa {
    /// Assemble an automaton from its transition lists
    ///
    /// # Panics
    ///
    /// Panics if the start state or a transition target is out of range, or
    /// if `accepting` does not cover every state.
    pub fn new(start: usize, transitions: Vec<Vec<(i32, usize)>>, accepting: Vec<bool>) -> Self {
        let states = transitions.len();
        assert!(start < states, "start state {start} out of range");
        assert_eq!(accepting.len(), states, "accepting flags per state");
        assert!(
            transitions
                .iter()
                .flatten()
                .all(|&(_, target)| target < states),
            "transition target out of range"
        );
        Self {
            start,
            transitions,
            accepting,
        }
    }

    /// Initial state
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Number of states
    pub const fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of transitions over all states
    pub fn transition_count(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    /// Outgoing `(symbol, target)` pairs of `state`
    pub fn transitions(&self, state: usize) -> &[(i32, usize)] {
        self.transitions.get(state).map_or(&[], Vec::as_slice)
    }

    /// Whether `state` is final
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.get(state).copied().unwrap_or(false)
    }

    /// Test whether the automaton accepts `word`
    pub fn accepts(&self, word: &[i32]) -> bool {
        let mut current: BitVec = BitVec::repeat(false, self.state_count());
        current.set(self.start, true);
        for &symbol in word {
            let mut next: BitVec = BitVec::repeat(false, self.state_count());
            for state in current.iter_ones() {
                for &(label, target) in self.transitions(state) {
                    if label == symbol {
                        next.set(target, true);
                    }
                }
            }
            if next.not_any() {
                return false;
            }
            current = next;
        }
        current.iter_ones().any(|state| self.is_accepting(state))
    }
}

/// The sequence `variables` spells a word accepted by `automaton`
///
/// Filtering unrolls the automaton into one layer per variable and keeps the
/// values lying on some path from the start to an accepting state, which is
/// domain consistent.
#[derive(Debug, Clone)]
pub struct Regular {
    variables: Vec<Var>,
    automaton: Arc<Nfa>,
}

impl Regular {
    /// Constrain `variables` to words of `automaton`
    pub fn new(variables: &[Var], automaton: Arc<Nfa>) -> Self {
        Self {
            variables: variables.to_vec(),
            automaton,
        }
    }
}

impl Propagator for Regular {
    fn name(&self) -> &'static str {
        "regular"
    }

    fn variables(&self) -> Vec<Var> {
        self.variables.clone()
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Expensive
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let nfa = &self.automaton;
        let states = nfa.state_count();
        let length = self.variables.len();

        let mut reached: Vec<BitVec> = Vec::with_capacity(length + 1);
        let mut first: BitVec = BitVec::repeat(false, states);
        first.set(nfa.start(), true);
        reached.push(first);
        for &x in &self.variables {
            let mut next: BitVec = BitVec::repeat(false, states);
            if let Some(layer) = reached.last() {
                for state in layer.iter_ones() {
                    for &(symbol, target) in nfa.transitions(state) {
                        if space.contains(x, symbol) {
                            next.set(target, true);
                        }
                    }
                }
            }
            if next.not_any() {
                return Err(Inconsistency);
            }
            reached.push(next);
        }

        let mut alive: BitVec = BitVec::repeat(false, states);
        if let Some(last) = reached.last() {
            for state in last.iter_ones() {
                if nfa.is_accepting(state) {
                    alive.set(state, true);
                }
            }
        }
        if alive.not_any() {
            return Err(Inconsistency);
        }

        for (position, &x) in self.variables.iter().enumerate().rev() {
            let lo = space.min(x);
            let mut supported = vec![false; (space.max(x) - lo) as usize + 1];
            let mut previous: BitVec = BitVec::repeat(false, states);
            if let Some(layer) = reached.get(position) {
                for state in layer.iter_ones() {
                    for &(symbol, target) in nfa.transitions(state) {
                        if alive.get(target).is_some_and(|bit| *bit) && space.contains(x, symbol) {
                            previous.set(state, true);
                            if let Some(flag) = supported.get_mut((symbol - lo) as usize) {
                                *flag = true;
                            }
                        }
                    }
                }
            }
            space.retain(x, |value| {
                supported
                    .get((value - lo) as usize)
                    .copied()
                    .unwrap_or(false)
            })?;
            alive = previous;
        }
        Ok(())
    }
}
