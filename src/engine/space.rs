//! Constraint space: variable domains plus the propagators watching them

use crate::engine::domain::{DomainStore, Inconsistency, PropResult};
use bitvec::vec::BitVec;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Handle to an integer variable of a [`Space`]
///
/// Boolean variables are integer variables with domain `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Position of the variable inside its space
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Scheduling class of a propagator
///
/// Expensive propagators only run once every cheap one has reached fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagatorCost {
    /// Constant or linear work in the number of variables
    #[default]
    Cheap,
    /// Work proportional to a larger auxiliary structure
    Expensive,
}

/// A filtering algorithm over a fixed set of variables
///
/// Propagators are immutable and shared between a space and its snapshots, so
/// all filtering state is recomputed from the current domains.
pub trait Propagator: fmt::Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Variables whose domain changes wake this propagator
    fn variables(&self) -> Vec<Var>;

    /// Narrow domains through `space`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` when the constraint cannot be satisfied.
    fn propagate(&self, space: &mut Space) -> PropResult;

    /// Scheduling class
    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Cheap
    }
}

#[derive(Debug, Clone, Default)]
struct PropagatorTable {
    propagators: Vec<Arc<dyn Propagator>>,
    costs: Vec<PropagatorCost>,
    watchers: Vec<Vec<u32>>,
}

/// Propagators waiting to run, split by cost
#[derive(Debug, Clone, Default)]
struct Agenda {
    cheap: VecDeque<u32>,
    expensive: VecDeque<u32>,
    queued: BitVec,
}

impl Agenda {
    fn schedule(&mut self, id: u32, cost: PropagatorCost) {
        if self.queued.get(id as usize).is_some_and(|bit| *bit) {
            return;
        }
        self.queued.set(id as usize, true);
        match cost {
            PropagatorCost::Cheap => self.cheap.push_back(id),
            PropagatorCost::Expensive => self.expensive.push_back(id),
        }
    }

    fn pop(&mut self) -> Option<u32> {
        let id = self.cheap.pop_front().or_else(|| self.expensive.pop_front())?;
        self.queued.set(id as usize, false);
        Some(id)
    }

    fn clear(&mut self) {
        self.cheap.clear();
        self.expensive.clear();
        self.queued.fill(false);
    }
}

/// Domains of every variable together with the posted constraints
///
/// The search works on a single space: it opens a frame before each branching
/// decision and pops it to backtrack. Cloning copies the domains and shares
/// the propagator table.
#[derive(Debug, Clone, Default)]
pub struct Space {
    domains: DomainStore,
    table: Arc<PropagatorTable>,
    agenda: Agenda,
    failed: bool,
    propagations: u64,
}

impl Space {
    /// Create a space without variables or constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables
    pub const fn variable_count(&self) -> usize {
        self.domains.len()
    }

    /// Every variable in creation order
    pub fn variables(&self) -> impl Iterator<Item = Var> + use<> {
        (0..self.domains.len() as u32).map(Var)
    }

    /// Number of posted propagators
    pub fn propagator_count(&self) -> usize {
        self.table.propagators.len()
    }

    /// Number of propagator executions since the counter was last taken
    pub const fn propagations(&self) -> u64 {
        self.propagations
    }

    /// Read and reset the propagator execution counter
    pub const fn take_propagations(&mut self) -> u64 {
        let count = self.propagations;
        self.propagations = 0;
        count
    }

    /// Whether a domain has been wiped out in this space
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    /// Open a backtracking frame; domain changes from here on can be undone
    pub fn push_frame(&mut self) {
        self.domains.push_frame();
    }

    /// Undo every domain change since the innermost open frame and close it
    ///
    /// Clears a failure raised inside the frame along with any pending
    /// propagators. Returns `false` if no frame was open.
    pub fn pop_frame(&mut self) -> bool {
        if !self.domains.pop_frame() {
            return false;
        }
        self.failed = false;
        self.agenda.clear();
        true
    }

    /// Number of open frames
    pub const fn frame_depth(&self) -> usize {
        self.domains.frame_depth()
    }

    /// Number of domain changes held for backtracking
    pub const fn trail_len(&self) -> usize {
        self.domains.trail_len()
    }

    /// Independent copy of the current state without any open frames
    pub fn snapshot(&self) -> Self {
        Self {
            domains: self.domains.snapshot(),
            table: Arc::clone(&self.table),
            agenda: self.agenda.clone(),
            failed: self.failed,
            propagations: 0,
        }
    }

    /// Create an integer variable with domain `lo..=hi`
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn new_var(&mut self, lo: i32, hi: i32) -> Var {
        let index = self.domains.push(lo, hi);
        Arc::make_mut(&mut self.table).watchers.push(Vec::new());
        Var(index as u32)
    }

    /// Create a boolean variable
    pub fn new_bool(&mut self) -> Var {
        self.new_var(0, 1)
    }

    /// Create a variable fixed to `value`
    pub fn constant(&mut self, value: i32) -> Var {
        self.new_var(value, value)
    }

    /// Create `count` variables sharing the domain `lo..=hi`
    pub fn new_vars(&mut self, count: usize, lo: i32, hi: i32) -> Vec<Var> {
        (0..count).map(|_| self.new_var(lo, hi)).collect()
    }

    /// Create `count` boolean variables
    pub fn new_bools(&mut self, count: usize) -> Vec<Var> {
        self.new_vars(count, 0, 1)
    }

    /// Post a propagator and schedule its first run
    pub fn post<P: Propagator + 'static>(&mut self, propagator: P) {
        let variables = propagator.variables();
        let table = Arc::make_mut(&mut self.table);
        let id = table.propagators.len() as u32;
        for var in variables {
            if let Some(watchers) = table.watchers.get_mut(var.index())
                && watchers.last() != Some(&id)
            {
                watchers.push(id);
            }
        }
        let cost = propagator.cost();
        table.propagators.push(Arc::new(propagator));
        table.costs.push(cost);
        self.agenda.queued.push(false);
        self.agenda.schedule(id, cost);
    }

    fn wake(&mut self, var: Var) {
        let Some(watchers) = self.table.watchers.get(var.index()) else {
            return;
        };
        for &id in watchers {
            let cost = self.table.costs.get(id as usize).copied().unwrap_or_default();
            self.agenda.schedule(id, cost);
        }
    }

    fn fail(&mut self) -> Inconsistency {
        self.failed = true;
        self.agenda.clear();
        Inconsistency
    }

    fn track(&mut self, var: Var, outcome: PropResult<bool>) -> PropResult<bool> {
        match outcome {
            Ok(true) => {
                self.wake(var);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(_) => Err(self.fail()),
        }
    }

    /// Run scheduled propagators until fixpoint or failure
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if some domain becomes empty.
    pub fn propagate(&mut self) -> PropResult {
        if self.failed {
            return Err(Inconsistency);
        }
        let table = Arc::clone(&self.table);
        loop {
            let Some(id) = self.agenda.pop() else {
                return Ok(());
            };
            let Some(propagator) = table.propagators.get(id as usize) else {
                continue;
            };
            self.propagations += 1;
            if propagator.propagate(self).is_err() || self.failed {
                return Err(self.fail());
            }
        }
    }

    /// Smallest value of `var`
    pub fn min(&self, var: Var) -> i32 {
        self.domains.min(var.index())
    }

    /// Largest value of `var`
    pub fn max(&self, var: Var) -> i32 {
        self.domains.max(var.index())
    }

    /// Domain size of `var`
    pub fn size(&self, var: Var) -> usize {
        self.domains.size(var.index())
    }

    /// Test whether `value` is still possible for `var`
    pub fn contains(&self, var: Var, value: i32) -> bool {
        self.domains.contains(var.index(), value)
    }

    /// Whether `var` has a single value left
    pub fn is_assigned(&self, var: Var) -> bool {
        self.domains.is_assigned(var.index())
    }

    /// Value of an assigned variable
    pub fn value(&self, var: Var) -> Option<i32> {
        self.is_assigned(var).then(|| self.min(var))
    }

    /// Values of `var` in increasing order
    pub fn values(&self, var: Var) -> impl Iterator<Item = i32> + '_ {
        self.domains.values(var.index())
    }

    /// Remove `value` from `var`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the domain becomes empty.
    pub fn remove(&mut self, var: Var, value: i32) -> PropResult<bool> {
        let outcome = self.domains.remove(var.index(), value);
        self.track(var, outcome)
    }

    /// Remove every value of `var` below `lo`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the domain becomes empty.
    pub fn set_min(&mut self, var: Var, lo: i32) -> PropResult<bool> {
        let outcome = self.domains.set_min(var.index(), lo);
        self.track(var, outcome)
    }

    /// Remove every value of `var` above `hi`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if the domain becomes empty.
    pub fn set_max(&mut self, var: Var, hi: i32) -> PropResult<bool> {
        let outcome = self.domains.set_max(var.index(), hi);
        self.track(var, outcome)
    }

    /// Fix `var` to `value`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if `value` is not in the domain.
    pub fn assign(&mut self, var: Var, value: i32) -> PropResult<bool> {
        let outcome = self.domains.assign(var.index(), value);
        self.track(var, outcome)
    }

    /// Keep only the values of `var` accepted by `keep`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if no value is kept.
    pub fn retain<F>(&mut self, var: Var, mut keep: F) -> PropResult<bool>
    where
        F: FnMut(i32) -> bool,
    {
        let doomed: Vec<i32> = self.values(var).filter(|&value| !keep(value)).collect();
        if doomed.len() == self.size(var) {
            return Err(self.fail());
        }
        let mut changed = false;
        for value in doomed {
            changed |= self.remove(var, value)?;
        }
        Ok(changed)
    }
}
