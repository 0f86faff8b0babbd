//! Bitset-backed finite integer domains
//!
//! All domains of a space live in one contiguous bit vector. Inside the search
//! every change is logged on a trail so that backtracking restores the cleared
//! bits and cached bounds instead of keeping a copy of the store per branch.

use bitvec::vec::BitVec;
use std::fmt;

/// Raised when a domain operation would leave a variable without values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Inconsistency;

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "domain wipe-out")
    }
}

impl std::error::Error for Inconsistency {}

/// Result of a domain or propagation step
pub type PropResult<T = ()> = Result<T, Inconsistency>;

/// Layout and cached bounds of one variable inside the shared bit vector
#[derive(Debug, Clone, Copy)]
struct Slot {
    offset: i32,
    start: u32,
    width: u32,
    min: i32,
    max: i32,
    size: u32,
}

impl Slot {
    const fn bit(&self, value: i32) -> usize {
        self.start as usize + (value - self.offset) as usize
    }

    const fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.start as usize + self.width as usize
    }

    const fn covers(&self, value: i32) -> bool {
        value >= self.offset && ((value - self.offset) as u32) < self.width
    }
}

/// One logged domain change: the bounds before it and where its cleared bits
/// start in the bit log
#[derive(Debug, Clone, Copy)]
struct TrailEntry {
    var: u32,
    previous: Slot,
    cleared_from: u32,
}

/// Undo log of domain changes, split into frames
///
/// Changes are only logged while at least one frame is open. Changes made
/// without an open frame are permanent.
#[derive(Debug, Clone, Default)]
struct Trail {
    entries: Vec<TrailEntry>,
    cleared: Vec<u32>,
    frames: Vec<u32>,
}

/// Storage for every variable domain of a space
///
/// Values are stored relative to the lower bound each variable was created
/// with. Bounds and cardinality are cached per variable so that the common
/// queries never touch the bits.
#[derive(Debug, Clone, Default)]
pub struct DomainStore {
    bits: BitVec,
    slots: Vec<Slot>,
    trail: Trail,
}

impl DomainStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variable with domain `lo..=hi` and return its index
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`, an empty initial domain is a modelling error, or
    /// if the store outgrows 32-bit bit offsets.
    pub fn push(&mut self, lo: i32, hi: i32) -> usize {
        assert!(lo <= hi, "empty initial domain {lo}..={hi}");
        let start = self.bits.len();
        let width = (i64::from(hi) - i64::from(lo) + 1) as usize;
        assert!(
            u32::try_from(start + width).is_ok(),
            "domain store exceeds 32-bit offsets"
        );
        self.bits.resize(start + width, true);
        self.slots.push(Slot {
            offset: lo,
            start: start as u32,
            width: width as u32,
            min: lo,
            max: hi,
            size: width as u32,
        });
        self.slots.len() - 1
    }

    /// Start logging changes under a new frame
    pub fn push_frame(&mut self) {
        self.trail.frames.push(self.trail.entries.len() as u32);
    }

    /// Undo every change logged since the innermost open frame and close it
    ///
    /// Returns `false` if no frame was open.
    pub fn pop_frame(&mut self) -> bool {
        let Some(mark) = self.trail.frames.pop() else {
            return false;
        };
        let mark = mark as usize;
        if let Some(first) = self.trail.entries.get(mark) {
            let cleared_from = first.cleared_from as usize;
            for &bit in &self.trail.cleared[cleared_from..] {
                self.bits.set(bit as usize, true);
            }
            self.trail.cleared.truncate(cleared_from);
        }
        for entry in self.trail.entries.drain(mark..).rev() {
            self.slots[entry.var as usize] = entry.previous;
        }
        true
    }

    /// Number of open frames
    pub const fn frame_depth(&self) -> usize {
        self.trail.frames.len()
    }

    /// Number of logged changes across all open frames
    pub const fn trail_len(&self) -> usize {
        self.trail.entries.len()
    }

    /// Copy of the domains without the undo log
    pub fn snapshot(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            slots: self.slots.clone(),
            trail: Trail::default(),
        }
    }

    // Log the bounds of `var` and the bits in `range` about to be cleared
    fn log(&mut self, var: usize, range: std::ops::Range<usize>) {
        if self.trail.frames.is_empty() {
            return;
        }
        self.trail.entries.push(TrailEntry {
            var: var as u32,
            previous: self.slots[var],
            cleared_from: self.trail.cleared.len() as u32,
        });
        let first = range.start;
        let cleared = self.bits[range]
            .iter_ones()
            .map(|index| (first + index) as u32);
        self.trail.cleared.extend(cleared);
    }

    /// Number of variables in the store
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Test if the store holds no variables
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, var: usize) -> Slot {
        self.slots[var]
    }

    /// Smallest value left in the domain
    pub fn min(&self, var: usize) -> i32 {
        self.slots[var].min
    }

    /// Largest value left in the domain
    pub fn max(&self, var: usize) -> i32 {
        self.slots[var].max
    }

    /// Number of values left in the domain
    pub fn size(&self, var: usize) -> usize {
        self.slots[var].size as usize
    }

    /// Test whether the domain is a single value
    pub fn is_assigned(&self, var: usize) -> bool {
        self.slots[var].size == 1
    }

    /// Test domain membership
    pub fn contains(&self, var: usize, value: i32) -> bool {
        let slot = self.slot(var);
        if value < slot.min || value > slot.max {
            return false;
        }
        self.bits.get(slot.bit(value)).is_some_and(|bit| *bit)
    }

    /// Iterate the values of a domain in increasing order
    pub fn values(&self, var: usize) -> impl Iterator<Item = i32> + '_ {
        let slot = self.slot(var);
        self.bits[slot.range()]
            .iter_ones()
            .map(move |index| slot.offset + index as i32)
    }

    /// Remove one value, returning whether the domain changed
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if `value` was the last value of the domain.
    pub fn remove(&mut self, var: usize, value: i32) -> PropResult<bool> {
        if !self.contains(var, value) {
            return Ok(false);
        }
        let slot = self.slot(var);
        if slot.size == 1 {
            return Err(Inconsistency);
        }
        let bit = slot.bit(value);
        self.log(var, bit..bit + 1);
        self.bits.set(bit, false);
        let cached = &mut self.slots[var];
        cached.size -= 1;
        let range = &self.bits[cached.range()];
        if value == cached.min {
            cached.min = cached.offset + range.first_one().unwrap_or(0) as i32;
        }
        if value == cached.max {
            cached.max = cached.offset + range.last_one().unwrap_or(0) as i32;
        }
        Ok(true)
    }

    /// Remove every value below `lo`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if no value at or above `lo` remains.
    pub fn set_min(&mut self, var: usize, lo: i32) -> PropResult<bool> {
        let slot = self.slot(var);
        if lo <= slot.min {
            return Ok(false);
        }
        if lo > slot.max {
            return Err(Inconsistency);
        }
        let cut = slot.bit(lo);
        let below = slot.range().start..cut;
        let removed = self.bits[below.clone()].count_ones();
        self.log(var, below.clone());
        self.bits[below].fill(false);
        let cached = &mut self.slots[var];
        cached.size -= removed as u32;
        let range = &self.bits[cached.range()];
        cached.min = cached.offset + range.first_one().unwrap_or(0) as i32;
        Ok(true)
    }

    /// Remove every value above `hi`
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if no value at or below `hi` remains.
    pub fn set_max(&mut self, var: usize, hi: i32) -> PropResult<bool> {
        let slot = self.slot(var);
        if hi >= slot.max {
            return Ok(false);
        }
        if hi < slot.min {
            return Err(Inconsistency);
        }
        let above = slot.bit(hi) + 1..slot.range().end;
        let removed = self.bits[above.clone()].count_ones();
        self.log(var, above.clone());
        self.bits[above].fill(false);
        let cached = &mut self.slots[var];
        cached.size -= removed as u32;
        let range = &self.bits[cached.range()];
        cached.max = cached.offset + range.last_one().unwrap_or(0) as i32;
        Ok(true)
    }

    /// Reduce the domain to a single value
    ///
    /// # Errors
    ///
    /// Returns `Inconsistency` if `value` is not in the domain.
    pub fn assign(&mut self, var: usize, value: i32) -> PropResult<bool> {
        if !self.contains(var, value) {
            return Err(Inconsistency);
        }
        let slot = self.slot(var);
        if slot.size == 1 {
            return Ok(false);
        }
        debug_assert!(slot.covers(value));
        self.log(var, slot.range());
        self.bits[slot.range()].fill(false);
        self.bits.set(slot.bit(value), true);
        let cached = &mut self.slots[var];
        cached.min = value;
        cached.max = value;
        cached.size = 1;
        Ok(true)
    }
}
