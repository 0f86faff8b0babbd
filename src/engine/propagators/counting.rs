//! Occurrence counting and inverse channeling between two arrays

use crate::engine::domain::PropResult;
use crate::engine::space::{Propagator, Space, Var};

/// `|{ i : array[i] = value }| = count`
#[derive(Debug, Clone)]
pub struct CountEq {
    array: Vec<Var>,
    value: i32,
    count: Var,
}

impl CountEq {
    /// Count the occurrences of `value` in `array`
    pub fn new(array: &[Var], value: i32, count: Var) -> Self {
        Self {
            array: array.to_vec(),
            value,
            count,
        }
    }
}

impl Propagator for CountEq {
    fn name(&self) -> &'static str {
        "count_eq"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.array.clone();
        variables.push(self.count);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let certain = self
            .array
            .iter()
            .filter(|&&x| space.value(x) == Some(self.value))
            .count() as i32;
        let possible = self
            .array
            .iter()
            .filter(|&&x| space.contains(x, self.value))
            .count() as i32;
        space.set_min(self.count, certain)?;
        space.set_max(self.count, possible)?;

        if certain == possible {
            return Ok(());
        }
        if space.max(self.count) == certain {
            for &x in &self.array {
                if !space.is_assigned(x) {
                    space.remove(x, self.value)?;
                }
            }
        } else if space.min(self.count) == possible {
            for &x in &self.array {
                if space.contains(x, self.value) {
                    space.assign(x, self.value)?;
                }
            }
        }
        Ok(())
    }
}

/// Inverse channel between slot contents and item positions
///
/// `slots[i] = item` with `item < items.len()` holds exactly when
/// `items[item] = i` with `i < slots.len()`. The value `items.len()` in a slot
/// means the slot is empty and the value `slots.len()` for an item means the
/// item sits in no slot.
#[derive(Debug, Clone)]
pub struct InverseChannel {
    slots: Vec<Var>,
    items: Vec<Var>,
}

impl InverseChannel {
    /// Channel `slots` to `items`
    pub fn new(slots: &[Var], items: &[Var]) -> Self {
        Self {
            slots: slots.to_vec(),
            items: items.to_vec(),
        }
    }
}

impl Propagator for InverseChannel {
    fn name(&self) -> &'static str {
        "inverse_channel"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.slots.clone();
        variables.extend_from_slice(&self.items);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let slot_sentinel = self.items.len() as i32;
        let item_sentinel = self.slots.len() as i32;
        for &slot in &self.slots {
            space.set_min(slot, 0)?;
            space.set_max(slot, slot_sentinel)?;
        }
        for &item in &self.items {
            space.set_min(item, 0)?;
            space.set_max(item, item_sentinel)?;
        }

        // each (slot, item) pair is independent, so one sweep is a fixpoint
        for (i, &slot) in self.slots.iter().enumerate() {
            for (p, &item) in self.items.iter().enumerate() {
                let holds_item = space.contains(slot, p as i32);
                let at_slot = space.contains(item, i as i32);
                if holds_item && !at_slot {
                    space.remove(slot, p as i32)?;
                } else if at_slot && !holds_item {
                    space.remove(item, i as i32)?;
                }
            }
        }
        Ok(())
    }
}
