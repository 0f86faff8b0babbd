//! Indexed lookup into arrays of variables or constants

use crate::engine::domain::PropResult;
use crate::engine::space::{Propagator, Space, Var};

/// `result = array[index]` over an array of variables
#[derive(Debug, Clone)]
pub struct Element {
    array: Vec<Var>,
    index: Var,
    result: Var,
}

impl Element {
    /// Lookup of `index` in `array`
    pub fn new(array: &[Var], index: Var, result: Var) -> Self {
        Self {
            array: array.to_vec(),
            index,
            result,
        }
    }
}

fn intersects(space: &Space, a: Var, b: Var) -> bool {
    if space.max(a) < space.min(b) || space.max(b) < space.min(a) {
        return false;
    }
    if space.size(a) <= space.size(b) {
        space.values(a).any(|value| space.contains(b, value))
    } else {
        space.values(b).any(|value| space.contains(a, value))
    }
}

impl Propagator for Element {
    fn name(&self) -> &'static str {
        "element"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.array.clone();
        variables.push(self.index);
        variables.push(self.result);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let last = self.array.len() as i32 - 1;
        space.set_min(self.index, 0)?;
        space.set_max(self.index, last)?;

        let candidates: Vec<i32> = space.values(self.index).collect();
        let mut lo = i32::MAX;
        let mut hi = i32::MIN;
        for i in candidates {
            let Some(&x) = self.array.get(i as usize) else {
                continue;
            };
            if intersects(space, x, self.result) {
                lo = lo.min(space.min(x));
                hi = hi.max(space.max(x));
            } else {
                space.remove(self.index, i)?;
            }
        }
        space.set_min(self.result, lo)?;
        space.set_max(self.result, hi)?;

        if let Some(i) = space.value(self.index)
            && let Some(&x) = self.array.get(i as usize)
        {
            let result = self.result;
            let results: Vec<i32> = space.values(result).collect();
            space.retain(x, |value| results.binary_search(&value).is_ok())?;
            let selected: Vec<i32> = space.values(x).collect();
            space.retain(result, |value| selected.binary_search(&value).is_ok())?;
        }
        Ok(())
    }
}

/// `result = table[index]` over a constant table
#[derive(Debug, Clone)]
pub struct ElementConst {
    table: Vec<i32>,
    index: Var,
    result: Var,
}

impl ElementConst {
    /// Lookup of `index` in the constant `table`
    pub fn new(table: &[i32], index: Var, result: Var) -> Self {
        Self {
            table: table.to_vec(),
            index,
            result,
        }
    }
}

impl Propagator for ElementConst {
    fn name(&self) -> &'static str {
        "element_const"
    }

    fn variables(&self) -> Vec<Var> {
        vec![self.index, self.result]
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let result = self.result;
        let table = &self.table;
        let reachable: Vec<i32> = {
            let view: &Space = space;
            view.values(self.index)
                .filter(|&i| {
                    table
                        .get(i as usize)
                        .is_some_and(|&value| view.contains(result, value))
                })
                .collect()
        };
        space.retain(self.index, |i| reachable.binary_search(&i).is_ok())?;
        let mut images: Vec<i32> = reachable
            .iter()
            .filter_map(|&i| table.get(i as usize).copied())
            .collect();
        images.sort_unstable();
        images.dedup();
        space.retain(result, |value| images.binary_search(&value).is_ok())?;
        Ok(())
    }
}
