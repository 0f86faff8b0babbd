//! Comparisons whose truth is mirrored by a boolean variable

use crate::engine::domain::PropResult;
use crate::engine::space::{Propagator, Space, Var};

/// `control ⇔ (x = value)`
#[derive(Debug, Clone)]
pub struct ReifiedEqConst {
    x: Var,
    value: i32,
    control: Var,
}

impl ReifiedEqConst {
    /// Link `control` to `x = value`
    pub const fn new(x: Var, value: i32, control: Var) -> Self {
        Self { x, value, control }
    }
}

impl Propagator for ReifiedEqConst {
    fn name(&self) -> &'static str {
        "reified_eq_const"
    }

    fn variables(&self) -> Vec<Var> {
        vec![self.x, self.control]
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        match space.value(self.control) {
            Some(1) => {
                space.assign(self.x, self.value)?;
            }
            Some(_) => {
                space.remove(self.x, self.value)?;
            }
            None => {
                if !space.contains(self.x, self.value) {
                    space.assign(self.control, 0)?;
                } else if space.is_assigned(self.x) {
                    space.assign(self.control, 1)?;
                }
            }
        }
        Ok(())
    }
}

/// `control ⇔ (x < y)`
#[derive(Debug, Clone)]
pub struct ReifiedLess {
    x: Var,
    y: Var,
    control: Var,
}

impl ReifiedLess {
    /// Link `control` to `x < y`
    pub const fn new(x: Var, y: Var, control: Var) -> Self {
        Self { x, y, control }
    }
}

impl Propagator for ReifiedLess {
    fn name(&self) -> &'static str {
        "reified_less"
    }

    fn variables(&self) -> Vec<Var> {
        vec![self.x, self.y, self.control]
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        match space.value(self.control) {
            Some(1) => {
                space.set_max(self.x, space.max(self.y) - 1)?;
                space.set_min(self.y, space.min(self.x) + 1)?;
            }
            Some(_) => {
                space.set_min(self.x, space.min(self.y))?;
                space.set_max(self.y, space.max(self.x))?;
            }
            None => {
                if space.max(self.x) < space.min(self.y) {
                    space.assign(self.control, 1)?;
                } else if space.min(self.x) >= space.max(self.y) {
                    space.assign(self.control, 0)?;
                }
            }
        }
        Ok(())
    }
}

/// `control ⇔ (x < bound)`
#[derive(Debug, Clone)]
pub struct ReifiedLessConst {
    x: Var,
    bound: i32,
    control: Var,
}

impl ReifiedLessConst {
    /// Link `control` to `x < bound`
    pub const fn new(x: Var, bound: i32, control: Var) -> Self {
        Self { x, bound, control }
    }
}

impl Propagator for ReifiedLessConst {
    fn name(&self) -> &'static str {
        "reified_less_const"
    }

    fn variables(&self) -> Vec<Var> {
        vec![self.x, self.control]
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        match space.value(self.control) {
            Some(1) => {
                space.set_max(self.x, self.bound - 1)?;
            }
            Some(_) => {
                space.set_min(self.x, self.bound)?;
            }
            None => {
                if space.max(self.x) < self.bound {
                    space.assign(self.control, 1)?;
                } else if space.min(self.x) >= self.bound {
                    space.assign(self.control, 0)?;
                }
            }
        }
        Ok(())
    }
}
