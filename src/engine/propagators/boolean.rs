//! Boolean connectives and one-hot channeling

use crate::engine::domain::PropResult;
use crate::engine::space::{Propagator, Space, Var};

/// `result ⇔ ∧ operands`
#[derive(Debug, Clone)]
pub struct BoolAnd {
    operands: Vec<Var>,
    result: Var,
}

impl BoolAnd {
    /// Conjunction of `operands` reified on `result`
    pub fn new(operands: &[Var], result: Var) -> Self {
        Self {
            operands: operands.to_vec(),
            result,
        }
    }
}

impl Propagator for BoolAnd {
    fn name(&self) -> &'static str {
        "bool_and"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.operands.clone();
        variables.push(self.result);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        if space.value(self.result) == Some(1) {
            for &x in &self.operands {
                space.assign(x, 1)?;
            }
            return Ok(());
        }
        if self.operands.iter().any(|&x| space.value(x) == Some(0)) {
            space.assign(self.result, 0)?;
            return Ok(());
        }
        let open: Vec<Var> = self
            .operands
            .iter()
            .copied()
            .filter(|&x| !space.is_assigned(x))
            .collect();
        match (open.as_slice(), space.value(self.result)) {
            ([], _) => {
                space.assign(self.result, 1)?;
            }
            ([last], Some(0)) => {
                space.assign(*last, 0)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// `result ⇔ ∨ operands`
#[derive(Debug, Clone)]
pub struct BoolOr {
    operands: Vec<Var>,
    result: Var,
}

impl BoolOr {
    /// Disjunction of `operands` reified on `result`
    pub fn new(operands: &[Var], result: Var) -> Self {
        Self {
            operands: operands.to_vec(),
            result,
        }
    }
}

impl Propagator for BoolOr {
    fn name(&self) -> &'static str {
        "bool_or"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.operands.clone();
        variables.push(self.result);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        if space.value(self.result) == Some(0) {
            for &x in &self.operands {
                space.assign(x, 0)?;
            }
            return Ok(());
        }
        if self.operands.iter().any(|&x| space.value(x) == Some(1)) {
            space.assign(self.result, 1)?;
            return Ok(());
        }
        let open: Vec<Var> = self
            .operands
            .iter()
            .copied()
            .filter(|&x| !space.is_assigned(x))
            .collect();
        match (open.as_slice(), space.value(self.result)) {
            ([], _) => {
                space.assign(self.result, 0)?;
            }
            ([last], Some(1)) => {
                space.assign(*last, 1)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// `flags[i] ⇔ (x = i)`, with exactly one flag set
#[derive(Debug, Clone)]
pub struct BoolChannel {
    flags: Vec<Var>,
    x: Var,
}

impl BoolChannel {
    /// Channel the one-hot `flags` to the integer `x`
    pub fn new(flags: &[Var], x: Var) -> Self {
        Self {
            flags: flags.to_vec(),
            x,
        }
    }
}

impl Propagator for BoolChannel {
    fn name(&self) -> &'static str {
        "bool_channel"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.flags.clone();
        variables.push(self.x);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        let count = self.flags.len() as i32;
        space.set_min(self.x, 0)?;
        space.set_max(self.x, count - 1)?;
        for (i, &flag) in self.flags.iter().enumerate() {
            let i = i as i32;
            match space.value(flag) {
                Some(1) => {
                    space.assign(self.x, i)?;
                }
                Some(_) => {
                    space.remove(self.x, i)?;
                }
                None => {}
            }
        }
        for (i, &flag) in self.flags.iter().enumerate() {
            let i = i as i32;
            if !space.contains(self.x, i) {
                space.assign(flag, 0)?;
            } else if space.is_assigned(self.x) {
                space.assign(flag, 1)?;
            }
        }
        Ok(())
    }
}
