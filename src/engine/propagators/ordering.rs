//! Ordering constraints used for symmetry breaking

use crate::engine::domain::{Inconsistency, PropResult};
use crate::engine::space::{Propagator, Space, Var};

/// `left ≥lex right` over two equally long sequences
///
/// The sequences may share variables, as happens when a board is compared
/// with one of its own rotations.
#[derive(Debug, Clone)]
pub struct LexGeq {
    left: Vec<Var>,
    right: Vec<Var>,
}

impl LexGeq {
    /// Require `left` to be lexicographically at least `right`
    ///
    /// # Panics
    ///
    /// Panics if the sequences differ in length.
    pub fn new(left: &[Var], right: &[Var]) -> Self {
        assert_eq!(left.len(), right.len(), "lex sequences must align");
        Self {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}

impl Propagator for LexGeq {
    fn name(&self) -> &'static str {
        "lex_geq"
    }

    fn variables(&self) -> Vec<Var> {
        let mut variables = self.left.clone();
        variables.extend_from_slice(&self.right);
        variables
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        for (&x, &y) in self.left.iter().zip(&self.right) {
            if x == y {
                continue;
            }
            if let (Some(a), Some(b)) = (space.value(x), space.value(y))
                && a == b
            {
                continue;
            }
            if space.min(x) > space.max(y) {
                return Ok(());
            }
            if space.max(x) < space.min(y) {
                return Err(Inconsistency);
            }
            // the prefix is fixed and equal, so this position may not decrease
            space.set_min(x, space.min(y))?;
            space.set_max(y, space.max(x))?;
            return Ok(());
        }
        Ok(())
    }
}

/// Value precedence: `later` may only occur after an occurrence of `earlier`
#[derive(Debug, Clone)]
pub struct Precede {
    array: Vec<Var>,
    earlier: i32,
    later: i32,
}

impl Precede {
    /// `later` never appears in `array` before the first `earlier`
    pub fn new(array: &[Var], earlier: i32, later: i32) -> Self {
        Self {
            array: array.to_vec(),
            earlier,
            later,
        }
    }
}

impl Propagator for Precede {
    fn name(&self) -> &'static str {
        "precede"
    }

    fn variables(&self) -> Vec<Var> {
        self.array.clone()
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        for &x in &self.array {
            let could_be_earlier = space.contains(x, self.earlier);
            space.remove(x, self.later)?;
            if could_be_earlier {
                break;
            }
        }
        Ok(())
    }
}
