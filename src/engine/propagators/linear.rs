//! Bounds propagation for weighted sums

use crate::engine::domain::{Inconsistency, PropResult};
use crate::engine::space::{Propagator, Space, Var};

/// Relation between a weighted sum and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `Σ a·x = rhs`
    Eq,
    /// `Σ a·x ≤ rhs`
    Le,
    /// `Σ a·x ≥ rhs`
    Ge,
}

/// `Σ coefficient·variable <relation> rhs`, filtered on bounds
#[derive(Debug, Clone)]
pub struct Linear {
    terms: Vec<(i64, Var)>,
    relation: Relation,
    rhs: i64,
}

impl Linear {
    /// Build a linear constraint, dropping zero coefficients
    pub fn new(terms: &[(i64, Var)], relation: Relation, rhs: i64) -> Self {
        Self {
            terms: terms.iter().copied().filter(|&(a, _)| a != 0).collect(),
            relation,
            rhs,
        }
    }

    /// `Σ variables = rhs`
    pub fn sum_eq(variables: &[Var], rhs: i64) -> Self {
        let terms: Vec<(i64, Var)> = variables.iter().map(|&x| (1, x)).collect();
        Self::new(&terms, Relation::Eq, rhs)
    }

    /// `left ≤ right`
    pub fn less_equal(left: Var, right: Var) -> Self {
        Self::new(&[(1, left), (-1, right)], Relation::Le, 0)
    }

    /// `premise ⇒ conclusion` over booleans
    pub fn implies(premise: Var, conclusion: Var) -> Self {
        Self::less_equal(premise, conclusion)
    }
}

const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) { q - 1 } else { q }
}

const fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) == (b < 0)) { q + 1 } else { q }
}

fn clamp(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn term_min(space: &Space, a: i64, x: Var) -> i64 {
    if a > 0 {
        a * i64::from(space.min(x))
    } else {
        a * i64::from(space.max(x))
    }
}

// Σ sign·a·x ≤ sign·rhs; one pass reaches the fixpoint of this direction
fn propagate_le(terms: &[(i64, Var)], sign: i64, rhs: i64, space: &mut Space) -> PropResult<bool> {
    let rhs = sign * rhs;
    let total: i64 = terms.iter().map(|&(a, x)| term_min(space, sign * a, x)).sum();
    if total > rhs {
        return Err(Inconsistency);
    }
    let mut changed = false;
    for &(a, x) in terms {
        let a = sign * a;
        let slack = rhs - (total - term_min(space, a, x));
        changed |= if a > 0 {
            space.set_max(x, clamp(floor_div(slack, a)))?
        } else {
            space.set_min(x, clamp(ceil_div(slack, a)))?
        };
    }
    Ok(changed)
}

impl Propagator for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn variables(&self) -> Vec<Var> {
        self.terms.iter().map(|&(_, x)| x).collect()
    }

    fn propagate(&self, space: &mut Space) -> PropResult {
        match self.relation {
            Relation::Le => propagate_le(&self.terms, 1, self.rhs, space).map(|_| ()),
            Relation::Ge => propagate_le(&self.terms, -1, self.rhs, space).map(|_| ()),
            Relation::Eq => loop {
                let upper = propagate_le(&self.terms, 1, self.rhs, space)?;
                let lower = propagate_le(&self.terms, -1, self.rhs, space)?;
                if !upper && !lower {
                    return Ok(());
                }
            },
        }
    }
}
