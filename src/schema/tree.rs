//! Candidate program trees and their evaluation.
//!
//! A [`ProgramTree`] is the unit being scored: a small syntax tree over a
//! boolean domain (truth-table targets) or a continuous domain (sampled
//! numeric targets). Trees are read-only for scoring purposes and carry
//! structural equality, hashing, and ordering so that a fully reduced
//! (canonical) tree can key the memo cache. Floating point constants are
//! compared and hashed by bit pattern: cache-key soundness requires
//! canonical forms to be bit-identical, not merely numerically close.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A candidate program as an immutable syntax tree.
///
/// Boolean nodes (`True`, `False`, `Not`, `And`, `Or`) evaluate under
/// [`eval_bool`](Self::eval_bool); numeric nodes (`Const`, `Add`, `Mul`,
/// `Neg`, `Sin`, `Exp`, `Log`) under [`eval_contin`](Self::eval_contin).
/// `Var` is shared by both domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgramTree {
    True,
    False,
    /// Input variable, indexed into the evaluation row.
    Var(usize),
    Not(Box<ProgramTree>),
    And(Vec<ProgramTree>),
    Or(Vec<ProgramTree>),
    Const(f64),
    Add(Vec<ProgramTree>),
    Mul(Vec<ProgramTree>),
    Neg(Box<ProgramTree>),
    Sin(Box<ProgramTree>),
    Exp(Box<ProgramTree>),
    Log(Box<ProgramTree>),
}

/// Errors raised while evaluating a candidate tree on an input row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("variable ${0} is not bound by the input row")]
    UnboundVariable(usize),
    #[error("operator evaluated outside its domain (boolean vs continuous)")]
    DomainMismatch,
    #[error("evaluation produced a non-finite value")]
    NonFinite,
}

impl ProgramTree {
    /// Evaluate in the boolean domain against one input row.
    pub fn eval_bool(&self, inputs: &[bool]) -> Result<bool, EvalError> {
        match self {
            ProgramTree::True => Ok(true),
            ProgramTree::False => Ok(false),
            ProgramTree::Var(i) => inputs
                .get(*i)
                .copied()
                .ok_or(EvalError::UnboundVariable(*i)),
            ProgramTree::Not(t) => Ok(!t.eval_bool(inputs)?),
            ProgramTree::And(ts) => {
                for t in ts {
                    if !t.eval_bool(inputs)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ProgramTree::Or(ts) => {
                for t in ts {
                    if t.eval_bool(inputs)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            _ => Err(EvalError::DomainMismatch),
        }
    }

    /// Evaluate in the continuous domain against one input row.
    ///
    /// A non-finite result (overflow, log of a non-positive value) is
    /// reported as an error rather than leaking NaN into scores.
    pub fn eval_contin(&self, inputs: &[f64]) -> Result<f64, EvalError> {
        let v = self.eval_contin_node(inputs)?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    fn eval_contin_node(&self, inputs: &[f64]) -> Result<f64, EvalError> {
        match self {
            ProgramTree::Var(i) => inputs
                .get(*i)
                .copied()
                .ok_or(EvalError::UnboundVariable(*i)),
            ProgramTree::Const(c) => Ok(*c),
            ProgramTree::Add(ts) => {
                let mut acc = 0.0;
                for t in ts {
                    acc += t.eval_contin_node(inputs)?;
                }
                Ok(acc)
            }
            ProgramTree::Mul(ts) => {
                let mut acc = 1.0;
                for t in ts {
                    acc *= t.eval_contin_node(inputs)?;
                }
                Ok(acc)
            }
            ProgramTree::Neg(t) => Ok(-t.eval_contin_node(inputs)?),
            ProgramTree::Sin(t) => Ok(t.eval_contin_node(inputs)?.sin()),
            ProgramTree::Exp(t) => Ok(t.eval_contin_node(inputs)?.exp()),
            ProgramTree::Log(t) => Ok(t.eval_contin_node(inputs)?.ln()),
            _ => Err(EvalError::DomainMismatch),
        }
    }

    /// Structural complexity: total node count, the parsimony term.
    pub fn complexity(&self) -> i64 {
        let mut count = 0i64;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                ProgramTree::Not(t)
                | ProgramTree::Neg(t)
                | ProgramTree::Sin(t)
                | ProgramTree::Exp(t)
                | ProgramTree::Log(t) => stack.push(t),
                ProgramTree::And(ts)
                | ProgramTree::Or(ts)
                | ProgramTree::Add(ts)
                | ProgramTree::Mul(ts) => stack.extend(ts.iter()),
                _ => {}
            }
        }
        count
    }

    /// Minimum input-row width this tree requires (1 + highest variable index).
    pub fn arity(&self) -> usize {
        let mut arity = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ProgramTree::Var(i) => arity = arity.max(i + 1),
                ProgramTree::Not(t)
                | ProgramTree::Neg(t)
                | ProgramTree::Sin(t)
                | ProgramTree::Exp(t)
                | ProgramTree::Log(t) => stack.push(t),
                ProgramTree::And(ts)
                | ProgramTree::Or(ts)
                | ProgramTree::Add(ts)
                | ProgramTree::Mul(ts) => stack.extend(ts.iter()),
                _ => {}
            }
        }
        arity
    }

    fn rank(&self) -> u8 {
        match self {
            ProgramTree::True => 0,
            ProgramTree::False => 1,
            ProgramTree::Var(_) => 2,
            ProgramTree::Not(_) => 3,
            ProgramTree::And(_) => 4,
            ProgramTree::Or(_) => 5,
            ProgramTree::Const(_) => 6,
            ProgramTree::Add(_) => 7,
            ProgramTree::Mul(_) => 8,
            ProgramTree::Neg(_) => 9,
            ProgramTree::Sin(_) => 10,
            ProgramTree::Exp(_) => 11,
            ProgramTree::Log(_) => 12,
        }
    }
}

impl Ord for ProgramTree {
    fn cmp(&self, other: &Self) -> Ordering {
        use ProgramTree::*;
        match (self, other) {
            (Var(a), Var(b)) => a.cmp(b),
            // Bit-level total order; keeps Ord consistent with Hash.
            (Const(a), Const(b)) => a.total_cmp(b),
            (Not(a), Not(b))
            | (Neg(a), Neg(b))
            | (Sin(a), Sin(b))
            | (Exp(a), Exp(b))
            | (Log(a), Log(b)) => a.cmp(b),
            (And(a), And(b)) | (Or(a), Or(b)) | (Add(a), Add(b)) | (Mul(a), Mul(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for ProgramTree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ProgramTree {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ProgramTree {}

impl Hash for ProgramTree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            ProgramTree::True | ProgramTree::False => {}
            ProgramTree::Var(i) => i.hash(state),
            ProgramTree::Const(c) => c.to_bits().hash(state),
            ProgramTree::Not(t)
            | ProgramTree::Neg(t)
            | ProgramTree::Sin(t)
            | ProgramTree::Exp(t)
            | ProgramTree::Log(t) => t.hash(state),
            ProgramTree::And(ts)
            | ProgramTree::Or(ts)
            | ProgramTree::Add(ts)
            | ProgramTree::Mul(ts) => ts.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(tree: &ProgramTree) -> u64 {
        let mut hasher = DefaultHasher::new();
        tree.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_eval_bool() {
        let tree = ProgramTree::And(vec![
            ProgramTree::Var(0),
            ProgramTree::Not(Box::new(ProgramTree::Var(1))),
        ]);
        assert_eq!(tree.eval_bool(&[true, false]), Ok(true));
        assert_eq!(tree.eval_bool(&[true, true]), Ok(false));
        assert_eq!(tree.eval_bool(&[false, false]), Ok(false));
    }

    #[test]
    fn test_eval_bool_unbound_variable() {
        let tree = ProgramTree::Var(3);
        assert_eq!(
            tree.eval_bool(&[true]),
            Err(EvalError::UnboundVariable(3))
        );
    }

    #[test]
    fn test_eval_contin() {
        // x * x + 1
        let tree = ProgramTree::Add(vec![
            ProgramTree::Mul(vec![ProgramTree::Var(0), ProgramTree::Var(0)]),
            ProgramTree::Const(1.0),
        ]);
        assert_eq!(tree.eval_contin(&[3.0]), Ok(10.0));
    }

    #[test]
    fn test_eval_contin_non_finite() {
        let tree = ProgramTree::Log(Box::new(ProgramTree::Const(0.0)));
        assert_eq!(tree.eval_contin(&[]), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_domain_mismatch() {
        let tree = ProgramTree::And(vec![ProgramTree::Const(1.0)]);
        assert!(tree.eval_bool(&[]).is_err());
        assert_eq!(
            ProgramTree::True.eval_contin(&[]),
            Err(EvalError::DomainMismatch)
        );
    }

    #[test]
    fn test_complexity_counts_nodes() {
        let tree = ProgramTree::Or(vec![
            ProgramTree::Var(0),
            ProgramTree::Not(Box::new(ProgramTree::Var(1))),
        ]);
        assert_eq!(tree.complexity(), 4);
        assert_eq!(ProgramTree::True.complexity(), 1);
    }

    #[test]
    fn test_arity() {
        let tree = ProgramTree::Add(vec![ProgramTree::Var(4), ProgramTree::Var(1)]);
        assert_eq!(tree.arity(), 5);
        assert_eq!(ProgramTree::Const(2.0).arity(), 0);
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = ProgramTree::Mul(vec![ProgramTree::Var(0), ProgramTree::Const(2.0)]);
        let b = ProgramTree::Mul(vec![ProgramTree::Var(0), ProgramTree::Const(2.0)]);
        let c = ProgramTree::Mul(vec![ProgramTree::Const(2.0), ProgramTree::Var(0)]);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_const_bit_equality() {
        // -0.0 and 0.0 are distinct canonical forms
        let neg_zero = ProgramTree::Const(-0.0);
        let pos_zero = ProgramTree::Const(0.0);
        assert_ne!(neg_zero, pos_zero);
        assert_ne!(hash_of(&neg_zero), hash_of(&pos_zero));
    }

    #[test]
    fn test_ordering_is_total() {
        let mut trees = vec![
            ProgramTree::Const(2.0),
            ProgramTree::Var(1),
            ProgramTree::True,
            ProgramTree::Not(Box::new(ProgramTree::False)),
        ];
        trees.sort();
        assert_eq!(trees[0], ProgramTree::True);
    }
}
