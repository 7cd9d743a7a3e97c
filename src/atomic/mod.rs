//! # Atomicity Predicates
//!
//! An atomicity predicate decides, at every position of a structure, whether
//! the traversal stops there (a leaf) or recurses into it.
//!
//! | Predicate | Atomic when |
//! |-----------|-------------|
//! | [`Scalar`] (default) | not a container, or a string |
//! | [`MaxDepth`] | the inner predicate says so, or nesting depth ≤ `depth` |
//! | any `Fn(&Value) -> bool` | the closure returns `true` |
//!
//! Predicates must be pure: the same value always gets the same answer.

use crate::model::Value;
use crate::shape;

/// Decides whether a value is a leaf.
pub trait Atomicity {
    fn is_atomic(&self, value: &Value) -> bool;
}

impl<F> Atomicity for F
where
    F: Fn(&Value) -> bool,
{
    fn is_atomic(&self, value: &Value) -> bool {
        self(value)
    }
}

/// The default predicate: strings and non-containers are atomic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scalar;

impl Atomicity for Scalar {
    fn is_atomic(&self, value: &Value) -> bool {
        is_atomic_default(value)
    }
}

/// A value is atomic iff it is a text string, or it is not a sequence, set,
/// mapping or record. `Null` is atomic.
pub fn is_atomic_default(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        other => !other.is_container(),
    }
}

/// Treats every substructure of nesting depth ≤ `depth` as atomic.
///
/// Depth is measured under the inner predicate: an atomic value has depth 0,
/// a container has depth `1 + max(child depths)`, and an empty container has
/// depth 1. So `[1, 2]` has depth 1 and `[1, {"a": 3}]` has depth 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxDepth<P = Scalar> {
    depth: usize,
    inner: P,
}

/// Wrap `is_atomic` so that shallow substructures become leaves.
///
/// ```rust
/// use nest_rs::{Value, flatten, has_max_depth, Scalar};
///
/// let s = Value::list([Value::list([1, 2]), Value::list([Value::from(3), Value::list([4, 5])])]);
/// let flat = flatten(&s, &has_max_depth(1, Scalar)).unwrap();
/// assert_eq!(flat, vec![Value::list([1, 2]), Value::Int(3), Value::list([4, 5])]);
/// ```
pub fn has_max_depth<P: Atomicity>(depth: usize, is_atomic: P) -> MaxDepth<P> {
    MaxDepth {
        depth,
        inner: is_atomic,
    }
}

impl<P: Atomicity> MaxDepth<P> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Whether `value` nests no deeper than `budget`.
    ///
    /// Walks with an explicit stack, so the budget may be arbitrarily large.
    /// Stops at the first substructure that exhausts its budget. A container
    /// that cannot be enumerated is not within budget, so the traversal
    /// reports its error.
    fn within(&self, value: &Value, budget: usize) -> bool {
        let mut pending = vec![(value, budget)];
        while let Some((value, budget)) = pending.pop() {
            if self.inner.is_atomic(value) {
                continue;
            }
            if budget == 0 {
                return false;
            }
            match shape::children::container_children(value) {
                Ok(children) => pending.extend(children.into_iter().map(|child| (child, budget - 1))),
                Err(_) => return false,
            }
        }
        true
    }
}

impl<P: Atomicity> Atomicity for MaxDepth<P> {
    fn is_atomic(&self, value: &Value) -> bool {
        self.within(value, self.depth)
    }
}
