//! Structural accumulation.

use tracing::instrument;

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::Result;

/// Left-fold `func` over the leaves of `structure`.
///
/// Returns `Value::Null` when there are no leaves, and the single leaf
/// unchanged (without calling `func`) when there is exactly one.
///
/// ```rust
/// use nest_rs::{Value, reduce, Scalar};
///
/// let s = Value::map([("a", Value::list([1, 2])), ("b", Value::tuple([3, 4]))]);
/// let sum = reduce(|a, b| Value::Int(a.as_int().unwrap_or(0) + b.as_int().unwrap_or(0)), &s, &Scalar).unwrap();
/// assert_eq!(sum, Value::Int(10));
/// ```
#[instrument(level = "trace", skip_all, fields(root = structure.type_name()))]
pub fn reduce<F, P>(func: F, structure: &Value, is_atomic: &P) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
    P: Atomicity + ?Sized,
{
    Walker::new(is_atomic).reduce(func, structure)
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn reduce<F>(&self, mut func: F, structure: &Value) -> Result<Value>
    where
        F: FnMut(Value, Value) -> Value,
    {
        let mut leaves = self.leaves(structure)?.into_iter().cloned();
        let Some(first) = leaves.next() else {
            return Ok(Value::Null);
        };
        Ok(leaves.fold(first, |acc, leaf| func(acc, leaf)))
    }
}
