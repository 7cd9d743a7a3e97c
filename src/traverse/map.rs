//! Structure-preserving transformation of leaves.

use tracing::instrument;

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::shape::children::container_children;
use crate::shape::rebuild::rebuild_container;
use crate::shape::{Shape, classify};
use crate::Result;

/// Apply `func` to every atomic element, keeping the shape of `structure`.
///
/// Absent stays Absent. `func` only ever sees leaves and is not told where
/// they are.
///
/// ```rust
/// use nest_rs::{Value, map, Scalar};
///
/// let s = Value::map([("a", Value::list([1, 2])), ("b", Value::tuple([3, 4]))]);
/// let doubled = map(|v: &Value| Value::Int(v.as_int().unwrap_or(0) * 2), &s, &Scalar).unwrap();
/// assert_eq!(doubled, Value::map([("a", Value::list([2, 4])), ("b", Value::tuple([6, 8]))]));
/// ```
#[instrument(level = "trace", skip_all, fields(root = structure.type_name()))]
pub fn map<F, P>(func: F, structure: &Value, is_atomic: &P) -> Result<Value>
where
    F: FnMut(&Value) -> Value,
    P: Atomicity + ?Sized,
{
    Walker::new(is_atomic).map(func, structure)
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn map<F>(&self, mut func: F, structure: &Value) -> Result<Value>
    where
        F: FnMut(&Value) -> Value,
    {
        self.map_value(&mut func, structure, 0)
    }

    fn map_value<F>(&self, func: &mut F, value: &Value, depth: usize) -> Result<Value>
    where
        F: FnMut(&Value) -> Value,
    {
        match classify(value, self.is_atomic)? {
            Shape::Absent => Ok(Value::Null),
            Shape::Atomic => Ok(func(value)),
            _ => {
                let depth = self.enter(depth)?;
                let mapped = container_children(value)?
                    .into_iter()
                    .map(|child| self.map_value(func, child, depth))
                    .collect::<Result<Vec<_>>>()?;
                rebuild_container(value, mapped.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::Scalar;

    fn double(v: &Value) -> Value {
        Value::Int(v.as_int().unwrap_or_default() * 2)
    }

    #[test]
    fn test_none() {
        assert_eq!(map(double, &Value::Null, &Scalar).unwrap(), Value::Null);
    }

    #[test]
    fn test_single_element() {
        assert_eq!(map(double, &Value::Int(4), &Scalar).unwrap(), Value::Int(8));
    }

    #[test]
    fn test_set_is_rebuilt() {
        let s = Value::list([Value::from(3), Value::set([5, 6])]);
        let m = map(double, &s, &Scalar).unwrap();
        assert_eq!(m, Value::list([Value::from(6), Value::set([10, 12])]));
    }

    #[test]
    fn test_nested_nulls_preserved() {
        let s = Value::tuple([Value::Null, Value::Int(1)]);
        assert_eq!(map(double, &s, &Scalar).unwrap(), Value::tuple([Value::Null, Value::Int(2)]));
    }

    #[test]
    fn test_input_not_mutated() {
        let s = Value::list([1, 2]);
        let before = s.clone();
        let _ = map(double, &s, &Scalar).unwrap();
        assert_eq!(s, before);
    }

    #[test]
    fn test_stateful_closure_sees_leaves_in_flatten_order() {
        let s = Value::map([("b", Value::list([3, 4])), ("a", Value::from(1))]);
        let mut seen = Vec::new();
        map(
            |v: &Value| {
                seen.push(v.clone());
                v.clone()
            },
            &s,
            &Scalar,
        )
        .unwrap();
        assert_eq!(seen, vec![Value::Int(1), Value::Int(3), Value::Int(4)]);
    }
}
