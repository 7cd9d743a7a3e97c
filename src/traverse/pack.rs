//! Repacking a flat list of leaves into a structure's shape.

use tracing::{instrument, trace};

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::shape::children::container_children;
use crate::shape::rebuild::rebuild_container;
use crate::shape::{Shape, classify};
use crate::{Error, Result};

/// Inverse of [`flatten`](super::flatten): fill the leaf positions of
/// `structure`, in flatten order, with successive elements of `flat`.
///
/// Absent positions consume nothing and stay Null. Fails with
/// `ArityMismatch` before building anything if `flat` is shorter than the
/// number of leaves; surplus elements are ignored.
///
/// Leaves packed into a set are re-sorted (and deduplicated) by the set, so
/// packing into sets only round-trips lists that came from `flatten`.
///
/// ```rust
/// use nest_rs::{Value, pack, Scalar};
///
/// let s = Value::map([("a", Value::from(1)), ("b", Value::list([2, 3]))]);
/// let packed = pack(&s, [10, 20, 30].map(Value::from), &Scalar).unwrap();
/// assert_eq!(packed, Value::map([("a", Value::from(10)), ("b", Value::list([20, 30]))]));
/// ```
#[instrument(level = "trace", skip_all, fields(root = structure.type_name()))]
pub fn pack<I, P>(structure: &Value, flat: I, is_atomic: &P) -> Result<Value>
where
    I: IntoIterator<Item = Value>,
    P: Atomicity + ?Sized,
{
    Walker::new(is_atomic).pack(structure, flat)
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn pack<I>(&self, structure: &Value, flat: I) -> Result<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        let expected = self.leaves(structure)?.len();
        let flat: Vec<Value> = flat.into_iter().take(expected).collect();
        if flat.len() < expected {
            return Err(Error::ArityMismatch {
                expected,
                got: flat.len(),
            });
        }
        trace!(leaves = expected, "packing");
        let mut flat = flat.into_iter();
        self.pack_value(structure, &mut flat, expected, 0)
    }

    fn pack_value(
        &self,
        value: &Value,
        flat: &mut std::vec::IntoIter<Value>,
        expected: usize,
        depth: usize,
    ) -> Result<Value> {
        match classify(value, self.is_atomic)? {
            Shape::Absent => Ok(Value::Null),
            Shape::Atomic => flat.next().ok_or(Error::ArityMismatch {
                expected,
                got: expected - flat.len(),
            }),
            _ => {
                let depth = self.enter(depth)?;
                let packed = container_children(value)?
                    .into_iter()
                    .map(|child| self.pack_value(child, flat, expected, depth))
                    .collect::<Result<Vec<_>>>()?;
                rebuild_container(value, packed.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::Scalar;

    #[test]
    fn test_none() {
        assert_eq!(pack(&Value::Null, Vec::new(), &Scalar).unwrap(), Value::Null);
    }

    #[test]
    fn test_single_element() {
        let packed = pack(&Value::from("string"), vec![Value::from("expected")], &Scalar).unwrap();
        assert_eq!(packed, Value::from("expected"));
    }

    #[test]
    fn test_too_few_elements() {
        let s = Value::list([1, 2, 3]);
        let err = pack(&s, vec![Value::Int(1)], &Scalar).unwrap_err();
        assert_eq!(err, Error::ArityMismatch { expected: 3, got: 1 });
    }

    #[test]
    fn test_surplus_ignored() {
        let s = Value::tuple([1, 2]);
        let packed = pack(&s, (10..20).map(Value::Int), &Scalar).unwrap();
        assert_eq!(packed, Value::tuple([10, 11]));
    }

    #[test]
    fn test_null_positions_consume_nothing() {
        let s = Value::list([Value::Int(1), Value::Null, Value::Int(2)]);
        let packed = pack(&s, vec![Value::from("a"), Value::from("b")], &Scalar).unwrap();
        assert_eq!(packed, Value::list([Value::from("a"), Value::Null, Value::from("b")]));
    }
}
