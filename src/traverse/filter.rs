//! Predicate-based pruning.

use std::collections::BTreeMap;

use tracing::{instrument, trace};

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::shape::children::container_children;
use crate::shape::keys::check_sortable;
use crate::shape::rebuild::{Replacement, rebuild_container};
use crate::shape::{Shape, classify};
use crate::Result;

/// Outcome of filtering one position.
#[derive(Debug)]
enum Filtered {
    Kept(Value),
    /// Rejected field of a record: the record keeps its arity, the field
    /// becomes `Null`.
    Missing,
    Dropped,
}

impl Filtered {
    fn is_kept(&self) -> bool {
        matches!(self, Filtered::Kept(_))
    }

    fn into_field(self) -> Filtered {
        match self {
            Filtered::Dropped => Filtered::Missing,
            other => other,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Filtered::Kept(value) => value,
            Filtered::Missing | Filtered::Dropped => Value::Null,
        }
    }
}

/// Keep only the leaves for which `func` returns `true`.
///
/// Rejected leaves are removed from sequences, sets and mappings. Records
/// cannot shrink, so a rejected field becomes `Null`. Absent is always
/// rejected.
///
/// With `keep_structure`, containers left empty by filtering are kept (as an
/// empty container of the same type). Without it they are removed from their
/// parent too, recursively; a record is removed only when all its fields were
/// rejected. Total rejection at the root returns `Value::Null`.
///
/// ```rust
/// use nest_rs::{Value, filter, Scalar};
///
/// let s = Value::map([("a", Value::list([1, 2])), ("b", Value::list([3]))]);
/// let even = |v: &Value| v.as_int().is_some_and(|i| i % 2 == 0);
/// let kept = filter(even, &s, false, &Scalar).unwrap();
/// assert_eq!(kept, Value::map([("a", Value::list([2]))]));
/// ```
#[instrument(level = "trace", skip_all, fields(root = structure.type_name(), keep_structure = keep_structure))]
pub fn filter<F, P>(func: F, structure: &Value, keep_structure: bool, is_atomic: &P) -> Result<Value>
where
    F: FnMut(&Value) -> bool,
    P: Atomicity + ?Sized,
{
    Walker::new(is_atomic).filter(func, structure, keep_structure)
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn filter<F>(&self, mut func: F, structure: &Value, keep_structure: bool) -> Result<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        let filtered = self.filter_value(&mut func, structure, keep_structure, 0)?;
        if !filtered.is_kept() {
            trace!("every leaf rejected");
        }
        Ok(filtered.into_value())
    }

    fn filter_value<F>(&self, func: &mut F, value: &Value, keep_structure: bool, depth: usize) -> Result<Filtered>
    where
        F: FnMut(&Value) -> bool,
    {
        let shape = classify(value, self.is_atomic)?;
        if shape == Shape::Absent {
            return Ok(Filtered::Dropped);
        }
        if shape == Shape::Atomic {
            return Ok(if func(value) { Filtered::Kept(value.clone()) } else { Filtered::Dropped });
        }

        let depth = self.enter(depth)?;
        match value {
            Value::Record(record) => {
                let mut fields = Vec::with_capacity(record.len());
                for child in record.values() {
                    fields.push(self.filter_value(func, child, keep_structure, depth)?.into_field());
                }
                if !keep_structure && !fields.iter().any(Filtered::is_kept) {
                    return Ok(Filtered::Dropped);
                }
                let values: Vec<Value> = fields.into_iter().map(Filtered::into_value).collect();
                rebuild_container(value, values.into()).map(Filtered::Kept)
            }
            Value::Map(entries) => {
                check_sortable(entries)?;
                let mut kept = BTreeMap::new();
                for (key, child) in entries {
                    if let Filtered::Kept(v) = self.filter_value(func, child, keep_structure, depth)? {
                        kept.insert(key.clone(), v);
                    }
                }
                self.finish(value, Replacement::Keyed(kept), keep_structure)
            }
            _ => {
                let mut kept = Vec::new();
                for child in container_children(value)? {
                    if let Filtered::Kept(v) = self.filter_value(func, child, keep_structure, depth)? {
                        kept.push(v);
                    }
                }
                self.finish(value, Replacement::Positional(kept), keep_structure)
            }
        }
    }

    fn finish(&self, original: &Value, kept: Replacement, keep_structure: bool) -> Result<Filtered> {
        if kept.is_empty() && !keep_structure {
            return Ok(Filtered::Dropped);
        }
        rebuild_container(original, kept).map(Filtered::Kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::Scalar;

    fn even(v: &Value) -> bool {
        v.as_int().is_some_and(|i| i % 2 == 0)
    }

    #[test]
    fn test_none() {
        assert_eq!(filter(|_: &Value| true, &Value::Null, true, &Scalar).unwrap(), Value::Null);
    }

    #[test]
    fn test_single_element() {
        let s = Value::from("string");
        assert_eq!(filter(|v: &Value| v != &Value::from("string"), &s, true, &Scalar).unwrap(), Value::Null);
        assert_eq!(filter(|v: &Value| v == &Value::from("string"), &s, true, &Scalar).unwrap(), s);
    }

    #[test]
    fn test_no_true_elements_keeps_empty_list() {
        let s = Value::list([1, 2, 3]);
        let f = filter(|v: &Value| v.as_int().is_some_and(|i| i > 4), &s, true, &Scalar).unwrap();
        assert_eq!(f, Value::list(Vec::<Value>::new()));
    }

    #[test]
    fn test_no_true_elements_without_structure_is_null() {
        let s = Value::list([1, 3]);
        assert_eq!(filter(even, &s, false, &Scalar).unwrap(), Value::Null);
    }

    #[test]
    fn test_keep_structure_keeps_empty_mapping_entries() {
        let s = Value::map([("a", Value::list([1])), ("b", Value::list([2]))]);
        let f = filter(even, &s, true, &Scalar).unwrap();
        assert_eq!(
            f,
            Value::map([("a", Value::list(Vec::<Value>::new())), ("b", Value::list([2]))])
        );
    }

    #[test]
    fn test_nulls_in_sequences_are_dropped() {
        let s = Value::list([Value::Int(2), Value::Null]);
        assert_eq!(filter(|_: &Value| true, &s, true, &Scalar).unwrap(), Value::list([2]));
    }
}
