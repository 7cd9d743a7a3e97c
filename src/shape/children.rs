//! Child enumeration in canonical order.

use smallvec::{SmallVec, smallvec};

use super::keys::check_sortable;
use super::malformed;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::Result;

/// Immediate children of a structure, borrowed from it.
pub type ChildList<'a> = SmallVec<[&'a Value; 8]>;

/// Immediate children of `value`.
///
/// An atomic value yields itself, so callers get a uniform
/// "atomic or container" view. Absent yields nothing.
pub fn children<'a, P: Atomicity + ?Sized>(value: &'a Value, is_atomic: &P) -> Result<ChildList<'a>> {
    if value.is_null() {
        return Ok(ChildList::new());
    }
    if is_atomic.is_atomic(value) {
        return Ok(smallvec![value]);
    }
    container_children(value)
}

/// Children of a value already known not to be atomic.
pub(crate) fn container_children(value: &Value) -> Result<ChildList<'_>> {
    let children = match value {
        Value::Null => ChildList::new(),
        Value::List(items) | Value::Tuple(items) => items.iter().collect(),
        Value::Set(items) => items.iter().collect(),
        Value::Map(entries) => {
            check_sortable(entries)?;
            entries.values().collect()
        }
        Value::Record(record) => record.values().iter().collect(),
        other => return Err(malformed(other)),
    };
    Ok(children)
}
