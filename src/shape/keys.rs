//! Mapping key ordering.
//!
//! A mapping is traversed in ascending key order, which requires its keys to
//! be mutually comparable: every key must belong to the same key class, and
//! tuple keys must agree on the class at the first position where they differ.

use std::collections::BTreeMap;

use crate::model::Value;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Bool,
    Number,
    Text,
    Bytes,
    Tuple,
}

fn key_class(key: &Value) -> Option<KeyClass> {
    match key {
        Value::Bool(_) => Some(KeyClass::Bool),
        Value::Int(_) | Value::Float(_) => Some(KeyClass::Number),
        Value::String(_) => Some(KeyClass::Text),
        Value::Bytes(_) => Some(KeyClass::Bytes),
        Value::Tuple(_) => Some(KeyClass::Tuple),
        _ => None,
    }
}

/// Whether `a` and `b` can be ordered against each other.
///
/// Scalars must share a key class. Tuples compare lexicographically, so only
/// the first position where they differ has to be comparable; a tuple that is
/// a prefix of the other always is.
fn comparable(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Tuple(x), Value::Tuple(y)) => x
            .iter()
            .zip(y)
            .find(|(p, q)| p != q)
            .is_none_or(|(p, q)| comparable(p, q)),
        _ => matches!((key_class(a), key_class(b)), (Some(x), Some(y)) if x == y),
    }
}

/// Fails with `UnsortableKeys` unless all keys are mutually comparable.
///
/// Maps with fewer than two keys are always sortable. Checking neighbours in
/// the map's own order is enough: two incomparable keys always have an
/// incomparable pair of neighbours between them.
pub(crate) fn check_sortable(entries: &BTreeMap<Value, Value>) -> Result<()> {
    let mut keys = entries.keys();
    let Some(mut prev) = keys.next() else {
        return Ok(());
    };
    for key in keys {
        if !comparable(prev, key) {
            return Err(Error::UnsortableKeys {
                keys: render_keys(entries),
            });
        }
        prev = key;
    }
    Ok(())
}

/// Keys of a mapping in ascending order.
///
/// Within one key class the map's own order is the natural ascending order.
pub fn sorted_keys(entries: &BTreeMap<Value, Value>) -> Result<Vec<&Value>> {
    check_sortable(entries)?;
    Ok(entries.keys().collect())
}

fn render_keys(entries: &BTreeMap<Value, Value>) -> String {
    let keys: Vec<String> = entries.keys().map(ToString::to_string).collect();
    format!("[{}]", keys.join(", "))
}
