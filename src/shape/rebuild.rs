//! Shape reconstruction: same container type, new children.

use std::collections::BTreeMap;

use super::keys::sorted_keys;
use super::malformed;
use crate::atomic::Atomicity;
use crate::model::{Record, Value};
use crate::{Error, Result};

/// New children for [`rebuild`].
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Children in the original's enumeration order.
    Positional(Vec<Value>),
    /// Children with their own keys. Rebuilding a mapping from this rekeys it.
    Keyed(BTreeMap<Value, Value>),
}

impl Replacement {
    pub fn len(&self) -> usize {
        match self {
            Replacement::Positional(values) => values.len(),
            Replacement::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in order; a keyed replacement yields its values in key order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Replacement::Positional(values) => values,
            Replacement::Keyed(entries) => entries.into_values().collect(),
        }
    }
}

impl From<Vec<Value>> for Replacement {
    fn from(values: Vec<Value>) -> Self {
        Replacement::Positional(values)
    }
}

impl From<BTreeMap<Value, Value>> for Replacement {
    fn from(entries: BTreeMap<Value, Value>) -> Self {
        Replacement::Keyed(entries)
    }
}

/// Build a value shaped like `original` holding `replacement` as children.
///
/// - Null stays Null.
/// - An atomic original is replaced by the single new child.
/// - Records keep their schema; the child count must match the arity.
/// - Lists stay lists, tuples stay tuples, sets stay sets (duplicates collapse).
/// - Mappings take the keys of a `Keyed` replacement, or zip a `Positional`
///   one against their own sorted keys.
pub fn rebuild<P: Atomicity + ?Sized>(
    original: &Value,
    replacement: impl Into<Replacement>,
    is_atomic: &P,
) -> Result<Value> {
    let replacement = replacement.into();
    if original.is_null() {
        return Ok(Value::Null);
    }
    if is_atomic.is_atomic(original) {
        let got = replacement.len();
        return replacement
            .into_values()
            .into_iter()
            .next()
            .ok_or(Error::ArityMismatch { expected: 1, got });
    }
    rebuild_container(original, replacement)
}

/// Rebuild a value already known not to be atomic.
pub(crate) fn rebuild_container(original: &Value, replacement: Replacement) -> Result<Value> {
    match original {
        Value::Null => Ok(Value::Null),
        Value::Record(record) => {
            Record::new(record.schema().clone(), replacement.into_values()).map(Value::Record)
        }
        Value::List(_) => Ok(Value::List(replacement.into_values())),
        Value::Tuple(_) => Ok(Value::Tuple(replacement.into_values())),
        Value::Set(_) => Ok(Value::Set(replacement.into_values().into_iter().collect())),
        Value::Map(entries) => match replacement {
            Replacement::Keyed(rekeyed) => Ok(Value::Map(rekeyed)),
            Replacement::Positional(values) => {
                let keys = sorted_keys(entries)?;
                if keys.len() != values.len() {
                    return Err(Error::ArityMismatch {
                        expected: keys.len(),
                        got: values.len(),
                    });
                }
                Ok(Value::Map(keys.into_iter().cloned().zip(values).collect()))
            }
        },
        other => Err(malformed(other)),
    }
}
