//! # Shapes
//!
//! The classify / enumerate / reconstruct triad every traversal is built from:
//!
//! ```text
//! classify(value)            → Shape
//! children(value)            → [&child, ...]   (deterministic order)
//! rebuild(value, [child..])  → value of the same shape and type
//! ```
//!
//! None of these recurse. The algorithms in [`crate::traverse`] do.

pub mod children;
pub mod keys;
pub mod rebuild;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atomic::Atomicity;
use crate::model::Value;
use crate::{Error, Result};

pub use children::{ChildList, children};
pub use keys::sorted_keys;
pub use rebuild::{Replacement, rebuild};

/// Classification of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// A leaf under the active atomicity predicate.
    Atomic,
    /// The null value. Traverses to an empty result.
    Absent,
    /// `List` or `Tuple`: children in positional order.
    OrderedSequence,
    /// `Set`: children in the total order of [`Value`].
    Set,
    /// `Map`: values in ascending key order.
    KeyOrderedMapping,
    /// `Record`: field values in declaration order.
    FixedFieldRecord,
}

impl Shape {
    /// The container shape implied by the variant alone, if any.
    pub fn of_container(value: &Value) -> Option<Shape> {
        match value {
            Value::List(_) | Value::Tuple(_) => Some(Shape::OrderedSequence),
            Value::Set(_) => Some(Shape::Set),
            Value::Map(_) => Some(Shape::KeyOrderedMapping),
            Value::Record(_) => Some(Shape::FixedFieldRecord),
            _ => None,
        }
    }

    pub fn is_container(self) -> bool {
        !matches!(self, Shape::Atomic | Shape::Absent)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Atomic => "atomic",
            Shape::Absent => "absent",
            Shape::OrderedSequence => "ordered sequence",
            Shape::Set => "set",
            Shape::KeyOrderedMapping => "key-ordered mapping",
            Shape::FixedFieldRecord => "fixed-field record",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `value` under `is_atomic`.
///
/// Null is checked first, then the predicate, then the container variants.
/// A value that is neither atomic nor a container is malformed.
pub fn classify<P: Atomicity + ?Sized>(value: &Value, is_atomic: &P) -> Result<Shape> {
    if value.is_null() {
        return Ok(Shape::Absent);
    }
    if is_atomic.is_atomic(value) {
        return Ok(Shape::Atomic);
    }
    Shape::of_container(value).ok_or_else(|| malformed(value))
}

pub(crate) fn malformed(value: &Value) -> Error {
    Error::MalformedStructure {
        value: value.to_string(),
    }
}
