//! Record — a value with a fixed, ordered list of named fields.
//!
//! Records are the "ordered named-field view" of the engine: tuple-like
//! named records and attribute-tagged structs both map onto a
//! [`RecordSchema`] plus positional values. User types opt in through
//! [`Fields`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Value;
use crate::{Error, Result};

/// The static type of a record: a name and its field names in declaration order.
///
/// Two records have the same type iff their schemas are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<String>,
}

impl RecordSchema {
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

/// A record instance. Always holds exactly one value per schema field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr")]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

/// Unchecked wire form; deserialization goes through [`Record::new`].
#[derive(Deserialize)]
struct RecordRepr {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl TryFrom<RecordRepr> for Record {
    type Error = Error;

    fn try_from(repr: RecordRepr) -> Result<Self> {
        Record::new(repr.schema, repr.values)
    }
}

impl Record {
    /// Build a record, positionally assigning `values` to the schema's fields.
    pub fn new(schema: impl Into<Arc<RecordSchema>>, values: Vec<Value>) -> Result<Self> {
        let schema = schema.into();
        if schema.arity() != values.len() {
            return Err(Error::ArityMismatch {
                expected: schema.arity(),
                got: values.len(),
            });
        }
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.fields.iter().map(String::as_str).zip(&self.values)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.schema.position(field).and_then(|i| self.values.get(i))
    }

    pub fn same_type(&self, other: &Record) -> bool {
        self.schema == other.schema
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{name}: {value}")?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Fields — opt-in record view for user types
// ============================================================================

/// Exposes a user type as a record.
///
/// ```rust
/// use std::sync::Arc;
/// use nest_rs::{Fields, RecordSchema, Result, Value};
///
/// struct Point { x: i64, y: i64 }
///
/// impl Fields for Point {
///     fn schema() -> Arc<RecordSchema> {
///         Arc::new(RecordSchema::new("Point", ["x", "y"]))
///     }
///     fn into_values(self) -> Vec<Value> {
///         vec![self.x.into(), self.y.into()]
///     }
///     fn from_values(values: Vec<Value>) -> Result<Self> {
///         use nest_rs::FromValue;
///         Ok(Point { x: i64::from_value(&values[0])?, y: i64::from_value(&values[1])? })
///     }
/// }
///
/// let v = Point { x: 1, y: 2 }.into_value();
/// assert_eq!(v.to_string(), "Point(x: 1, y: 2)");
/// ```
pub trait Fields: Sized {
    /// The record type. Must be the same for every instance.
    fn schema() -> Arc<RecordSchema>;

    /// Field values in the schema's declaration order.
    fn into_values(self) -> Vec<Value>;

    /// Inverse of `into_values`. Receives exactly `schema().arity()` values.
    fn from_values(values: Vec<Value>) -> Result<Self>;

    fn into_record(self) -> Record {
        Record {
            schema: Self::schema(),
            values: self.into_values(),
        }
    }

    fn into_value(self) -> Value {
        Value::Record(self.into_record())
    }

    /// Extract from a `Value::Record` of this type.
    fn try_from_value(value: &Value) -> Result<Self> {
        let schema = Self::schema();
        match value {
            Value::Record(r) if *r.schema == *schema => Self::from_values(r.values.clone()),
            other => Err(Error::TypeError {
                expected: format!("RECORD {}", schema.name),
                got: other.type_label(),
            }),
        }
    }
}
