//! Universal value type for nested structures.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Record;

/// A nested structure.
///
/// Covers every shape the traversal engine understands:
/// - Absent: Null
/// - Scalars: Bool, Int, Float, String, Bytes
/// - Ordered sequences: List, Tuple (two distinct container types)
/// - Set: unique elements, iterated in the total order of [`Value`]
/// - Map: unique keys, iterated in ascending key order
/// - Record: a fixed, ordered list of named fields
///
/// `Value` is totally ordered (see [`Value::total_cmp`]), which is what makes
/// `Set` iteration and `Map` key order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(BTreeSet<Value>),
    Map(BTreeMap<Value, Value>),
    Record(Record),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Bytes(_) => "BYTES",
            Value::List(_) => "LIST",
            Value::Tuple(_) => "TUPLE",
            Value::Set(_) => "SET",
            Value::Map(_) => "MAP",
            Value::Record(_) => "RECORD",
        }
    }

    /// Type name including the record schema, e.g. `RECORD Point`.
    pub fn type_label(&self) -> String {
        match self {
            Value::Record(r) => format!("RECORD {}", r.name()),
            other => other.type_name().to_owned(),
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }
    pub fn is_string(&self) -> bool { matches!(self, Value::String(_)) }

    /// `List` or `Tuple`.
    pub fn is_sequence(&self) -> bool { matches!(self, Value::List(_) | Value::Tuple(_)) }
    pub fn is_set(&self) -> bool { matches!(self, Value::Set(_)) }
    pub fn is_mapping(&self) -> bool { matches!(self, Value::Map(_)) }
    pub fn is_record(&self) -> bool { matches!(self, Value::Record(_)) }

    /// True for the four container variants.
    pub fn is_container(&self) -> bool {
        self.is_sequence() || self.is_set() || self.is_mapping() || self.is_record()
    }

    /// Whether two containers are of the same runtime type.
    ///
    /// `List` and `Tuple` are different types; records must share a schema.
    pub fn same_container_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(_), Value::List(_))
            | (Value::Tuple(_), Value::Tuple(_))
            | (Value::Set(_), Value::Set(_))
            | (Value::Map(_), Value::Map(_)) => true,
            (Value::Record(a), Value::Record(b)) => a.same_type(b),
            _ => false,
        }
    }

    /// Attempt to extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempt to extract as i64. Floats qualify only when integral and
    /// within the range of `i64`.
    pub fn as_int(&self) -> Option<i64> {
        const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && (-BOUND..BOUND).contains(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Value {
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Duplicates collapse.
    pub fn set(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Later entries overwrite earlier ones with an equal key.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<Record> for Value { fn from(v: Record) -> Self { Value::Record(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}
impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self { Value::Tuple(vec![a.into(), b.into()]) }
}
impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self { Value::Tuple(vec![a.into(), b.into(), c.into()]) }
}

// ============================================================================
// Display
// ============================================================================

fn write_items<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, v) in items.into_iter().enumerate() {
        if i > 0 { write!(f, ", ")?; }
        write!(f, "{v}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Bytes(b) => write!(f, "<bytes[{}]>", b.len()),
            Value::List(l) => {
                write!(f, "[")?;
                write_items(f, l)?;
                write!(f, "]")
            }
            Value::Tuple(t) => {
                write!(f, "(")?;
                write_items(f, t)?;
                if t.len() == 1 { write!(f, ",")?; }
                write!(f, ")")
            }
            Value::Set(s) => {
                write!(f, "{{")?;
                write_items(f, s)?;
                write!(f, "}}")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Record(r) => write!(f, "{r}"),
        }
    }
}

// ============================================================================
// Comparison (total order)
// ============================================================================

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::Bytes(_) => 4,
            Value::List(_) => 5,
            Value::Tuple(_) => 6,
            Value::Set(_) => 7,
            Value::Map(_) => 8,
            Value::Record(_) => 9,
        }
    }

    /// Total order over all values.
    ///
    /// Values of different variants order by variant rank, except that `Int`
    /// and `Float` compare numerically (an `Int` sorts first when the two are
    /// numerically equal). Floats use IEEE 754 `totalOrder`, so `NaN` is equal
    /// to itself and sorts above infinity. Containers compare
    /// lexicographically; records compare by schema first.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::Record(a), Value::Record(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}
