//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! JSON objects become `Map`s keyed by `String`, arrays become `List`s.
//! Going back, tuples and sets become arrays, records become objects keyed by
//! field name, and bytes become arrays of numbers.

use serde_json::{Map as JsonMap, Number};

use super::Value;
use crate::{Error, Result};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Convert to JSON. Fails for non-finite floats and non-string map keys.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let json = match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| Error::TypeError {
                    expected: "finite FLOAT".into(),
                    got: format!("{f}"),
                })?,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::Array(
                b.iter().map(|byte| serde_json::Value::Number((*byte).into())).collect(),
            ),
            Value::List(items) | Value::Tuple(items) => json_array(items)?,
            Value::Set(items) => json_array(items)?,
            Value::Map(entries) => {
                let mut object = JsonMap::new();
                for (key, value) in entries {
                    let Value::String(key) = key else {
                        return Err(Error::TypeError {
                            expected: "STRING key".into(),
                            got: key.type_name().into(),
                        });
                    };
                    object.insert(key.clone(), value.to_json()?);
                }
                serde_json::Value::Object(object)
            }
            Value::Record(record) => {
                let mut object = JsonMap::new();
                for (name, value) in record.fields() {
                    object.insert(name.to_owned(), value.to_json()?);
                }
                serde_json::Value::Object(object)
            }
        };
        Ok(json)
    }
}

fn json_array<'a>(items: impl IntoIterator<Item = &'a Value>) -> Result<serde_json::Value> {
    items
        .into_iter()
        .map(Value::to_json)
        .collect::<Result<Vec<_>>>()
        .map(serde_json::Value::Array)
}
