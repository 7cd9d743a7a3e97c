//! End-to-end tests for map and reduce.

use std::sync::Arc;

use nest_rs::{
    FromValue, Nest, Record, RecordSchema, Scalar, Value, assert_same_structure, flatten,
    has_max_depth, map, reduce,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(name: &str, x: impl Into<Value>, y: impl Into<Value>) -> Value {
    let schema = Arc::new(RecordSchema::new(name, ["x", "y"]));
    Value::Record(Record::new(schema, vec![x.into(), y.into()]).unwrap())
}

fn double(v: &Value) -> Value {
    Value::Int(i64::from_value(v).unwrap() * 2)
}

fn add(a: Value, b: Value) -> Value {
    Value::Int(i64::from_value(&a).unwrap() + i64::from_value(&b).unwrap())
}

/// `{'a': 1, 'b': 2, 'c': [3, 4, 5, {6, 7}, (8, 9)], 'd': Point(10, 11), 'e': Coordinates(12, 13)}`
fn mixed() -> Value {
    Value::map([
        ("a", Value::from(1)),
        ("b", Value::from(2)),
        (
            "c",
            Value::list([
                Value::from(3),
                Value::from(4),
                Value::from(5),
                Value::set([6, 7]),
                Value::tuple([8, 9]),
            ]),
        ),
        ("d", record("Point", 10, 11)),
        ("e", record("Coordinates", 12, 13)),
    ])
}

// ============================================================================
// map
// ============================================================================

#[test]
fn test_map_none() {
    assert_eq!(map(double, &Value::Null, &Scalar).unwrap(), Value::Null);
}

#[test]
fn test_map_single_element() {
    assert_eq!(map(double, &Value::Int(4), &Scalar).unwrap(), Value::Int(8));
}

#[test]
fn test_map_scenario() {
    let s = Value::map([("a", Value::list([1, 2])), ("b", Value::tuple([3, 4]))]);
    let mapped = map(double, &s, &Scalar).unwrap();
    assert_eq!(mapped, Value::map([("a", Value::list([2, 4])), ("b", Value::tuple([6, 8]))]));
}

#[test]
fn test_map_nested() {
    let mapped = map(double, &mixed(), &Scalar).unwrap();
    let expected = Value::map([
        ("a", Value::from(2)),
        ("b", Value::from(4)),
        (
            "c",
            Value::list([
                Value::from(6),
                Value::from(8),
                Value::from(10),
                Value::set([12, 14]),
                Value::tuple([16, 18]),
            ]),
        ),
        ("d", record("Point", 14, 16)),
        ("e", record("Coordinates", 18, 20)),
    ]);
    assert_eq!(mapped, expected);
}

#[test]
fn test_map_with_lists_as_leaves() {
    let s = Value::from(json!({"a": [1, 2, 3], "b": [4, 5, 6]}));
    let s = match s {
        Value::Map(mut m) => {
            m.insert(
                Value::from("c"),
                Value::tuple([Value::list([7, 8, 9]), Value::list([10, 11, 12])]),
            );
            Value::Map(m)
        }
        other => other,
    };
    let lists = |v: &Value| matches!(v, Value::List(_));
    let first = |v: &Value| match v {
        Value::List(items) => items[0].clone(),
        other => other.clone(),
    };
    let mapped = map(first, &s, &lists).unwrap();
    assert_eq!(
        mapped,
        Value::map([
            ("a", Value::from(1)),
            ("b", Value::from(4)),
            ("c", Value::tuple([7, 10])),
        ])
    );
}

#[test]
fn test_map_with_max_depth() {
    let s = Value::list([Value::list([1, 2, 3]), Value::list([4, 5, 6]), Value::list([7, 8, 9])]);
    let max = |v: &Value| match v {
        Value::List(items) => items.iter().max().cloned().unwrap_or(Value::Null),
        other => other.clone(),
    };
    let mapped = map(max, &s, &has_max_depth(1, Scalar)).unwrap();
    assert_eq!(mapped, Value::list([3, 6, 9]));
}

#[test]
fn test_map_identity_keeps_structure() {
    let s = mixed();
    let same = map(Value::clone, &s, &Scalar).unwrap();
    assert_same_structure(&s, &same, &Scalar).unwrap();
    assert_eq!(same, s);
}

#[test]
fn test_map_flatten_consistency() {
    let s = Value::map([("x", Value::tuple([5, 1])), ("y", Value::list([Value::Null, Value::from(3)]))]);
    let mapped = flatten(&map(double, &s, &Scalar).unwrap(), &Scalar).unwrap();
    let expected: Vec<Value> = flatten(&s, &Scalar).unwrap().iter().map(double).collect();
    assert_eq!(mapped, expected);
}

// ============================================================================
// reduce
// ============================================================================

#[test]
fn test_reduce_none() {
    assert_eq!(reduce(add, &Value::Null, &Scalar).unwrap(), Value::Null);
}

#[test]
fn test_reduce_single_element() {
    assert_eq!(reduce(add, &Value::Int(3), &Scalar).unwrap(), Value::Int(3));
}

#[test]
fn test_reduce_nested() {
    let r = reduce(add, &mixed(), &Scalar).unwrap();
    assert_eq!(r, Value::Int((1..=13).sum()));
}

#[test]
fn test_reduce_with_records_as_leaves() {
    let points = |v: &Value| matches!(v, Value::Record(r) if r.name() == "Point") || nest_rs::is_atomic_default(v);
    let keep_point = |a: Value, b: Value| if matches!(a, Value::Record(_)) { a } else { b };
    let r = reduce(keep_point, &mixed(), &points).unwrap();
    assert_eq!(r, record("Point", 10, 11));
}

#[test]
fn test_reduce_via_nest_handle() {
    let nest = Nest::new();
    let total = nest.reduce(add, &Value::from(json!([[1, 2], {"k": 3}]))).unwrap();
    assert_eq!(i64::from_value(&total).unwrap(), 6);
}
