//! End-to-end tests for pack, the inverse of flatten.

use std::sync::Arc;

use nest_rs::{Error, Record, RecordSchema, Scalar, Value, assert_same_structure, flatten, pack};
use pretty_assertions::assert_eq;

fn record(name: &str, x: impl Into<Value>, y: impl Into<Value>) -> Value {
    let schema = Arc::new(RecordSchema::new(name, ["x", "y"]));
    Value::Record(Record::new(schema, vec![x.into(), y.into()]).unwrap())
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

// ============================================================================
// 1. Degenerate inputs
// ============================================================================

#[test]
fn test_pack_none() {
    assert_eq!(pack(&Value::Null, Vec::new(), &Scalar).unwrap(), Value::Null);
}

#[test]
fn test_pack_single_element() {
    let packed = pack(&Value::from("string"), vec![Value::from("expected")], &Scalar).unwrap();
    assert_eq!(packed, Value::from("expected"));
}

// ============================================================================
// 2. Nested structures
// ============================================================================

#[test]
fn test_pack_scenario() {
    let s = Value::map([("a", Value::from(1)), ("b", Value::list([2, 3]))]);
    let packed = pack(&s, ints(&[10, 20, 30]), &Scalar).unwrap();
    assert_eq!(packed, Value::map([("a", Value::from(10)), ("b", Value::list([20, 30]))]));
}

#[test]
fn test_pack_nested() {
    let s = Value::map([
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
    ]);
    let flat = ints(&[2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26]);
    let packed = pack(&s, flat, &Scalar).unwrap();
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
        ("d", record("Point", 20, 22)),
        ("e", record("Coordinates", 24, 26)),
    ]);
    assert_eq!(packed, expected);
}

#[test]
fn test_pack_lists_as_leaves() {
    let s = Value::map([("a", Value::list([1, 2, 3])), ("b", Value::list([4, 5, 6]))]);
    let flat = vec![Value::list([2, 4, 6, 8]), Value::list([10, 12])];
    let lists = |v: &Value| matches!(v, Value::List(_));
    let packed = pack(&s, flat, &lists).unwrap();
    assert_eq!(
        packed,
        Value::map([("a", Value::list([2, 4, 6, 8])), ("b", Value::list([10, 12]))])
    );
}

#[test]
fn test_pack_round_trip() {
    let s = Value::tuple([
        Value::from("x"),
        Value::map([("k", Value::set(["p", "q"])), ("m", Value::Null)]),
        record("Point", Value::list([1, 2]), 3),
    ]);
    let packed = pack(&s, flatten(&s, &Scalar).unwrap(), &Scalar).unwrap();
    assert_same_structure(&s, &packed, &Scalar).unwrap();
    assert_eq!(packed, s);
}

// ============================================================================
// 3. Arity
// ============================================================================

#[test]
fn test_pack_too_few_elements() {
    let s = Value::map([("a", Value::from(1)), ("b", Value::list([2, 3]))]);
    let err = pack(&s, ints(&[10, 20]), &Scalar).unwrap_err();
    assert_eq!(err, Error::ArityMismatch { expected: 3, got: 2 });
}

#[test]
fn test_pack_ignores_surplus() {
    let s = Value::list([1]);
    assert_eq!(pack(&s, ints(&[5, 6, 7]), &Scalar).unwrap(), Value::list([5]));
}
