//! Structural equivalence of two structures.

use std::fmt;

use tracing::instrument;

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::{PathSegment, StructurePath, Value};
use crate::shape::children::container_children;
use crate::shape::{Shape, classify, sorted_keys};
use crate::{Error, Result};

/// Why two structures differ at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// One side is a leaf, the other a container, or the container shapes differ.
    Shape { left: Shape, right: Shape },
    /// Same shape, different container type (`List` vs `Tuple`, two record schemas).
    Type { left: String, right: String },
    /// Mappings with different key sets.
    Keys { left: Vec<Value>, right: Vec<Value> },
    /// Different number of children.
    Length { left: usize, right: usize },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Shape { left, right } => write!(f, "{left} vs {right}"),
            Mismatch::Type { left, right } => write!(f, "type {left} vs {right}"),
            Mismatch::Keys { left, right } => {
                write!(f, "keys {} vs {}", Value::List(left.clone()), Value::List(right.clone()))
            }
            Mismatch::Length { left, right } => write!(f, "{left} children vs {right}"),
        }
    }
}

/// Check that `a` and `b` have the same nested structure.
///
/// Leaf positions (atomic or absent) match each other regardless of value.
/// Containers must have the same type, mappings the same sorted key set, and
/// the same number of children, which must match pairwise. The first
/// difference is reported with its path.
///
/// ```rust
/// use nest_rs::{Value, assert_same_structure, Scalar};
///
/// let a = Value::map([("a", Value::from(1)), ("b", Value::list([2, 3]))]);
/// let b = Value::map([("a", Value::from(9)), ("b", Value::list([8, 7]))]);
/// let c = Value::map([("a", Value::from(9)), ("b", Value::list([8, 7, 6]))]);
/// assert!(assert_same_structure(&a, &b, &Scalar).is_ok());
/// assert!(assert_same_structure(&a, &c, &Scalar).is_err());
/// ```
#[instrument(level = "trace", skip_all, fields(left = a.type_name(), right = b.type_name()))]
pub fn assert_same_structure<P: Atomicity + ?Sized>(a: &Value, b: &Value, is_atomic: &P) -> Result<()> {
    Walker::new(is_atomic).assert_same_structure(a, b)
}

fn mismatch(path: &StructurePath, reason: Mismatch, a: &Value, b: &Value) -> Error {
    Error::StructureMismatch {
        path: path.clone(),
        reason,
        left: Box::new(a.clone()),
        right: Box::new(b.clone()),
    }
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn assert_same_structure(&self, a: &Value, b: &Value) -> Result<()> {
        self.compare(a, b, &mut StructurePath::root(), 0)
    }

    fn compare(&self, a: &Value, b: &Value, path: &mut StructurePath, depth: usize) -> Result<()> {
        let left = classify(a, self.is_atomic)?;
        let right = classify(b, self.is_atomic)?;
        if !left.is_container() && !right.is_container() {
            return Ok(());
        }
        if left != right {
            return Err(mismatch(path, Mismatch::Shape { left, right }, a, b));
        }
        if !a.same_container_type(b) {
            let reason = Mismatch::Type {
                left: a.type_label(),
                right: b.type_label(),
            };
            return Err(mismatch(path, reason, a, b));
        }

        let depth = self.enter(depth)?;
        match (a, b) {
            (Value::Map(x), Value::Map(y)) => {
                let (keys_x, keys_y) = (sorted_keys(x)?, sorted_keys(y)?);
                if keys_x != keys_y {
                    let reason = Mismatch::Keys {
                        left: keys_x.into_iter().cloned().collect(),
                        right: keys_y.into_iter().cloned().collect(),
                    };
                    return Err(mismatch(path, reason, a, b));
                }
                for ((key, child_a), child_b) in x.iter().zip(y.values()) {
                    path.push(PathSegment::Key(key.clone()));
                    self.compare(child_a, child_b, path, depth)?;
                    path.pop();
                }
            }
            (Value::Record(x), Value::Record(y)) => {
                for ((name, child_a), child_b) in x.fields().zip(y.values()) {
                    path.push(PathSegment::Field(name.to_owned()));
                    self.compare(child_a, child_b, path, depth)?;
                    path.pop();
                }
            }
            _ => {
                let (children_a, children_b) = (container_children(a)?, container_children(b)?);
                if children_a.len() != children_b.len() {
                    let reason = Mismatch::Length {
                        left: children_a.len(),
                        right: children_b.len(),
                    };
                    return Err(mismatch(path, reason, a, b));
                }
                for (i, (child_a, child_b)) in children_a.iter().zip(&children_b).enumerate() {
                    path.push(PathSegment::Index(i));
                    self.compare(child_a, child_b, path, depth)?;
                    path.pop();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::Scalar;

    #[test]
    fn test_none() {
        assert!(assert_same_structure(&Value::Null, &Value::Null, &Scalar).is_ok());
        assert!(assert_same_structure(&Value::Int(3), &Value::Null, &Scalar).is_ok());
        assert!(assert_same_structure(&Value::list(Vec::<Value>::new()), &Value::Null, &Scalar).is_err());
    }

    #[test]
    fn test_single_element() {
        assert!(assert_same_structure(&Value::Int(3), &Value::from("string"), &Scalar).is_ok());
        assert!(assert_same_structure(&Value::Int(3), &Value::list([1]), &Scalar).is_err());
        assert!(assert_same_structure(&Value::tuple([1]), &Value::Int(3), &Scalar).is_err());
    }

    #[test]
    fn test_list_vs_tuple() {
        let err = assert_same_structure(&Value::list([1]), &Value::tuple([1]), &Scalar).unwrap_err();
        match err {
            Error::StructureMismatch { reason, .. } => assert_eq!(
                reason,
                Mismatch::Type { left: "LIST".into(), right: "TUPLE".into() }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_key_sets_differ() {
        let a = Value::map([("a", 1), ("b", 2)]);
        let b = Value::map([("a", 1), ("c", 2)]);
        let err = assert_same_structure(&a, &b, &Scalar).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Structure mismatch at $: keys [\"a\", \"b\"] vs [\"a\", \"c\"] (left: {\"a\": 1, \"b\": 2}, right: {\"a\": 1, \"c\": 2})"
        );
    }

    #[test]
    fn test_path_points_at_divergence() {
        let a = Value::map([("x", Value::list([Value::from(1), Value::tuple([2, 3])]))]);
        let b = Value::map([("x", Value::list([Value::from(1), Value::tuple([2, 3, 4])]))]);
        match assert_same_structure(&a, &b, &Scalar).unwrap_err() {
            Error::StructureMismatch { path, reason, left, right } => {
                assert_eq!(path.to_string(), "$[\"x\"][1]");
                assert_eq!(reason, Mismatch::Length { left: 2, right: 3 });
                assert_eq!(*left, Value::tuple([2, 3]));
                assert_eq!(*right, Value::tuple([2, 3, 4]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
