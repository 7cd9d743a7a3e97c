//! Leaf extraction in deterministic pre-order.

use tracing::{instrument, trace};

use super::Walker;
use crate::atomic::Atomicity;
use crate::model::Value;
use crate::shape::children::container_children;
use crate::shape::{Shape, classify};
use crate::Result;

/// The atomic elements of `structure`, in pre-order.
///
/// Absent contributes nothing; an atomic root yields itself; containers
/// contribute their children's leaves in canonical child order.
///
/// ```rust
/// use nest_rs::{Value, flatten, Scalar};
///
/// let s = Value::list([Value::from(1), Value::tuple([Value::from(2), Value::map([("a", 3)])]), Value::from(4)]);
/// assert_eq!(flatten(&s, &Scalar).unwrap(), vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
/// ```
#[instrument(level = "trace", skip_all, fields(root = structure.type_name()))]
pub fn flatten<P: Atomicity + ?Sized>(structure: &Value, is_atomic: &P) -> Result<Vec<Value>> {
    Walker::new(is_atomic).flatten(structure)
}

/// Like [`flatten`], borrowing the leaves instead of cloning them.
#[instrument(level = "trace", skip_all, fields(root = structure.type_name()))]
pub fn leaves<'a, P: Atomicity + ?Sized>(structure: &'a Value, is_atomic: &P) -> Result<Vec<&'a Value>> {
    Walker::new(is_atomic).leaves(structure)
}

impl<P: Atomicity + ?Sized> Walker<'_, P> {
    pub(crate) fn flatten(&self, structure: &Value) -> Result<Vec<Value>> {
        let leaves = self.leaves(structure)?;
        Ok(leaves.into_iter().cloned().collect())
    }

    pub(crate) fn leaves<'a>(&self, structure: &'a Value) -> Result<Vec<&'a Value>> {
        let mut out = Vec::new();
        self.collect_leaves(structure, 0, &mut out)?;
        trace!(leaves = out.len(), "flattened");
        Ok(out)
    }

    fn collect_leaves<'a>(&self, value: &'a Value, depth: usize, out: &mut Vec<&'a Value>) -> Result<()> {
        match classify(value, self.is_atomic)? {
            Shape::Absent => {}
            Shape::Atomic => out.push(value),
            _ => {
                let depth = self.enter(depth)?;
                for child in container_children(value)? {
                    self.collect_leaves(child, depth, out)?;
                }
            }
        }
        Ok(())
    }
}
