//! # nest-rs — Generic Algorithms over Nested Structures
//!
//! Map, reduce, flatten, pack, filter and compare arbitrarily nested trees of
//! values without writing the recursion for each container kind.
//!
//! ## Design Principles
//!
//! 1. **Closed shapes**: a [`Value`] is atomic, absent, or one of four
//!    containers; [`Shape`] names which
//! 2. **Deterministic order**: sets iterate in the total order of `Value`,
//!    mappings in ascending key order, records in field declaration order
//! 3. **One triad**: every algorithm is classify → children → rebuild, applied
//!    recursively
//! 4. **Pure**: inputs are never mutated; failure is a returned [`Error`]
//!
//! ## Quick Start
//!
//! ```rust
//! use nest_rs::{Nest, Value};
//!
//! # fn example() -> nest_rs::Result<()> {
//! let nest = Nest::new();
//!
//! let s = Value::tuple([
//!     Value::from(1),
//!     Value::list([Value::from(2), Value::set([3, 4, 5]), Value::map([("a", 6), ("b", 7)])]),
//! ]);
//! let flat = nest.flatten(&s)?;
//! assert_eq!(flat, (1..=7).map(Value::from).collect::<Vec<_>>());
//!
//! let doubled = nest.map(|v| Value::Int(v.as_int().unwrap_or(0) * 2), &s)?;
//! nest.assert_same_structure(&s, &doubled)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Shapes
//!
//! | Shape | Variants | Child order |
//! |-------|----------|-------------|
//! | Absent | `Null` | — |
//! | Atomic | scalars, strings (default predicate) | — |
//! | OrderedSequence | `List`, `Tuple` | position |
//! | Set | `Set` | total order of `Value` |
//! | KeyOrderedMapping | `Map` | ascending key |
//! | FixedFieldRecord | `Record` | field declaration |

// ============================================================================
// Modules
// ============================================================================

pub mod atomic;
pub mod convert;
pub mod model;
pub mod shape;
pub mod traverse;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Fields, PathSegment, Record, RecordSchema, StructurePath, Value};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use atomic::{Atomicity, MaxDepth, Scalar, has_max_depth, is_atomic_default};
pub use convert::FromValue;
pub use shape::{ChildList, Replacement, Shape, children, classify, rebuild, sorted_keys};
pub use traverse::{
    DEFAULT_RECURSION_LIMIT, Mismatch, NestConfig, assert_same_structure, filter, flatten,
    leaves, map, pack, reduce,
};

use traverse::Walker;

// ============================================================================
// Top-level Nest handle
// ============================================================================

/// The primary entry point. A `Nest` carries an atomicity predicate and a
/// [`NestConfig`], and runs every traversal with them.
#[derive(Debug, Clone, Default)]
pub struct Nest<P = Scalar> {
    is_atomic: P,
    config: NestConfig,
}

impl Nest<Scalar> {
    /// A Nest with the default predicate and configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Atomicity> Nest<P> {
    /// Create a Nest with the given atomicity predicate.
    pub fn with_atomicity(is_atomic: P) -> Self {
        Self {
            is_atomic,
            config: NestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.config.recursion_limit = limit;
        self
    }

    pub fn keep_structure(mut self, keep: bool) -> Self {
        self.config.keep_structure = keep;
        self
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Access the predicate (for advanced use).
    pub fn atomicity(&self) -> &P {
        &self.is_atomic
    }

    fn walker(&self) -> Walker<'_, P> {
        Walker::with_limit(&self.is_atomic, self.config.recursion_limit)
    }

    pub fn is_atomic(&self, value: &Value) -> bool {
        self.is_atomic.is_atomic(value)
    }

    pub fn classify(&self, value: &Value) -> Result<Shape> {
        shape::classify(value, &self.is_atomic)
    }

    pub fn flatten(&self, structure: &Value) -> Result<Vec<Value>> {
        self.walker().flatten(structure)
    }

    pub fn leaves<'a>(&self, structure: &'a Value) -> Result<Vec<&'a Value>> {
        self.walker().leaves(structure)
    }

    pub fn map<F>(&self, func: F, structure: &Value) -> Result<Value>
    where
        F: FnMut(&Value) -> Value,
    {
        self.walker().map(func, structure)
    }

    pub fn reduce<F>(&self, func: F, structure: &Value) -> Result<Value>
    where
        F: FnMut(Value, Value) -> Value,
    {
        self.walker().reduce(func, structure)
    }

    /// Filter with the configured `keep_structure`.
    pub fn filter<F>(&self, func: F, structure: &Value) -> Result<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        self.walker().filter(func, structure, self.config.keep_structure)
    }

    pub fn pack<I>(&self, structure: &Value, flat: I) -> Result<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        self.walker().pack(structure, flat)
    }

    pub fn assert_same_structure(&self, a: &Value, b: &Value) -> Result<()> {
        self.walker().assert_same_structure(a, b)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Malformed structure: {value} is neither atomic nor a recognized container")]
    MalformedStructure { value: String },

    #[error("Unsortable keys: mapping keys {keys} are not mutually comparable")]
    UnsortableKeys { keys: String },

    #[error("Arity mismatch: expected {expected} elements, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Structure mismatch at {path}: {reason} (left: {left}, right: {right})")]
    StructureMismatch {
        path: StructurePath,
        reason: Mismatch,
        left: Box<Value>,
        right: Box<Value>,
    },

    #[error("Depth limit exceeded: structure nests deeper than {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },
}

pub type Result<T> = std::result::Result<T, Error>;
