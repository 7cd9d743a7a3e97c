//! # Traversal Algorithms
//!
//! flatten, map, reduce, filter, pack and assert_same_structure, each built
//! from [`crate::shape`]'s classify / children / rebuild and applied
//! recursively.
//!
//! Every traversal is synchronous, never mutates its input, and descends at
//! most [`NestConfig::recursion_limit`] containers deep. Going deeper fails
//! with `DepthLimitExceeded` instead of exhausting the stack.

pub mod compare;
pub mod filter;
pub mod flatten;
pub mod map;
pub mod pack;
pub mod reduce;

use serde::{Deserialize, Serialize};

use crate::atomic::Atomicity;
use crate::{Error, Result};

pub use compare::{Mismatch, assert_same_structure};
pub use filter::filter;
pub use flatten::{flatten, leaves};
pub use map::map;
pub use pack::pack;
pub use reduce::reduce;

/// Nesting depth allowed when no configuration is given.
pub const DEFAULT_RECURSION_LIMIT: usize = 512;

// ============================================================================
// Configuration
// ============================================================================

/// Traversal settings carried by [`crate::Nest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestConfig {
    /// Maximum number of nested containers a traversal descends through.
    pub recursion_limit: usize,
    /// Default `keep_structure` for filtering: keep containers emptied by it.
    pub keep_structure: bool,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            keep_structure: true,
        }
    }
}

// ============================================================================
// Walker — shared recursion context
// ============================================================================

/// Predicate plus depth bound, threaded through one traversal.
pub(crate) struct Walker<'p, P: ?Sized> {
    pub(crate) is_atomic: &'p P,
    limit: usize,
}

impl<'p, P: Atomicity + ?Sized> Walker<'p, P> {
    pub(crate) fn new(is_atomic: &'p P) -> Self {
        Self::with_limit(is_atomic, DEFAULT_RECURSION_LIMIT)
    }

    pub(crate) fn with_limit(is_atomic: &'p P, limit: usize) -> Self {
        Self { is_atomic, limit }
    }

    /// Depth of the children of a container found at `depth`.
    pub(crate) fn enter(&self, depth: usize) -> Result<usize> {
        let next = depth + 1;
        if next > self.limit {
            return Err(Error::DepthLimitExceeded { limit: self.limit });
        }
        Ok(next)
    }
}
