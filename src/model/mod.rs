//! # Value Model
//!
//! The structures the traversal engine walks: a closed `Value` enum with
//! four container variants (sequence, set, mapping, record) and atomic leaves.
//!
//! Pure data: traversal logic lives in `shape` and `traverse`.

pub mod json;
pub mod path;
pub mod record;
pub mod value;

pub use path::{PathSegment, StructurePath};
pub use record::{Fields, Record, RecordSchema};
pub use value::Value;
