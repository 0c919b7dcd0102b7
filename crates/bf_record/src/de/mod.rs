//! The structural matcher: dynamic mappings to typed records.
//!
//! Given a value tree and an ordered list of candidate descriptors, every
//! mapping in the tree is resolved bottom-up. For one mapping, each candidate
//! is scored in list order:
//!
//! 1. Keys carrying an external alias are read as their canonical field.
//! 2. A candidate missing a required field is rejected.
//! 3. The *distance* is the number of keys that are not matched fields of
//!    the candidate. Only a candidate strictly closer than the current best
//!    is considered further, so ties keep the earlier candidate.
//! 4. Field kinds are checked, except for lenient fields. Integers are
//!    accepted for float fields and are converted on instantiation.
//! 5. A passing candidate at distance zero ends the search.
//!
//! The best candidate is then instantiated. Its map-typed fields receive
//! nested mappings as mappings, even when those resolved to a record of
//! their own. When no candidate passes, or the best one fails to
//! instantiate, the mapping is handed back unchanged: failing to match is
//! not an error.
//!
//! # Examples
//!
//! ```
//! use bf_record::Describe;
//! use bf_record::derive::Record;
//! use bf_record::value::Value;
//!
//! #[derive(Record, Debug, Clone, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! let input: Value = [("x", Value::from(1)), ("y", Value::from(2.5))].into_iter().collect();
//! let output = bf_record::de::resolve(input, &[Point::descriptor()]);
//!
//! assert_eq!(output.downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.5 }));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod matcher;
mod resolved;

// -----------------------------------------------------------------------------
// Exports

pub use matcher::{Candidate, DEFAULT_MAX_DEPTH, Matcher, normalize};
pub use resolved::Resolved;

use crate::info::TypeDescriptor;
use crate::value::{Mapping, Value};

/// Resolves every mapping of `value` against `candidates`.
///
/// Shorthand for [`Matcher::new(candidates).resolve(value)`](Matcher::resolve).
#[inline]
pub fn resolve(value: Value, candidates: &[&'static TypeDescriptor]) -> Value {
    Matcher::new(candidates).resolve(value)
}

/// Resolves a single mapping, nested values included, against `candidates`.
///
/// Shorthand for [`Matcher::new(candidates).resolve_mapping(mapping)`](Matcher::resolve_mapping).
#[inline]
pub fn resolve_mapping(mapping: Mapping, candidates: &[&'static TypeDescriptor]) -> Resolved {
    Matcher::new(candidates).resolve_mapping(mapping)
}
