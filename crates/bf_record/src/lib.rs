#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code refers to `bf_record` by name, also inside this crate and its
// doc tests.
extern crate self as bf_record;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod reflection;

pub mod de;
pub mod error;
pub mod info;
pub mod registry;
pub mod ser;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use bf_record_derive as derive;
pub use error::{InstantiationError, NotSerializable};
pub use reflection::{
    Describe, DynamicRepresentable, FieldRef, FromDynamic, Record, StringRepresentable, ToDynamic,
    Typed, take_field, take_ignored_field,
};

#[cfg(feature = "json")]
pub use error::JsonError;

/// The most common imports.
pub mod prelude {
    pub use crate::de::{Matcher, Resolved};
    pub use crate::derive::Record;
    pub use crate::registry::TypeRegistry;
    pub use crate::value::{Mapping, Value};
    pub use crate::{Describe, FromDynamic, Record, ToDynamic};
}
