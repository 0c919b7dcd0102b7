//! Static per-type metadata used for matching and flattening.
//!
//! - [`FieldKind`]: the expected kind of a declared field.
//! - [`FieldDescriptor`]: one declared field with its alias and flags.
//! - [`TypeDescriptor`]: everything the matcher and flattener know about a record type.
//! - [`DescriptorCell`] / [`GenericDescriptorCell`]: populate-once storage for `'static` descriptors.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod descriptor;
mod field;
mod kind;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{DescriptorCell, GenericDescriptorCell};
pub use descriptor::TypeDescriptor;
pub use field::FieldDescriptor;
pub use kind::FieldKind;
