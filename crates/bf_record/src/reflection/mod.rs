// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod record;
mod repr;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic::{FromDynamic, ToDynamic, Typed, take_field, take_ignored_field};
pub use record::{Describe, FieldRef, Record};
pub use repr::{DynamicRepresentable, StringRepresentable};
