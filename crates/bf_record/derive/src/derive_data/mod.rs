//! Parsed form of a `#[derive(Record)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use record_struct::{RecordField, RecordStruct};
