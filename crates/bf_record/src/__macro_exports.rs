//! Items referenced by the code `#[derive(Record)]` expands to.
//!
//! Not public API.

use alloc::format;
use alloc::vec::Vec;

use crate::error::InstantiationError;
use crate::info::TypeDescriptor;
use crate::value::Value;
use crate::{Describe, de};

pub use alloc::boxed::Box;
pub use alloc::vec;

/// Converts a field value into record `T`.
///
/// Accepts a [`Value::Record`] holding a `T`, or a mapping that is
/// [normalized](de::normalize) for `T` and instantiated.
pub fn record_from_dynamic<T: Describe>(value: Value) -> Result<T, InstantiationError> {
    let descriptor = T::descriptor();
    match value {
        Value::Record(record) => match record.downcast::<T>() {
            Ok(record) => Ok(*record),
            Err(other) => Err(InstantiationError::new(
                "",
                format!(
                    "expected `{}`, found record `{}`",
                    descriptor.type_name(),
                    other.type_descriptor().type_name(),
                ),
            )),
        },
        Value::Mapping(mapping) => T::from_mapping(de::normalize(descriptor, mapping)),
        other => Err(InstantiationError::mismatched(descriptor.type_name(), other.kind())),
    }
}

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::info::TypeDescriptor;

    pub use inventory;

    /// One `#[record(auto_register)]` type.
    pub struct __AutoRegisterFunc(pub fn() -> &'static TypeDescriptor);

    inventory::collect!(__AutoRegisterFunc);
}

/// Descriptors of every auto-registered type, sorted by type path.
#[cfg(feature = "auto_register")]
pub(crate) fn collect_descriptors() -> Vec<&'static TypeDescriptor> {
    let mut descriptors: Vec<_> = inventory::iter::<auto_register::__AutoRegisterFunc>
        .into_iter()
        .map(|func| (func.0)())
        .collect();
    descriptors.sort_by_key(|descriptor| descriptor.type_path());
    descriptors.dedup_by_key(|descriptor| descriptor.type_id());
    descriptors
}

#[cfg(not(feature = "auto_register"))]
#[inline(always)]
pub(crate) fn collect_descriptors() -> Vec<&'static TypeDescriptor> {
    Vec::new()
}
