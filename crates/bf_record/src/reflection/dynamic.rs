use core::any::type_name;

use crate::error::{InstantiationError, NotSerializable};
use crate::info::FieldKind;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// Typed

/// The expected [`FieldKind`] of a type when it appears as a record field.
pub trait Typed {
    fn field_kind() -> FieldKind;

    /// `true` for `Option<T>`: the field may be absent or `Null`.
    #[inline]
    fn is_optional() -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// ToDynamic

/// Reduction of a typed value to the dynamic value model.
///
/// Implemented for primitives, standard collections, `Option`, every derived
/// record, and types registered through
/// [`impl_dynamic_representable!`](crate::impl_dynamic_representable) or
/// [`impl_string_representable!`](crate::impl_string_representable).
pub trait ToDynamic {
    fn to_dynamic(&self) -> Result<Value, NotSerializable>;

    /// `true` when the value represents an absent optional; such fields are
    /// left out of flattened output.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// FromDynamic

/// Construction of a typed value from the dynamic value model.
pub trait FromDynamic: Sized {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError>;

    /// The value used when the field is missing entirely, `None` if a missing
    /// field is an error.
    #[inline]
    fn from_missing() -> Option<Self> {
        None
    }
}

// -----------------------------------------------------------------------------
// Field extraction

/// Removes field `name` from `mapping` and converts it to `T`.
///
/// A missing field falls back to [`FromDynamic::from_missing`], so a missing
/// `Option<T>` becomes `None`. Conversion failures are reported under `name`.
///
/// This is the building block of [`Describe::from_mapping`](crate::Describe::from_mapping).
pub fn take_field<T: FromDynamic>(mapping: &mut Mapping, name: &str) -> Result<T, InstantiationError> {
    match mapping.remove(name) {
        Some(value) => T::from_dynamic(value).map_err(|err| err.in_field(name)),
        None => T::from_missing().ok_or_else(|| InstantiationError::missing(name, type_name::<T>())),
    }
}

/// Like [`take_field`], but for fields excluded from matching: a missing or
/// unconvertible value yields `T::default()`.
pub fn take_ignored_field<T: FromDynamic + Default>(mapping: &mut Mapping, name: &str) -> T {
    mapping
        .remove(name)
        .and_then(|value| T::from_dynamic(value).ok())
        .unwrap_or_default()
}
