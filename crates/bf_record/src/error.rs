//! Error types.
//!
//! Only two things can fail in this crate:
//!
//! - [`NotSerializable`]: flattening met a value with no reduction rule.
//! - [`InstantiationError`]: a record could not be built from a mapping.
//!
//! Failing to find a matching candidate is *not* an error, see [`crate::de`].

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use thiserror::Error;

use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// NotSerializable

/// A value could not be reduced to a [`Value`](crate::value::Value).
///
/// Raised by [`flatten`](crate::ser::flatten) and [`reduce`](crate::ser::reduce)
/// when a field holds an opaque type or a value the value model cannot carry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{type_name}`: {detail}")]
pub struct NotSerializable {
    /// Runtime type name of the offending value.
    pub type_name: Cow<'static, str>,
    /// Free-text detail.
    pub detail: Cow<'static, str>,
}

impl NotSerializable {
    /// Default detail message.
    pub const DEFAULT_DETAIL: &'static str = "entity is not serializable";

    /// Creates an error with a custom detail.
    #[inline]
    pub fn new(
        type_name: impl Into<Cow<'static, str>>,
        detail: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }

    /// Creates an error for type `T` with the default detail.
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(core::any::type_name::<T>(), Self::DEFAULT_DETAIL)
    }
}

// -----------------------------------------------------------------------------
// InstantiationError

/// A record could not be instantiated from a mapping.
///
/// `field_name` is a dotted path when the failure happened inside a nested
/// record, e.g. `origin.x`. It is empty for failures outside any field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("entity couldn't be instantiated: error in field: {field_name}: {detail}")]
pub struct InstantiationError {
    pub field_name: String,
    pub detail: String,
}

impl InstantiationError {
    /// Creates an error for the given field.
    #[inline]
    pub fn new(field_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            detail: detail.into(),
        }
    }

    /// The detail used when a field is absent or carries the wrong kind.
    #[inline]
    pub fn default_detail(type_name: &str) -> String {
        format!("field is missing or has non `{type_name}` type")
    }

    /// A required field was absent from the mapping.
    #[inline]
    pub fn missing(field_name: &str, type_name: &str) -> Self {
        Self::new(field_name, Self::default_detail(type_name))
    }

    /// A value of the wrong kind was found, the field name is filled in later
    /// through [`in_field`](Self::in_field).
    #[inline]
    pub fn mismatched(type_name: &str, found: ValueKind) -> Self {
        Self::new(
            String::new(),
            format!("expected `{type_name}`, found {found}"),
        )
    }

    /// A numeric value did not fit into the target type.
    #[inline]
    pub fn out_of_range(type_name: &str) -> Self {
        Self::new(String::new(), format!("value out of range for `{type_name}`"))
    }

    /// Prefix the field path with `name`.
    pub fn in_field(mut self, name: &str) -> Self {
        self.field_name = if self.field_name.is_empty() {
            String::from(name)
        } else {
            format!("{name}.{}", self.field_name)
        };
        self
    }
}

// -----------------------------------------------------------------------------
// JsonError

/// Failure of [`to_json_vec`](crate::json::to_json_vec).
#[cfg(feature = "json")]
#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    NotSerializable(#[from] NotSerializable),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{InstantiationError, NotSerializable};
    use crate::value::ValueKind;
    use alloc::string::ToString;

    #[test]
    fn not_serializable_message() {
        let err = NotSerializable::of::<fn()>();
        assert_eq!(err.type_name, "fn()");
        assert_eq!(err.to_string(), "`fn()`: entity is not serializable");
    }

    #[test]
    fn nested_field_path() {
        let err = InstantiationError::mismatched("f64", ValueKind::String)
            .in_field("x")
            .in_field("origin");
        assert_eq!(err.field_name, "origin.x");
        assert_eq!(
            err.to_string(),
            "entity couldn't be instantiated: error in field: origin.x: expected `f64`, found string"
        );
    }

    #[test]
    fn missing_field_detail() {
        let err = InstantiationError::missing("y", "f64");
        assert_eq!(err.detail, "field is missing or has non `f64` type");
    }
}
