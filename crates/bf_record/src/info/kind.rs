use core::any::TypeId;
use core::fmt;

use super::TypeDescriptor;
use crate::value::ValueKind;

/// The kind a declared field expects to receive.
///
/// Mirrors [`ValueKind`], with three additions:
///
/// - `Any`: fields typed as [`Value`](crate::value::Value) accept everything.
/// - `Record`: a nested record type, resolved lazily through its descriptor.
/// - `Opaque`: a field type with no representation; it never matches.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Any,
    Bool,
    Integer,
    UnsignedInteger,
    Float,
    String,
    Sequence,
    Mapping,
    Record(fn() -> &'static TypeDescriptor),
    Opaque,
}

impl FieldKind {
    /// The `TypeId` of the nested record type, if this is `Record`.
    #[inline]
    pub fn record_type_id(&self) -> Option<TypeId> {
        match self {
            Self::Record(descriptor) => Some(descriptor().type_id()),
            _ => None,
        }
    }

    /// Returns `true` for both integer kinds and `Float`.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::UnsignedInteger | Self::Float)
    }

    /// The value kind this field kind corresponds to, `None` for `Any` and `Opaque`.
    pub const fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Any | Self::Opaque => None,
            Self::Bool => Some(ValueKind::Bool),
            Self::Integer => Some(ValueKind::Integer),
            Self::UnsignedInteger => Some(ValueKind::UnsignedInteger),
            Self::Float => Some(ValueKind::Float),
            Self::String => Some(ValueKind::String),
            Self::Sequence => Some(ValueKind::Sequence),
            Self::Mapping => Some(ValueKind::Mapping),
            Self::Record(_) => Some(ValueKind::Record),
        }
    }
}

impl PartialEq for FieldKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Record(_), Self::Record(_)) => self.record_type_id() == other.record_type_id(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Opaque => f.write_str("Opaque"),
            Self::Record(descriptor) => f.debug_tuple("Record").field(&descriptor().type_name()).finish(),
            other => match other.value_kind() {
                Some(kind) => fmt::Debug::fmt(&kind, f),
                None => Ok(()),
            },
        }
    }
}
