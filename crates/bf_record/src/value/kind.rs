use core::fmt;

/// The variant tag of a [`Value`](super::Value).
///
/// Returned by [`Value::kind`](super::Value::kind) and used by the matcher
/// for kind compatibility and coercion decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    UnsignedInteger,
    Float,
    String,
    Sequence,
    Mapping,
    Record,
}

impl ValueKind {
    /// Returns `true` for both integer variants and `Float`.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::UnsignedInteger | Self::Float)
    }

    /// Returns `true` for `Integer` and `UnsignedInteger`.
    #[inline]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Integer | Self::UnsignedInteger)
    }

    /// Lower-case name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::UnsignedInteger => "unsigned integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
