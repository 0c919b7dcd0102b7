use core::any::type_name;

use super::FieldKind;
use crate::Typed;

/// Information for a declared (named) record field.
///
/// # Examples
///
/// ```
/// use bf_record::info::{FieldDescriptor, FieldKind};
///
/// let field = FieldDescriptor::new::<Option<f64>>("width").with_alias("w").lenient();
///
/// assert_eq!(field.name(), "width");
/// assert_eq!(field.kind(), FieldKind::Float);
/// assert!(field.is_optional());
/// assert_eq!(field.alias(), Some("w"));
/// assert_eq!(field.external_name(), "w");
/// assert!(field.is_lenient());
/// ```
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    kind: FieldKind,
    optional: bool,
    alias: Option<&'static str>,
    read_ignored: bool,
    write_ignored: bool,
    lenient: bool,
}

impl FieldDescriptor {
    /// Creates a field `name` of type `T`.
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_name: type_name::<T>(),
            kind: T::field_kind(),
            optional: T::is_optional(),
            alias: None,
            read_ignored: false,
            write_ignored: false,
            lenient: false,
        }
    }

    /// Creates a field of a type with no dynamic representation.
    ///
    /// Opaque fields are never read; flattening one fails with
    /// [`NotSerializable`](crate::NotSerializable) unless it is write-ignored.
    pub fn opaque<T: ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            type_name: type_name::<T>(),
            kind: FieldKind::Opaque,
            optional: false,
            alias: None,
            read_ignored: true,
            write_ignored: false,
            lenient: false,
        }
    }

    /// Sets the external (serialized) name.
    #[inline]
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[inline]
    pub(super) fn clear_alias(&mut self) {
        self.alias = None;
    }

    /// Excludes the field from matching.
    #[inline]
    pub fn read_ignored(mut self) -> Self {
        self.read_ignored = true;
        self
    }

    /// Excludes the field from flattening.
    #[inline]
    pub fn write_ignored(mut self) -> Self {
        self.write_ignored = true;
        self
    }

    /// Exempts the field from kind checks during matching.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Returns the canonical field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the runtime type name of the field.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    #[inline]
    pub const fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    /// The alias if there is one, the canonical name otherwise.
    #[inline]
    pub const fn external_name(&self) -> &'static str {
        match self.alias {
            Some(alias) => alias,
            None => self.name,
        }
    }

    #[inline]
    pub const fn is_read_ignored(&self) -> bool {
        self.read_ignored
    }

    #[inline]
    pub const fn is_write_ignored(&self) -> bool {
        self.write_ignored
    }

    #[inline]
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }
}
