use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use bf_utils::hash::{FixedHashState, HashMap};

use super::FieldDescriptor;
use crate::error::InstantiationError;
use crate::value::Mapping;
use crate::{Describe, Record};

type InstantiateFn = fn(Mapping) -> Result<Box<dyn Record>, InstantiationError>;

fn instantiate_boxed<T: Describe>(mapping: Mapping) -> Result<Box<dyn Record>, InstantiationError> {
    T::from_mapping(mapping).map(|record| Box::new(record) as Box<dyn Record>)
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Static metadata of one record type.
///
/// Holds the declared fields in declaration order, the alias table in both
/// directions, the keys the type supplies through manual overrides, and a
/// constructor producing a boxed record from a canonical-keyed mapping.
///
/// Descriptors are immutable once built. They are normally created by
/// [`#[derive(Record)]`](crate::derive::Record) and cached in a
/// [`DescriptorCell`](super::DescriptorCell).
///
/// # Alias collisions
///
/// If two fields declare the same alias, the first declared field keeps it and
/// a warning is logged. The later field is then known by its canonical name
/// only. The derive macro rejects such declarations up front.
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    type_path: &'static str,
    fields: Box<[FieldDescriptor]>,
    field_indices: HashMap<&'static str, usize>,
    // external name -> canonical name
    canonical_names: HashMap<&'static str, &'static str>,
    override_keys: Box<[&'static str]>,
    instantiate: InstantiateFn,
}

impl TypeDescriptor {
    /// Create a new [`TypeDescriptor`] for `T`.
    ///
    /// `type_name` is the short name used in diagnostics and registry lookups.
    /// The order of `fields` is kept as declaration order.
    pub fn new<T: Describe>(type_name: &'static str, mut fields: Vec<FieldDescriptor>) -> Self {
        let mut field_indices = HashMap::with_hasher(FixedHashState);
        let mut canonical_names = HashMap::with_hasher(FixedHashState);

        for (index, field) in fields.iter_mut().enumerate() {
            field_indices.insert(field.name(), index);

            if let Some(alias) = field.alias() {
                if let Some(first) = canonical_names.get(alias) {
                    log::warn!(
                        "{type_name}: fields `{first}` and `{}` share the alias `{alias}`, keeping `{first}`",
                        field.name(),
                    );
                    field.clear_alias();
                } else {
                    canonical_names.insert(alias, field.name());
                }
            }
        }

        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            type_path: core::any::type_name::<T>(),
            fields: fields.into_boxed_slice(),
            field_indices,
            canonical_names,
            override_keys: Box::new([]),
            instantiate: instantiate_boxed::<T>,
        }
    }

    /// Declares the keys supplied through [`Record::manual_overrides`].
    ///
    /// Override keys are neither required nor counted as extra keys while
    /// matching.
    pub fn with_override_keys(mut self, keys: &[&'static str]) -> Self {
        self.override_keys = keys.into();
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the short type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the [`FieldDescriptor`] for the given canonical `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(*self.field_indices.get(name)?)
    }

    /// Returns the index for the given field `name`, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the external name of field `name`, if it has an alias.
    pub fn alias_of(&self, name: &str) -> Option<&'static str> {
        self.field(name)?.alias()
    }

    /// Inverts an alias: maps an external name to its canonical field name.
    #[inline]
    pub fn canonical_name(&self, external: &str) -> Option<&'static str> {
        self.canonical_names.get(external).copied()
    }

    /// Iterates `(canonical, external)` alias pairs.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| Some((field.name(), field.alias()?)))
    }

    /// Names of fields excluded from matching.
    pub fn read_ignored(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.is_read_ignored()).map(FieldDescriptor::name)
    }

    /// Names of fields excluded from flattening.
    pub fn write_ignored(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.is_write_ignored()).map(FieldDescriptor::name)
    }

    /// Names of fields exempt from kind checks.
    pub fn type_lenient(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.is_lenient()).map(FieldDescriptor::name)
    }

    /// Fields a mapping may carry while matching this type: every declared
    /// field that is neither read-ignored nor an override key.
    pub fn matched_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields
            .iter()
            .filter(|f| !f.is_read_ignored() && !self.is_override_key(f.name()))
    }

    /// Fields a mapping must contain to match this type: the
    /// [matched fields](Self::matched_fields) that are not optional.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.matched_fields().filter(|f| !f.is_optional())
    }

    #[inline]
    pub fn override_keys(&self) -> &[&'static str] {
        &self.override_keys
    }

    #[inline]
    pub fn is_override_key(&self, key: &str) -> bool {
        self.override_keys.contains(&key)
    }

    /// Builds a boxed record from a mapping keyed by canonical names.
    #[inline]
    pub fn instantiate(&self, mapping: Mapping) -> Result<Box<dyn Record>, InstantiationError> {
        (self.instantiate)(mapping)
    }
}

impl core::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_path", &self.type_path)
            .field("fields", &self.fields)
            .field("override_keys", &self.override_keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::TypeDescriptor;
    use crate::Describe;
    use crate::de::normalize;
    use crate::derive::Record;
    use crate::info::FieldDescriptor;
    use crate::value::{Mapping, Value};

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Pair {
        a: i64,
        b: i64,
    }

    #[test]
    fn names_and_paths() {
        let descriptor = Pair::descriptor();
        assert_eq!(descriptor.type_name(), "Pair");
        assert!(descriptor.type_path().ends_with("::Pair"));
        assert_ne!(descriptor.type_path(), descriptor.type_name());
        assert_eq!(descriptor.index_of("b"), Some(1));
    }

    #[test]
    fn first_field_keeps_a_shared_alias() {
        let descriptor = TypeDescriptor::new::<Pair>(
            "Pair",
            vec![
                FieldDescriptor::new::<i64>("a").with_alias("v"),
                FieldDescriptor::new::<i64>("b").with_alias("v"),
            ],
        );

        assert_eq!(descriptor.canonical_name("v"), Some("a"));
        assert_eq!(descriptor.alias_of("a"), Some("v"));
        assert_eq!(descriptor.alias_of("b"), None);
        assert_eq!(descriptor.aliases().collect::<Vec<_>>(), [("a", "v")]);

        let mut mapping = Mapping::default();
        mapping.insert("v".into(), Value::from(1_i64));
        mapping.insert("b".into(), Value::from(2_i64));

        let record = descriptor.instantiate(normalize(&descriptor, mapping)).unwrap();
        assert_eq!(record.downcast_ref::<Pair>(), Some(&Pair { a: 1, b: 2 }));
    }
}
