use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::OnceLock;

use bf_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::Describe;
use crate::de::{Matcher, Resolved};
use crate::info::TypeDescriptor;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// TypeRegistry

/// An ordered registry of record descriptors.
///
/// Registration order is kept and is the order in which the
/// [matcher](crate::de::Matcher) scores candidates.
///
/// # Example
///
/// ```
/// use bf_record::derive::Record;
/// use bf_record::registry::TypeRegistry;
/// use bf_record::value::Value;
///
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Point>();
///
/// let input: Value = [("x", 1), ("y", 2)].into_iter().collect();
/// let output = registry.resolve(input);
///
/// assert_eq!(output.downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.0 }));
/// assert!(registry.get_with_type_name("Point").is_some());
/// ```
pub struct TypeRegistry {
    candidates: Vec<&'static TypeDescriptor>,
    type_id_to_index: HashMap<TypeId, usize>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            candidates: Vec::new(),
            type_id_to_index: HashMap::with_hasher(FixedHashState),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// The global registry, populated once through
    /// [`auto_register`](Self::auto_register) and read-only afterwards.
    ///
    /// Without the `auto_register` feature it is empty.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut registry = TypeRegistry::new();
            registry.auto_register();
            registry
        })
    }

    /// Appends `T` to the candidate list if it is not registered yet.
    ///
    /// Returns `true` if the type was added.
    #[inline]
    pub fn register<T: Describe>(&mut self) -> bool {
        self.register_descriptor(T::descriptor())
    }

    /// Appends a descriptor to the candidate list if its type is not
    /// registered yet.
    ///
    /// Returns `true` if the descriptor was added.
    pub fn register_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> bool {
        let type_id = descriptor.type_id();
        if self.type_id_to_index.contains_key(&type_id) {
            return false;
        }

        self.type_id_to_index.insert(type_id, self.candidates.len());
        self.candidates.push(descriptor);

        let type_name = descriptor.type_name();
        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }

        // Assuming that the full path cannot be duplicated.
        self.type_path_to_id.insert(descriptor.type_path(), type_id);
        true
    }

    /// Registers every type annotated with `#[record(auto_register)]`.
    ///
    /// Link order is unspecified, so the collected types are appended sorted
    /// by their full type path. Repeated calls do not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if at least one type was found, `false` otherwise or
    /// when the `auto_register` feature is disabled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use bf_record::derive::Record;
    /// # use bf_record::registry::TypeRegistry;
    /// #[derive(Record, Debug, Clone, PartialEq)]
    /// #[record(auto_register)]
    /// struct Foo {
    ///     value: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.get_with_type_name("Foo").is_some());
    /// ```
    pub fn auto_register(&mut self) -> bool {
        let descriptors = crate::__macro_exports::collect_descriptors();
        let found = !descriptors.is_empty();
        for descriptor in descriptors {
            self.register_descriptor(descriptor);
        }
        found
    }

    /// Whether the type with given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_id_to_index.contains_key(&type_id)
    }

    /// Returns the descriptor of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        match self.type_id_to_index.get(&type_id) {
            Some(index) => self.candidates.get(*index).copied(),
            None => None,
        }
    }

    /// Returns the descriptor of the type with the given full type path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeDescriptor> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the descriptor of the type with the given short name.
    ///
    /// If the name is ambiguous, or no such type is registered, returns `None`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeDescriptor> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the short name is shared by several registered types.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// The registered descriptors in registration order.
    #[inline]
    pub fn candidates(&self) -> &[&'static TypeDescriptor] {
        &self.candidates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// A [`Matcher`] over the registered candidates.
    #[inline]
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.candidates)
    }

    /// Resolves `value` against the registered candidates.
    ///
    /// See [`Matcher::resolve`].
    #[inline]
    pub fn resolve(&self, value: Value) -> Value {
        self.matcher().resolve(value)
    }

    /// Resolves one mapping against the registered candidates.
    ///
    /// See [`Matcher::resolve_mapping`].
    #[inline]
    pub fn resolve_mapping(&self, mapping: Mapping) -> Resolved {
        self.matcher().resolve_mapping(mapping)
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.candidates.iter().map(|d| d.type_path()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::derive::Record;

    mod foo {
        #[derive(crate::derive::Record, Debug, Clone, PartialEq)]
        pub struct Item {
            pub id: u32,
        }
    }

    mod bar {
        #[derive(crate::derive::Record, Debug, Clone, PartialEq)]
        pub struct Item {
            pub name: alloc::string::String,
        }
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Unique {
        flag: bool,
    }

    #[test]
    fn registration_order_and_lookup() {
        let mut registry = TypeRegistry::new();

        assert!(registry.register::<Unique>());
        assert!(registry.register::<foo::Item>());
        assert!(!registry.register::<Unique>());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.candidates()[0].type_name(), "Unique");
        assert!(registry.contains(TypeId::of::<foo::Item>()));
        assert!(registry.get_with_type_name("Unique").is_some());

        let path = registry.candidates()[1].type_path();
        assert_eq!(
            registry.get_with_type_path(path).map(|d| d.type_id()),
            Some(TypeId::of::<foo::Item>())
        );
    }

    #[test]
    fn ambiguous_names_are_not_indexed() {
        let mut registry = TypeRegistry::default();
        registry.register::<foo::Item>();
        registry.register::<bar::Item>();

        assert!(registry.is_ambiguous("Item"));
        assert!(registry.get_with_type_name("Item").is_none());
        assert!(registry.get(TypeId::of::<bar::Item>()).is_some());
    }
}
