use alloc::boxed::Box;
use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use bf_utils::hash::{FixedHashState, HashMap};

use super::TypeDescriptor;

// -----------------------------------------------------------------------------
// DescriptorCell

/// Populate-once storage for the descriptor of a non-generic type.
///
/// Intended to be used as a `static` inside [`Describe::descriptor`](crate::Describe::descriptor).
pub struct DescriptorCell(OnceLock<TypeDescriptor>);

impl DescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Storage for the descriptors of every instantiation of a generic type.
///
/// A `static` in a generic function is shared by all instantiations, so
/// entries are keyed by `TypeId`. Each descriptor is leaked once and lives for
/// the rest of the process.
pub struct GenericDescriptorCell(RwLock<HashMap<TypeId, &'static TypeDescriptor>>);

impl GenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(FixedHashState)))
    }

    /// Returns the descriptor for `T`, building it with `f` on first access.
    pub fn get_or_insert<T: 'static>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        let type_id = TypeId::of::<T>();

        if let Some(descriptor) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
        {
            return descriptor;
        }

        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table
            .entry(type_id)
            .or_insert_with(|| &*Box::leak(Box::new(f())))
    }
}
