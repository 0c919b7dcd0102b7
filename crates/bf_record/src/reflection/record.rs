use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use crate::ToDynamic;
use crate::error::InstantiationError;
use crate::info::TypeDescriptor;
use crate::value::Mapping;

// -----------------------------------------------------------------------------
// FieldRef

/// A borrowed field of a record, handed out by [`Record::field`].
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    /// A field whose type can be reduced to a [`Value`](crate::value::Value).
    Value(&'a dyn ToDynamic),
    /// A field whose type has no reduction rule, carrying its type name.
    Opaque(&'static str),
}

// -----------------------------------------------------------------------------
// Record

/// The object-safe record contract.
///
/// A record exposes its declared fields by name, may supply *manual overrides*
/// that replace reflected output, and can be cloned and compared through
/// `dyn Record`. Usually implemented by [`#[derive(Record)]`](crate::derive::Record).
///
/// The static half of the contract (descriptor and construction) lives in
/// [`Describe`].
pub trait Record: Any + Send + Sync + Debug {
    /// The descriptor of the runtime type.
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Returns the declared field `name`, `None` if there is no such field.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Values supplied directly instead of through reflection.
    ///
    /// Keys take precedence over reflected fields (and their aliases) when
    /// flattening.
    fn manual_overrides(&self) -> Mapping {
        Mapping::default()
    }

    fn clone_record(&self) -> Box<dyn Record>;

    fn record_eq(&self, other: &dyn Record) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Record {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Record>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts the box, handing it back unchanged on mismatch.
    pub fn downcast<T: Record>(self: Box<Self>) -> Result<Box<T>, Box<dyn Record>> {
        if self.is::<T>() {
            self.into_any()
                .downcast::<T>()
                .map_err(|_| unreachable!("type checked above"))
        } else {
            Err(self)
        }
    }
}

impl Clone for Box<dyn Record> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_record()
    }
}

impl PartialEq for dyn Record {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.record_eq(other)
    }
}

// -----------------------------------------------------------------------------
// Describe

/// Static access to a record type's descriptor and constructor.
///
/// [`descriptor`](Describe::descriptor) is the `describe(type)` step of the
/// matcher. Implementations cache the descriptor in a
/// [`DescriptorCell`](crate::info::DescriptorCell), so repeated calls are cheap.
///
/// # Manually Impl
///
/// ```
/// use bf_record::{Describe, FieldRef, InstantiationError, Record};
/// use bf_record::info::{DescriptorCell, FieldDescriptor, TypeDescriptor};
/// use bf_record::value::Mapping;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Tag {
///     label: String,
/// }
///
/// impl Describe for Tag {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| {
///             TypeDescriptor::new::<Self>("Tag", vec![FieldDescriptor::new::<String>("label")])
///         })
///     }
///
///     fn from_mapping(mut mapping: Mapping) -> Result<Self, InstantiationError> {
///         Ok(Self {
///             label: bf_record::take_field(&mut mapping, "label")?,
///         })
///     }
/// }
///
/// impl Record for Tag {
///     fn type_descriptor(&self) -> &'static TypeDescriptor {
///         Self::descriptor()
///     }
///     fn field(&self, name: &str) -> Option<FieldRef<'_>> {
///         match name {
///             "label" => Some(FieldRef::Value(&self.label)),
///             _ => None,
///         }
///     }
///     fn clone_record(&self) -> Box<dyn Record> {
///         Box::new(self.clone())
///     }
///     fn record_eq(&self, other: &dyn Record) -> bool {
///         other.downcast_ref::<Self>().is_some_and(|other| self == other)
///     }
///     fn as_any(&self) -> &dyn core::any::Any {
///         self
///     }
///     fn into_any(self: Box<Self>) -> Box<dyn core::any::Any> {
///         self
///     }
/// }
///
/// let flat = bf_record::ser::flatten(&Tag { label: "a".into() }).unwrap();
/// assert_eq!(flat["label"].as_str(), Some("a"));
/// ```
pub trait Describe: Record + Sized {
    fn descriptor() -> &'static TypeDescriptor;

    /// Builds the record from a mapping keyed by canonical field names.
    ///
    /// Unknown keys are ignored.
    fn from_mapping(mapping: Mapping) -> Result<Self, InstantiationError>;
}
