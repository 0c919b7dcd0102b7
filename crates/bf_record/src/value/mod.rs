//! The dynamic value model.
//!
//! [`Value`] is the closed, tagged representation of anything a JSON-like
//! decoder can produce, plus [`Value::Record`], which holds a record that the
//! [matcher](crate::de) has already materialized.
//!
//! Values are plain data. Conversions to and from typed fields live in
//! [`ToDynamic`](crate::ToDynamic) / [`FromDynamic`](crate::FromDynamic).

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use kind::ValueKind;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bf_utils::hash::HashMap;

use crate::Record;

/// A string-keyed mapping of values.
///
/// Keys are unique and iteration order is not meaningful.
/// Create one with `Mapping::default()`.
pub type Mapping = HashMap<String, Value>;

// -----------------------------------------------------------------------------
// Value

/// Any serializable value.
///
/// # Examples
///
/// ```
/// use bf_record::value::{Mapping, Value, ValueKind};
///
/// let mut mapping = Mapping::default();
/// mapping.insert("x".into(), Value::from(1_i64));
/// mapping.insert("y".into(), Value::from(2.5));
///
/// let value = Value::Mapping(mapping);
/// assert_eq!(value.kind(), ValueKind::Mapping);
/// assert_eq!(value.get("y").and_then(Value::as_f64), Some(2.5));
/// ```
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    /// A materialized record.
    Record(Box<dyn Record>),
}

impl Value {
    /// Returns the variant tag.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::UnsignedInteger(_) => ValueKind::UnsignedInteger,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
            Self::Record(_) => ValueKind::Record,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::UnsignedInteger(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(v) => u64::try_from(*v).ok(),
            Self::UnsignedInteger(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64`, converting integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::UnsignedInteger(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(v) => Some(&**v),
            _ => None,
        }
    }

    /// Downcasts a [`Value::Record`] to a concrete record type.
    #[inline]
    pub fn downcast_record<T: Record>(&self) -> Option<&T> {
        self.as_record()?.downcast_ref::<T>()
    }

    /// Looks up `key` if this is a mapping.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }

    /// Unwraps a [`Value::Mapping`], returning the value back on mismatch.
    pub fn into_mapping(self) -> Result<Mapping, Value> {
        match self {
            Self::Mapping(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Unwraps a [`Value::Record`], returning the value back on mismatch.
    pub fn into_record(self) -> Result<Box<dyn Record>, Value> {
        match self {
            Self::Record(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Bool(v) => Self::Bool(*v),
            Self::Integer(v) => Self::Integer(*v),
            Self::UnsignedInteger(v) => Self::UnsignedInteger(*v),
            Self::Float(v) => Self::Float(*v),
            Self::String(v) => Self::String(v.clone()),
            Self::Sequence(v) => Self::Sequence(v.clone()),
            Self::Mapping(v) => Self::Mapping(v.clone()),
            Self::Record(v) => Self::Record(v.clone_record()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::UnsignedInteger(a), Self::UnsignedInteger(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a.record_eq(&**b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            Self::UnsignedInteger(v) => f.debug_tuple("UnsignedInteger").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Sequence(v) => f.debug_tuple("Sequence").field(v).finish(),
            Self::Mapping(v) => f.debug_tuple("Mapping").field(v).finish(),
            Self::Record(v) => f.debug_tuple("Record").field(v).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// From

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from!(Integer as i64: i8, i16, i32, i64, isize);
impl_from!(UnsignedInteger as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Value {
    #[inline]
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Box<dyn Record>> for Value {
    #[inline]
    fn from(value: Box<dyn Record>) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapping, Value, ValueKind};
    use alloc::vec;

    #[test]
    fn kinds() {
        assert_eq!(Value::from(-1_i32).kind(), ValueKind::Integer);
        assert_eq!(Value::from(1_u8).kind(), ValueKind::UnsignedInteger);
        assert_eq!(Value::from(1.0_f32).kind(), ValueKind::Float);
        assert_eq!(Value::from("a").kind(), ValueKind::String);
        assert_eq!(Value::from(None::<bool>).kind(), ValueKind::Null);
        assert_eq!(Value::from(vec![Value::Null]).kind(), ValueKind::Sequence);
        assert_eq!(Value::from(Mapping::default()).kind(), ValueKind::Mapping);
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::UnsignedInteger(3).as_i64(), Some(3));
        assert_eq!(Value::UnsignedInteger(u64::MAX).as_i64(), None);
        assert_eq!(Value::Integer(-3).as_u64(), None);
        assert_eq!(Value::Integer(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::String("1".into()).as_f64(), None);
    }

    #[test]
    fn deep_equality() {
        let a: Value = [("x", Value::from(1_i64)), ("y", vec![Value::Null].into())]
            .into_iter()
            .collect();
        let b: Value = [("y", vec![Value::Null].into()), ("x", Value::from(1_i64))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_ne!(a, Value::Null);
        // Integer variants stay distinct.
        assert_ne!(Value::Integer(1), Value::UnsignedInteger(1));
    }
}
