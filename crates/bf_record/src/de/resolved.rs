use alloc::boxed::Box;

use crate::Record;
use crate::value::{Mapping, Value};

/// The outcome of resolving one mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A candidate matched and was instantiated.
    Record(Box<dyn Record>),
    /// No candidate matched, the mapping is returned as given.
    Mapping(Mapping),
}

impl Resolved {
    #[inline]
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    #[inline]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(record) => Some(&**record),
            Self::Mapping(_) => None,
        }
    }

    /// Takes the concrete record out, handing `self` back if it is a mapping
    /// or a record of another type.
    pub fn downcast<T: Record>(self) -> Result<T, Self> {
        match self {
            Self::Record(record) => record.downcast::<T>().map(|record| *record).map_err(Self::Record),
            mapping => Err(mapping),
        }
    }

    #[inline]
    pub fn into_value(self) -> Value {
        match self {
            Self::Record(record) => Value::Record(record),
            Self::Mapping(mapping) => Value::Mapping(mapping),
        }
    }
}

impl From<Resolved> for Value {
    #[inline]
    fn from(resolved: Resolved) -> Self {
        resolved.into_value()
    }
}
