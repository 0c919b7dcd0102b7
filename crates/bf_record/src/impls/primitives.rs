use alloc::boxed::Box;
use alloc::string::String;
use core::any::type_name;

use crate::error::{InstantiationError, NotSerializable};
use crate::info::FieldKind;
use crate::value::Value;
use crate::{FromDynamic, ToDynamic, Typed};

fn integral_from_dynamic<T>(value: Value) -> Result<T, InstantiationError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    match value {
        Value::Integer(v) => T::try_from(v).map_err(|_| InstantiationError::out_of_range(type_name::<T>())),
        Value::UnsignedInteger(v) => {
            T::try_from(v).map_err(|_| InstantiationError::out_of_range(type_name::<T>()))
        }
        other => Err(InstantiationError::mismatched(type_name::<T>(), other.kind())),
    }
}

fn float_to_dynamic<T>(value: f64) -> Result<Value, NotSerializable> {
    if value.is_finite() {
        Ok(Value::Float(value))
    } else {
        Err(NotSerializable::new(
            type_name::<T>(),
            "non-finite floating point value",
        ))
    }
}

macro_rules! impl_integral {
    ($kind:ident => $variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn field_kind() -> FieldKind {
                    FieldKind::$kind
                }
            }

            impl ToDynamic for $ty {
                #[inline]
                fn to_dynamic(&self) -> Result<Value, NotSerializable> {
                    Ok(Value::$variant(*self as $target))
                }
            }

            impl FromDynamic for $ty {
                #[inline]
                fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
                    integral_from_dynamic::<Self>(value)
                }
            }
        )*
    };
}

impl_integral!(Integer => Integer as i64: i8, i16, i32, i64, isize);
impl_integral!(UnsignedInteger => UnsignedInteger as u64: u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

impl Typed for f64 {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::Float
    }
}

impl ToDynamic for f64 {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        float_to_dynamic::<Self>(*self)
    }
}

impl FromDynamic for f64 {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value.as_f64() {
            Some(v) => Ok(v),
            None => Err(InstantiationError::mismatched("f64", value.kind())),
        }
    }
}

impl Typed for f32 {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::Float
    }
}

impl ToDynamic for f32 {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        float_to_dynamic::<Self>(f64::from(*self))
    }
}

impl FromDynamic for f32 {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value.as_f64() {
            Some(v) => Ok(v as f32),
            None => Err(InstantiationError::mismatched("f32", value.kind())),
        }
    }
}

// -----------------------------------------------------------------------------
// bool, String, char

impl Typed for bool {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::Bool
    }
}

impl ToDynamic for bool {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        Ok(Value::Bool(*self))
    }
}

impl FromDynamic for bool {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(InstantiationError::mismatched("bool", other.kind())),
        }
    }
}

impl Typed for String {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::String
    }
}

impl ToDynamic for String {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        Ok(Value::String(self.clone()))
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(InstantiationError::mismatched("String", other.kind())),
        }
    }
}

impl Typed for char {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::String
    }
}

impl ToDynamic for char {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        Ok(Value::String(String::from(*self)))
    }
}

impl FromDynamic for char {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        let kind = value.kind();
        let mut chars = value.as_str().unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ if kind == crate::value::ValueKind::String => {
                Err(InstantiationError::new("", "expected a single character"))
            }
            _ => Err(InstantiationError::mismatched("char", kind)),
        }
    }
}

// -----------------------------------------------------------------------------
// (), Value

impl Typed for () {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::Any
    }
}

impl ToDynamic for () {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        Ok(Value::Null)
    }
}

impl FromDynamic for () {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value {
            Value::Null => Ok(()),
            other => Err(InstantiationError::mismatched("()", other.kind())),
        }
    }
}

impl Typed for Value {
    #[inline]
    fn field_kind() -> FieldKind {
        FieldKind::Any
    }
}

impl ToDynamic for Value {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        crate::ser::reduce(self.clone())
    }
}

impl FromDynamic for Value {
    #[inline]
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Option, Box

impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn field_kind() -> FieldKind {
        T::field_kind()
    }

    #[inline]
    fn is_optional() -> bool {
        true
    }
}

impl<T: ToDynamic> ToDynamic for Option<T> {
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        match self {
            Some(value) => value.to_dynamic(),
            None => Ok(Value::Null),
        }
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_dynamic(value).map(Some),
        }
    }

    #[inline]
    fn from_missing() -> Option<Self> {
        Some(None)
    }
}

impl<T: Typed> Typed for Box<T> {
    #[inline]
    fn field_kind() -> FieldKind {
        T::field_kind()
    }

    #[inline]
    fn is_optional() -> bool {
        T::is_optional()
    }
}

impl<T: ToDynamic> ToDynamic for Box<T> {
    #[inline]
    fn to_dynamic(&self) -> Result<Value, NotSerializable> {
        (**self).to_dynamic()
    }

    #[inline]
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: FromDynamic> FromDynamic for Box<T> {
    #[inline]
    fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
        T::from_dynamic(value).map(Box::new)
    }

    #[inline]
    fn from_missing() -> Option<Self> {
        T::from_missing().map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Value;
    use crate::{FromDynamic, ToDynamic};

    #[test]
    fn integers_cross_signedness() {
        assert_eq!(i32::from_dynamic(Value::UnsignedInteger(7)).unwrap(), 7);
        assert_eq!(u16::from_dynamic(Value::Integer(7)).unwrap(), 7);
        assert!(u16::from_dynamic(Value::Integer(-1)).is_err());
        assert!(i8::from_dynamic(Value::UnsignedInteger(300)).is_err());
        assert!(i64::from_dynamic(Value::Float(1.0)).is_err());
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::from_dynamic(Value::UnsignedInteger(1)).unwrap(), 1.0);
        assert_eq!(f32::from_dynamic(Value::Integer(-2)).unwrap(), -2.0);
        assert!(f64::NAN.to_dynamic().is_err());
    }

    #[test]
    fn option_absence() {
        assert!(None::<u8>.is_absent());
        assert_eq!(Option::<u8>::from_missing(), Some(None));
        assert_eq!(Option::<u8>::from_dynamic(Value::Null).unwrap(), None);
        assert_eq!(u8::from_missing(), None);
    }

    #[test]
    fn chars() {
        assert_eq!(char::from_dynamic(Value::from("x")).unwrap(), 'x');
        assert!(char::from_dynamic(Value::from("xy")).is_err());
        assert!(char::from_dynamic(Value::Bool(true)).is_err());
    }
}
