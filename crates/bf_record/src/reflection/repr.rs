use alloc::string::String;

use crate::error::InstantiationError;
use crate::info::FieldKind;
use crate::value::Value;

/// A type with a custom representation in the dynamic value model.
///
/// Wire it up with [`impl_dynamic_representable!`](crate::impl_dynamic_representable).
/// The representation is reduced again after being produced, so it may
/// itself contain records.
///
/// # Examples
///
/// ```
/// use bf_record::{DynamicRepresentable, InstantiationError, ToDynamic, impl_dynamic_representable};
/// use bf_record::info::FieldKind;
/// use bf_record::value::Value;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Rgb(u8, u8, u8);
///
/// impl DynamicRepresentable for Rgb {
///     fn dynamic_representation(&self) -> Value {
///         Value::Sequence(vec![self.0.into(), self.1.into(), self.2.into()])
///     }
///
///     fn from_dynamic_representation(value: Value) -> Result<Self, InstantiationError> {
///         let parts = value.as_sequence().unwrap_or_default();
///         match parts {
///             [r, g, b] => Ok(Rgb(
///                 r.as_u64().unwrap_or(0) as u8,
///                 g.as_u64().unwrap_or(0) as u8,
///                 b.as_u64().unwrap_or(0) as u8,
///             )),
///             _ => Err(InstantiationError::mismatched("Rgb", value.kind())),
///         }
///     }
///
///     fn representation_kind() -> FieldKind {
///         FieldKind::Sequence
///     }
/// }
///
/// impl_dynamic_representable!(Rgb);
///
/// assert_eq!(Rgb(1, 2, 3).to_dynamic().unwrap().as_sequence().map(<[_]>::len), Some(3));
/// ```
pub trait DynamicRepresentable: Sized {
    fn dynamic_representation(&self) -> Value;

    fn from_dynamic_representation(value: Value) -> Result<Self, InstantiationError>;

    /// The kind the matcher expects for fields of this type.
    ///
    /// Defaults to [`FieldKind::Any`].
    #[inline]
    fn representation_kind() -> FieldKind {
        FieldKind::Any
    }
}

/// A type represented as a string in the dynamic value model.
///
/// Wire it up with [`impl_string_representable!`](crate::impl_string_representable).
/// Fields of such types are expected to be [`FieldKind::String`].
pub trait StringRepresentable: Sized {
    fn string_representation(&self) -> String;

    /// Parses the representation back, `None` if it is not valid.
    fn from_string_representation(repr: &str) -> Option<Self>;
}

/// Implements [`Typed`], [`ToDynamic`] and [`FromDynamic`] for types
/// implementing [`DynamicRepresentable`].
///
/// [`Typed`]: crate::Typed
/// [`ToDynamic`]: crate::ToDynamic
/// [`FromDynamic`]: crate::FromDynamic
#[macro_export]
macro_rules! impl_dynamic_representable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Typed for $ty {
                #[inline]
                fn field_kind() -> $crate::info::FieldKind {
                    <Self as $crate::DynamicRepresentable>::representation_kind()
                }
            }

            impl $crate::ToDynamic for $ty {
                fn to_dynamic(
                    &self,
                ) -> ::core::result::Result<$crate::value::Value, $crate::NotSerializable> {
                    $crate::ser::reduce(
                        <Self as $crate::DynamicRepresentable>::dynamic_representation(self),
                    )
                }
            }

            impl $crate::FromDynamic for $ty {
                #[inline]
                fn from_dynamic(
                    value: $crate::value::Value,
                ) -> ::core::result::Result<Self, $crate::InstantiationError> {
                    <Self as $crate::DynamicRepresentable>::from_dynamic_representation(value)
                }
            }
        )+
    };
}

/// Implements [`Typed`], [`ToDynamic`] and [`FromDynamic`] for types
/// implementing [`StringRepresentable`].
///
/// # Examples
///
/// ```
/// use bf_record::{FromDynamic, StringRepresentable, ToDynamic, impl_string_representable};
/// use bf_record::value::Value;
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl StringRepresentable for Level {
///     fn string_representation(&self) -> String {
///         match self { Level::Low => "low".into(), Level::High => "high".into() }
///     }
///     fn from_string_representation(repr: &str) -> Option<Self> {
///         match repr { "low" => Some(Level::Low), "high" => Some(Level::High), _ => None }
///     }
/// }
///
/// impl_string_representable!(Level);
///
/// assert_eq!(Level::High.to_dynamic().unwrap(), Value::from("high"));
/// assert_eq!(Level::from_dynamic(Value::from("low")).unwrap(), Level::Low);
/// assert!(Level::from_dynamic(Value::from("mid")).is_err());
/// ```
///
/// [`Typed`]: crate::Typed
/// [`ToDynamic`]: crate::ToDynamic
/// [`FromDynamic`]: crate::FromDynamic
#[macro_export]
macro_rules! impl_string_representable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Typed for $ty {
                #[inline]
                fn field_kind() -> $crate::info::FieldKind {
                    $crate::info::FieldKind::String
                }
            }

            impl $crate::ToDynamic for $ty {
                #[inline]
                fn to_dynamic(
                    &self,
                ) -> ::core::result::Result<$crate::value::Value, $crate::NotSerializable> {
                    ::core::result::Result::Ok($crate::value::Value::String(
                        <Self as $crate::StringRepresentable>::string_representation(self),
                    ))
                }
            }

            impl $crate::FromDynamic for $ty {
                fn from_dynamic(
                    value: $crate::value::Value,
                ) -> ::core::result::Result<Self, $crate::InstantiationError> {
                    let type_name = ::core::any::type_name::<Self>();
                    match &value {
                        $crate::value::Value::String(repr) => {
                            <Self as $crate::StringRepresentable>::from_string_representation(repr)
                                .ok_or_else(|| $crate::InstantiationError::new(
                                    "",
                                    $crate::InstantiationError::default_detail(type_name),
                                ))
                        }
                        other => ::core::result::Result::Err(
                            $crate::InstantiationError::mismatched(type_name, other.kind()),
                        ),
                    }
                }
            }
        )+
    };
}
