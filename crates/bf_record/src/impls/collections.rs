use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::type_name;
use core::hash::{BuildHasher, Hash};

use crate::error::{InstantiationError, NotSerializable};
use crate::info::FieldKind;
use crate::value::{Mapping, Value};
use crate::{FromDynamic, ToDynamic, Typed};

fn sequence_to_dynamic<'a, T: ToDynamic + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Result<Value, NotSerializable> {
    items
        .into_iter()
        .map(ToDynamic::to_dynamic)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Sequence)
}

fn sequence_from_dynamic<C, T>(value: Value) -> Result<C, InstantiationError>
where
    C: FromIterator<T>,
    T: FromDynamic,
{
    match value {
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_dynamic(item).map_err(|err| err.in_field(&format!("{index}")))
            })
            .collect(),
        other => Err(InstantiationError::mismatched(type_name::<C>(), other.kind())),
    }
}

fn mapping_to_dynamic<'a, T: ToDynamic + 'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a T)>,
) -> Result<Value, NotSerializable> {
    let mut mapping = Mapping::default();
    for (key, value) in entries {
        mapping.insert(key.clone(), value.to_dynamic()?);
    }
    Ok(Value::Mapping(mapping))
}

fn mapping_from_dynamic<C, T>(value: Value) -> Result<C, InstantiationError>
where
    C: FromIterator<(String, T)>,
    T: FromDynamic,
{
    match value {
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, item)| match T::from_dynamic(item) {
                Ok(item) => Ok((key, item)),
                Err(err) => Err(err.in_field(&key)),
            })
            .collect(),
        Value::Record(record) => match crate::ser::flatten(&*record) {
            Ok(entries) => mapping_from_dynamic(Value::Mapping(entries)),
            Err(err) => Err(InstantiationError::new(String::new(), err.to_string())),
        },
        other => Err(InstantiationError::mismatched(type_name::<C>(), other.kind())),
    }
}

macro_rules! impl_sequence {
    ($(<$($param:ident),*> $ty:ty { $($bound:tt)* })*) => {
        $(
            impl<$($param),*> Typed for $ty
            where
                T: Typed,
            {
                #[inline]
                fn field_kind() -> FieldKind {
                    FieldKind::Sequence
                }
            }

            impl<$($param),*> ToDynamic for $ty
            where
                T: ToDynamic,
            {
                #[inline]
                fn to_dynamic(&self) -> Result<Value, NotSerializable> {
                    sequence_to_dynamic(self)
                }
            }

            impl<$($param),*> FromDynamic for $ty
            where
                T: FromDynamic,
                $($bound)*
            {
                #[inline]
                fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
                    sequence_from_dynamic(value)
                }
            }
        )*
    };
}

impl_sequence! {
    <T> Vec<T> {}
    <T> VecDeque<T> {}
    <T> BTreeSet<T> { T: Ord }
    <T, S> std::collections::HashSet<T, S> { T: Eq + Hash, S: BuildHasher + Default }
    <T, S> bf_utils::hash::hashbrown::HashSet<T, S> { T: Eq + Hash, S: BuildHasher + Default }
}

macro_rules! impl_string_map {
    ($(<$($param:ident),*> $ty:ty { $($bound:tt)* })*) => {
        $(
            impl<$($param),*> Typed for $ty
            where
                T: Typed,
            {
                #[inline]
                fn field_kind() -> FieldKind {
                    FieldKind::Mapping
                }
            }

            impl<$($param),*> ToDynamic for $ty
            where
                T: ToDynamic,
            {
                #[inline]
                fn to_dynamic(&self) -> Result<Value, NotSerializable> {
                    mapping_to_dynamic(self)
                }
            }

            impl<$($param),*> FromDynamic for $ty
            where
                T: FromDynamic,
                $($bound)*
            {
                #[inline]
                fn from_dynamic(value: Value) -> Result<Self, InstantiationError> {
                    mapping_from_dynamic(value)
                }
            }
        )*
    };
}

impl_string_map! {
    <T> BTreeMap<String, T> {}
    <T, S> std::collections::HashMap<String, T, S> { S: BuildHasher + Default }
    <T, S> bf_utils::hash::hashbrown::HashMap<String, T, S> { S: BuildHasher + Default }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::FieldKind;
    use crate::value::{Mapping, Value};
    use crate::{FromDynamic, ToDynamic, Typed};

    #[test]
    fn sequences() {
        let value = vec![1_u8, 2, 3].to_dynamic().unwrap();
        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::UnsignedInteger(1),
                Value::UnsignedInteger(2),
                Value::UnsignedInteger(3),
            ])
        );

        let deque = VecDeque::<u8>::from_dynamic(value.clone()).unwrap();
        assert_eq!(deque, VecDeque::from([1, 2, 3]));

        let set = BTreeSet::<i32>::from_dynamic(value).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(<Vec<f64> as Typed>::field_kind(), FieldKind::Sequence);
    }

    #[test]
    fn element_errors_carry_the_index() {
        let value = Value::Sequence(vec![Value::from(1_u8), Value::from("two")]);
        let err = Vec::<u8>::from_dynamic(value).unwrap_err();
        assert_eq!(err.field_name, "1");
    }

    #[test]
    fn string_keyed_maps() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), true);
        let value = map.to_dynamic().unwrap();
        assert_eq!(value.get("a"), Some(&Value::Bool(true)));

        let back = std::collections::HashMap::<String, bool>::from_dynamic(value.clone()).unwrap();
        assert_eq!(back.get("a"), Some(&true));

        let mapping = Mapping::from_dynamic(value).unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(BTreeMap::<String, bool>::from_dynamic(Value::Null).is_err());
    }
}
