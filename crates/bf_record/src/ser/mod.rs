//! The flattener: typed records to the dynamic value model.
//!
//! [`flatten`] walks the declared fields of a record in declaration order:
//!
//! - write-ignored fields are skipped;
//! - fields whose name, or alias, is a manual override key are skipped;
//! - aliased fields are emitted under their alias;
//! - absent optionals are left out;
//! - everything else is reduced through [`ToDynamic`](crate::ToDynamic).
//!
//! The record's [manual overrides](crate::Record::manual_overrides) are then
//! reduced and written over the result.

use alloc::format;
use alloc::vec::Vec;

use bf_utils::hash::FixedHashState;

use crate::error::NotSerializable;
use crate::value::{Mapping, Value};
use crate::{FieldRef, Record};

/// Flattens a record into a mapping keyed by external field names.
///
/// # Errors
///
/// Fails with [`NotSerializable`] if a field that is not write-ignored has no
/// reduction rule, e.g. an `opaque` field.
///
/// # Examples
///
/// ```
/// use bf_record::derive::Record;
///
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct Size {
///     #[record(alias = "w")]
///     width: u32,
///     height: Option<u32>,
/// }
///
/// let flat = bf_record::ser::flatten(&Size { width: 3, height: None }).unwrap();
///
/// assert_eq!(flat.len(), 1);
/// assert_eq!(flat["w"].as_u64(), Some(3));
/// ```
pub fn flatten(record: &dyn Record) -> Result<Mapping, NotSerializable> {
    let descriptor = record.type_descriptor();
    let overrides = record.manual_overrides();

    let mut output = Mapping::with_capacity_and_hasher(
        descriptor.field_len() + overrides.len(),
        FixedHashState,
    );

    for field in descriptor.fields() {
        let name = field.name();
        let key = field.external_name();

        if field.is_write_ignored() || overrides.contains_key(name) || overrides.contains_key(key) {
            continue;
        }

        match record.field(name) {
            Some(FieldRef::Value(value)) => {
                if value.is_absent() {
                    continue;
                }
                output.insert(key.into(), value.to_dynamic()?);
            }
            Some(FieldRef::Opaque(type_name)) => {
                return Err(NotSerializable::new(
                    type_name,
                    format!("field `{name}` of `{}` has no dynamic representation", descriptor.type_name()),
                ));
            }
            None => {
                return Err(NotSerializable::new(
                    descriptor.type_path(),
                    format!("declared field `{name}` is not reflected"),
                ));
            }
        }
    }

    for (key, value) in overrides {
        output.insert(key, reduce(value)?);
    }

    Ok(output)
}

/// Flattens every record of `records`, stopping at the first failure.
pub fn flatten_all(records: &[&dyn Record]) -> Result<Vec<Mapping>, NotSerializable> {
    records.iter().map(|record| flatten(*record)).collect()
}

/// Reduces a value tree to plain data: embedded records are flattened,
/// recursively.
///
/// # Errors
///
/// Fails if an embedded record cannot be flattened or a float is not finite.
pub fn reduce(value: Value) -> Result<Value, NotSerializable> {
    match value {
        Value::Float(v) if !v.is_finite() => Err(NotSerializable::new(
            "f64",
            "non-finite floating point value",
        )),
        Value::Sequence(items) => items
            .into_iter()
            .map(reduce)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, value)| Ok((key, reduce(value)?)))
            .collect::<Result<Mapping, _>>()
            .map(Value::Mapping),
        Value::Record(record) => flatten(&*record).map(Value::Mapping),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use crate::derive::Record;
    use crate::value::{Mapping, Value};

    #[derive(Record, Debug, Clone, PartialEq)]
    #[record(overrides = Self::overrides, override_key = "kind")]
    struct Shape {
        #[record(alias = "n")]
        name: String,
        kind: String,
        #[record(skip_write)]
        cache: Option<u32>,
        note: Option<String>,
    }

    impl Shape {
        fn overrides(&self) -> Mapping {
            let mut overrides = Mapping::default();
            overrides.insert(String::from("kind"), Value::from("shape"));
            overrides
        }
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    #[record(overrides = Self::overrides, override_key = "type")]
    struct Weighted {
        #[record(alias = "type")]
        weight: f64,
        size: u32,
    }

    impl Weighted {
        fn overrides(&self) -> Mapping {
            let mut overrides = Mapping::default();
            overrides.insert(String::from("type"), Value::from("weighted"));
            overrides
        }
    }

    #[derive(Record, Debug, Clone, PartialEq, Default)]
    struct Handle {
        id: u32,
        #[record(opaque)]
        callback: Callback,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Callback;

    fn shape() -> Shape {
        Shape {
            name: String::from("square"),
            kind: String::from("reflected"),
            cache: Some(4),
            note: None,
        }
    }

    #[test]
    fn overrides_replace_reflected_fields() {
        let flat = super::flatten(&shape()).unwrap();

        assert_eq!(flat["kind"], Value::from("shape"));
        assert_eq!(flat["n"], Value::from("square"));
        assert!(!flat.contains_key("name"));
        assert!(!flat.contains_key("cache"));
        assert!(!flat.contains_key("note"));
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn overrides_replace_aliased_fields() {
        // A NaN would not be serializable if the field were reflected.
        let flat = super::flatten(&Weighted { weight: f64::NAN, size: 2 }).unwrap();

        assert_eq!(flat["type"], Value::from("weighted"));
        assert_eq!(flat["size"], Value::from(2_u32));
        assert!(!flat.contains_key("weight"));
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn opaque_fields_are_not_serializable() {
        let err = super::flatten(&Handle::default()).unwrap_err();
        assert!(err.type_name.ends_with("Callback"));
    }

    #[test]
    fn reduce_flattens_embedded_records() {
        let tree = Value::Sequence(vec![Value::Record(alloc::boxed::Box::new(shape())), Value::Null]);
        let reduced = super::reduce(tree).unwrap();

        let items = reduced.as_sequence().unwrap();
        assert_eq!(items[0].get("n"), Some(&Value::from("square")));
        assert!(items[1].is_null());
        assert!(super::reduce(Value::Float(f64::INFINITY)).is_err());
    }

    #[test]
    fn flatten_all_stops_at_failure() {
        let handle = Handle::default();
        let square = shape();
        assert_eq!(super::flatten_all(&[&square, &square]).unwrap().len(), 2);
        assert!(super::flatten_all(&[&square, &handle]).is_err());
    }
}
