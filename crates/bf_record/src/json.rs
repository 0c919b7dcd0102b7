//! JSON entry points.
//!
//! The value model is format-agnostic: any serde format can produce a
//! [`Value`]. These two functions pair the common case, JSON text, with the
//! matcher and the flattener.

use alloc::vec::Vec;

use crate::Record;
use crate::error::JsonError;
use crate::info::TypeDescriptor;
use crate::value::Value;

/// Decodes JSON text and resolves the result against `candidates`.
///
/// # Examples
///
/// ```
/// use bf_record::Describe;
/// use bf_record::derive::Record;
///
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let value = bf_record::json::resolve_json(br#"[{"x": 1, "y": 2.5}]"#, &[Point::descriptor()]).unwrap();
///
/// let first = &value.as_sequence().unwrap()[0];
/// assert_eq!(first.downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.5 }));
/// ```
pub fn resolve_json(
    bytes: &[u8],
    candidates: &[&'static TypeDescriptor],
) -> Result<Value, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(crate::de::resolve(value, candidates))
}

/// Flattens `record` and encodes it as JSON text.
pub fn to_json_vec(record: &dyn Record) -> Result<Vec<u8>, JsonError> {
    let mapping = crate::ser::flatten(record)?;
    Ok(serde_json::to_vec(&Value::Mapping(mapping))?)
}

#[cfg(test)]
mod tests {
    use crate::Describe;
    use crate::derive::Record;
    use crate::error::JsonError;

    #[derive(Record, Debug, Clone, PartialEq, Default)]
    struct Session {
        #[record(alias = "user_id")]
        user: u64,
        #[record(opaque)]
        socket: Socket,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Socket;

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Plain {
        #[record(alias = "user_id")]
        user: u64,
    }

    #[test]
    fn encode_then_resolve() {
        let bytes = super::to_json_vec(&Plain { user: 9 }).unwrap();
        assert_eq!(bytes, br#"{"user_id":9}"#);

        let value = super::resolve_json(&bytes, &[Plain::descriptor()]).unwrap();
        assert_eq!(value.downcast_record::<Plain>(), Some(&Plain { user: 9 }));
    }

    #[test]
    fn errors_are_kept_apart() {
        let err = super::to_json_vec(&Session::default()).unwrap_err();
        assert!(matches!(err, JsonError::NotSerializable(_)));

        assert!(super::resolve_json(b"{", &[]).is_err());
    }
}
