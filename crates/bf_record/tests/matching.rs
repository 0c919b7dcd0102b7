//! Matching scenarios on whole documents.

use bf_record::derive::Record;
use bf_record::registry::TypeRegistry;
use bf_record::value::{Mapping, Value};
use bf_record::{Describe, Record as _, de};

#[derive(Record, Debug, Clone, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Record, Debug, Clone, PartialEq)]
struct Point3D {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Record, Debug, Clone, PartialEq)]
struct Account {
    #[record(alias = "user_name")]
    name: String,
    #[record(lenient)]
    id: Value,
    #[record(skip_read)]
    session: Option<String>,
}

#[derive(Record, Debug, Clone, PartialEq)]
#[record(name = "Wrapper")]
struct Generic<T> {
    inner: T,
}

fn json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>();
    registry.register::<Point3D>();
    registry.register::<Account>();
    registry
}

#[test]
fn integer_coordinates_are_coerced() {
    let value = registry().resolve(json(r#"{"x": 1, "y": 2.5}"#));
    assert_eq!(value.downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.5 }));
}

#[test]
fn exact_match_beats_earlier_partial_match() {
    let value = registry().resolve(json(r#"{"x": 1.0, "y": 2.0, "z": 3.0}"#));
    assert_eq!(
        value.downcast_record::<Point3D>(),
        Some(&Point3D { x: 1.0, y: 2.0, z: 3.0 })
    );
}

#[test]
fn unmatched_input_is_preserved() {
    let input = json(r#"{"x": 1.0, "label": "origin", "tags": [1, 2]}"#);
    let output = registry().resolve(input.clone());
    assert_eq!(output, input);
}

#[test]
fn mixed_trees_resolve_where_they_can() {
    let input = json(
        r#"{
            "points": [{"x": 0, "y": 0}, {"x": 1, "y": 1, "z": 1}],
            "owner": {"user_name": "ada", "id": "u-1"},
            "meta": {"created": 1700000000}
        }"#,
    );

    let output = registry().resolve(input);
    let root = output.as_mapping().unwrap();

    let points = root["points"].as_sequence().unwrap();
    assert!(points[0].downcast_record::<Point>().is_some());
    assert!(points[1].downcast_record::<Point3D>().is_some());

    let owner = root["owner"].downcast_record::<Account>().unwrap();
    assert_eq!(owner.name, "ada");
    assert_eq!(owner.id, Value::from("u-1"));
    assert_eq!(owner.session, None);

    assert!(root["meta"].as_mapping().is_some());
}

#[test]
fn lenient_and_read_ignored_fields() {
    let candidates = [Account::descriptor()];

    let value = de::resolve(json(r#"{"user_name": "b", "id": 7, "session": "s"}"#), &candidates);
    let account = value.downcast_record::<Account>().unwrap();
    assert_eq!(account.id, Value::from(7_u64));
    assert_eq!(account.session.as_deref(), Some("s"));

    // `session` is read-ignored, so its key counts as extra but is not required.
    let best = de::Matcher::new(&candidates)
        .best_match(json(r#"{"name": "b", "id": null, "session": 1}"#).as_mapping().unwrap())
        .unwrap();
    assert_eq!(best.distance(), 1);
}

#[test]
fn generic_records_have_one_descriptor_per_instantiation() {
    let a = Generic::<u32>::descriptor();
    let b = Generic::<String>::descriptor();

    assert_eq!(a.type_name(), "Wrapper");
    assert_ne!(a.type_id(), b.type_id());
    assert!(core::ptr::eq(a, Generic::<u32>::descriptor()));

    let value = de::resolve(json(r#"{"inner": "text"}"#), &[a, b]);
    let record = value.as_record().unwrap();
    assert_eq!(record.type_descriptor().type_id(), b.type_id());
}

#[test]
fn records_compare_through_dyn() {
    let a: Box<dyn bf_record::Record> = Box::new(Point { x: 1.0, y: 2.0 });
    let b = a.clone();
    assert!(a.record_eq(&*b));
    assert!(!a.record_eq(&Point3D { x: 1.0, y: 2.0, z: 0.0 }));

    let mut mapping = Mapping::default();
    mapping.insert("p".into(), Value::Record(a));
    let copy = mapping.clone();
    assert_eq!(Value::Mapping(mapping), Value::Mapping(copy));
}
