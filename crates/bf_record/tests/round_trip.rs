//! `resolve(flatten(r), [descriptor of r])` gives `r` back.

use std::collections::{BTreeMap, BTreeSet};

use bf_record::derive::Record;
use bf_record::info::FieldKind;
use bf_record::value::{Mapping, Value};
use bf_record::{Describe, DynamicRepresentable, FromDynamic, InstantiationError, de, ser};

#[derive(Record, Debug, Clone, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Record, Debug, Clone, PartialEq)]
#[record(overrides = Self::overrides, override_key = "version")]
struct Document {
    #[record(alias = "doc_title")]
    title: String,
    tags: BTreeSet<String>,
    origin: Point,
    path: Vec<Point>,
    notes: Option<String>,
    counters: BTreeMap<String, u32>,
    extra: Value,
    #[record(skip)]
    cache: Vec<u8>,
}

impl Document {
    fn overrides(&self) -> Mapping {
        let mut overrides = Mapping::default();
        overrides.insert("version".into(), Value::from(2_u8));
        overrides
    }
}

fn document() -> Document {
    Document {
        title: "Plan".into(),
        tags: ["a".to_owned(), "b".to_owned()].into(),
        origin: Point { x: 0.0, y: -1.5 },
        path: vec![Point { x: 1.0, y: 1.0 }, Point { x: 2.0, y: 4.0 }],
        notes: None,
        counters: [("views".to_owned(), 3)].into(),
        extra: Value::Sequence(vec![Value::Null, Value::from(true)]),
        cache: Vec::new(),
    }
}

#[test]
fn flatten_then_resolve() {
    let original = document();
    let flat = ser::flatten(&original).unwrap();

    assert_eq!(flat["doc_title"], Value::from("Plan"));
    assert_eq!(flat["version"], Value::from(2_u8));
    assert!(!flat.contains_key("title"));
    assert!(!flat.contains_key("notes"));
    assert!(!flat.contains_key("cache"));

    let resolved = de::resolve_mapping(flat, &[Document::descriptor()]);
    assert_eq!(resolved.downcast::<Document>().unwrap(), original);
}

#[test]
fn round_trip_through_json_text() {
    let original = document();
    let bytes = bf_record::json::to_json_vec(&original).unwrap();

    let value = bf_record::json::resolve_json(&bytes, &[Document::descriptor(), Point::descriptor()])
        .unwrap();

    let record = value.into_record().unwrap();
    assert_eq!(*record.downcast::<Document>().unwrap(), original);
}

#[test]
fn round_trip_through_ron_text() {
    let original = Point { x: 3.0, y: 0.5 };
    let text = ron::to_string(&Value::Record(Box::new(original.clone()))).unwrap();

    let value: Value = ron::from_str(&text).unwrap();
    let resolved = de::resolve(value, &[Point::descriptor()]);

    assert_eq!(resolved.downcast_record::<Point>(), Some(&original));
}

#[test]
fn manual_overrides_reappear_verbatim() {
    let original = document();
    let flat = ser::flatten(&original).unwrap();
    let resolved = de::resolve_mapping(flat, &[Document::descriptor()])
        .downcast::<Document>()
        .unwrap();

    let again = ser::flatten(&resolved).unwrap();
    assert_eq!(again["version"], Value::from(2_u8));
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Envelope {
    kind: String,
    payload: Value,
}

#[test]
fn values_nest_inside_serde_types() {
    let envelope = Envelope {
        kind: "point".into(),
        payload: Value::Record(Box::new(Point { x: 1.0, y: 2.0 })),
    };

    let text = serde_json::to_string(&envelope).unwrap();
    let back: Envelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back.kind, "point");

    let payload = de::resolve(back.payload, &[Point::descriptor()]);
    assert_eq!(payload.downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.0 }));
}

/// Represented by the list of its points, as records.
#[derive(Debug, Clone, PartialEq)]
struct Polyline(Vec<Point>);

impl DynamicRepresentable for Polyline {
    fn dynamic_representation(&self) -> Value {
        Value::Sequence(
            self.0
                .iter()
                .map(|point| Value::Record(Box::new(point.clone())))
                .collect(),
        )
    }

    fn from_dynamic_representation(value: Value) -> Result<Self, InstantiationError> {
        Vec::<Point>::from_dynamic(value).map(Polyline)
    }

    fn representation_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

bf_record::impl_dynamic_representable!(Polyline);

#[derive(Record, Debug, Clone, PartialEq)]
struct Route {
    name: String,
    line: Polyline,
}

#[test]
fn custom_representations_round_trip() {
    let original = Route {
        name: "loop".into(),
        line: Polyline(vec![Point { x: 0.0, y: 0.0 }, Point { x: 1.0, y: 2.0 }]),
    };

    let flat = ser::flatten(&original).unwrap();
    let line = flat["line"].as_sequence().unwrap();
    assert_eq!(line.len(), 2);
    assert_eq!(line[1].get("y"), Some(&Value::from(2.0)));
    assert!(line.iter().all(|point| point.as_record().is_none()));

    let resolved = de::resolve_mapping(flat.clone(), &[Route::descriptor()]);
    assert_eq!(resolved.downcast::<Route>().unwrap(), original);

    let resolved = de::resolve_mapping(flat, &[Route::descriptor(), Point::descriptor()]);
    assert_eq!(resolved.downcast::<Route>().unwrap(), original);
}
