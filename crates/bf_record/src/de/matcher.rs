use alloc::boxed::Box;
use alloc::string::String;

use super::Resolved;
use crate::Record;
use crate::error::InstantiationError;
use crate::info::{FieldDescriptor, FieldKind, TypeDescriptor};
use crate::value::{Mapping, Value};

/// Default nesting limit of a [`Matcher`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

// -----------------------------------------------------------------------------
// Candidate

/// A candidate that passed every check, with its distance.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    descriptor: &'static TypeDescriptor,
    distance: usize,
}

impl Candidate {
    #[inline]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Number of keys in the mapping that are not matched fields.
    #[inline]
    pub const fn distance(&self) -> usize {
        self.distance
    }

    #[inline]
    pub const fn is_exact(&self) -> bool {
        self.distance == 0
    }

    /// Normalizes `mapping` for this candidate and instantiates it.
    pub fn instantiate(&self, mapping: Mapping) -> Result<Box<dyn Record>, InstantiationError> {
        self.descriptor.instantiate(normalize(self.descriptor, mapping))
    }
}

/// Rewrites `mapping` into the canonical form expected by
/// [`Describe::from_mapping`](crate::Describe::from_mapping).
///
/// Alias keys are renamed to their canonical field, replacing a literal
/// canonical key if both are present. Integers stored under float fields
/// are converted to floats. Other keys are kept as they are.
pub fn normalize(descriptor: &TypeDescriptor, mut mapping: Mapping) -> Mapping {
    for (canonical, external) in descriptor.aliases() {
        if let Some(value) = mapping.remove(external) {
            mapping.insert(String::from(canonical), value);
        }
    }

    for field in descriptor.fields() {
        if field.kind() == FieldKind::Float
            && !field.is_lenient()
            && let Some(value) = mapping.get_mut(field.name())
        {
            match *value {
                Value::Integer(v) => *value = Value::Float(v as f64),
                Value::UnsignedInteger(v) => *value = Value::Float(v as f64),
                _ => {}
            }
        }
    }

    mapping
}

// -----------------------------------------------------------------------------
// Matcher

/// Resolves value trees against an ordered candidate list.
///
/// Candidate order is the tie-break: of two passing candidates at the same
/// distance, the earlier one wins.
///
/// # Examples
///
/// ```
/// use bf_record::Describe;
/// use bf_record::de::Matcher;
/// use bf_record::derive::Record;
/// use bf_record::value::Value;
///
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// #[derive(Record, Debug, Clone, PartialEq)]
/// struct Point3D {
///     x: f64,
///     y: f64,
///     z: f64,
/// }
///
/// let candidates = [Point::descriptor(), Point3D::descriptor()];
/// let matcher = Matcher::new(&candidates);
///
/// let input: Value = [("x", 1.0), ("y", 2.0), ("z", 3.0)].into_iter().collect();
/// let best = matcher.best_match(input.as_mapping().unwrap()).unwrap();
///
/// assert_eq!(best.descriptor().type_name(), "Point3D");
/// assert!(best.is_exact());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    candidates: &'a [&'static TypeDescriptor],
    max_depth: usize,
}

impl<'a> Matcher<'a> {
    #[inline]
    pub const fn new(candidates: &'a [&'static TypeDescriptor]) -> Self {
        Self {
            candidates,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deep below the root mappings and sequences are still
    /// resolved. Deeper subtrees are returned untouched.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn candidates(&self) -> &'a [&'static TypeDescriptor] {
        self.candidates
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves every mapping of `value`, innermost first.
    ///
    /// Scalars and records are returned as they are.
    pub fn resolve(&self, value: Value) -> Value {
        self.resolve_at(&value, 0)
    }

    /// Resolves `mapping` after resolving its nested values.
    pub fn resolve_mapping(&self, mapping: Mapping) -> Resolved {
        self.resolve_mapping_at(&mapping, 0)
    }

    // The input tree is only borrowed: a failed instantiation rebuilds its
    // mapping from the source instead of keeping a copy of every level.
    fn resolve_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::Mapping(mapping) => self.resolve_mapping_at(mapping, depth).into_value(),
            Value::Sequence(items) => {
                if self.too_deep(depth) {
                    return value.clone();
                }
                Value::Sequence(
                    items
                        .iter()
                        .map(|item| self.resolve_at(item, depth + 1))
                        .collect(),
                )
            }
            other => other.clone(),
        }
    }

    /// Resolves the values of `source` without matching `source` itself.
    fn resolve_entries(&self, source: &Mapping, depth: usize) -> Mapping {
        source
            .iter()
            .map(|(key, value)| (key.clone(), self.resolve_at(value, depth + 1)))
            .collect()
    }

    fn resolve_mapping_at(&self, source: &Mapping, depth: usize) -> Resolved {
        if self.too_deep(depth) {
            return Resolved::Mapping(source.clone());
        }

        let mut mapping = self.resolve_entries(source, depth);

        let Some(candidate) = self.best_match(&mapping) else {
            return Resolved::Mapping(mapping);
        };

        self.restore_mapping_fields(candidate.descriptor, source, &mut mapping, depth);

        match candidate.instantiate(mapping) {
            Ok(record) => Resolved::Record(record),
            Err(err) => {
                log::debug!(
                    "{}: instantiation failed, keeping the mapping: {err}",
                    candidate.descriptor.type_name(),
                );
                Resolved::Mapping(self.resolve_entries(source, depth))
            }
        }
    }

    /// Mapping-typed fields of the winner receive nested mappings as mappings.
    ///
    /// A nested mapping that resolved to a record of its own is put back in
    /// its unmatched form, with its values still resolved.
    fn restore_mapping_fields(
        &self,
        descriptor: &TypeDescriptor,
        source: &Mapping,
        mapping: &mut Mapping,
        depth: usize,
    ) {
        for field in descriptor.matched_fields() {
            if field.kind() != FieldKind::Mapping {
                continue;
            }

            for key in [field.alias(), Some(field.name())].into_iter().flatten() {
                if let Some(Value::Mapping(nested)) = source.get(key)
                    && let Some(slot) = mapping.get_mut(key)
                    && matches!(slot, Value::Record(_))
                {
                    *slot = Value::Mapping(self.resolve_entries(nested, depth + 1));
                }
            }
        }
    }

    fn too_deep(&self, depth: usize) -> bool {
        if depth > self.max_depth {
            log::warn!(
                "value tree is nested deeper than {}, leaving the subtree unresolved",
                self.max_depth,
            );
            true
        } else {
            false
        }
    }

    /// Returns the best passing candidate for `mapping`, `None` if every
    /// candidate is rejected.
    ///
    /// `mapping` is examined as it is: nested values are not resolved first.
    pub fn best_match(&self, mapping: &Mapping) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for &descriptor in self.candidates {
            let Some(distance) = distance(descriptor, mapping) else {
                continue;
            };

            if best.is_some_and(|best| distance >= best.distance) {
                continue;
            }

            if !kinds_match(descriptor, mapping) {
                continue;
            }

            best = Some(Candidate {
                descriptor,
                distance,
            });

            if distance == 0 {
                break;
            }
        }

        if let Some(best) = best {
            log::trace!(
                "matched {} at distance {}",
                best.descriptor.type_name(),
                best.distance,
            );
        }

        best
    }
}

// -----------------------------------------------------------------------------
// Scoring

/// The value of `field` in `mapping`, preferring the alias key.
fn lookup<'m>(field: &FieldDescriptor, mapping: &'m Mapping) -> Option<&'m Value> {
    field
        .alias()
        .and_then(|alias| mapping.get(alias))
        .or_else(|| mapping.get(field.name()))
}

/// Counts the keys of `mapping` that are not matched fields, `None` if a
/// required field is missing.
fn distance(descriptor: &TypeDescriptor, mapping: &Mapping) -> Option<usize> {
    if let Some(field) = descriptor
        .required_fields()
        .find(|field| lookup(field, mapping).is_none())
    {
        log::debug!(
            "{}: missing required field `{}`",
            descriptor.type_name(),
            field.name(),
        );
        return None;
    }

    let extra = mapping
        .keys()
        .map(String::as_str)
        .filter(|&key| {
            let name = descriptor.canonical_name(key).unwrap_or(key);
            let matched = descriptor
                .field(name)
                .is_some_and(|field| !field.is_read_ignored());
            !matched && !descriptor.is_override_key(name)
        })
        .count();

    Some(extra)
}

/// Checks the kind of every present matched field.
fn kinds_match(descriptor: &TypeDescriptor, mapping: &Mapping) -> bool {
    for field in descriptor.matched_fields() {
        if field.is_lenient() {
            continue;
        }

        let Some(value) = lookup(field, mapping) else {
            continue;
        };

        if !kind_matches(field, value) {
            log::debug!(
                "{}: field `{}` expects {:?}, found {}",
                descriptor.type_name(),
                field.name(),
                field.kind(),
                value.kind(),
            );
            return false;
        }
    }
    true
}

fn kind_matches(field: &FieldDescriptor, value: &Value) -> bool {
    match (field.kind(), value) {
        (FieldKind::Any, _) => true,
        (_, Value::Null) => field.is_optional(),
        (FieldKind::Bool, Value::Bool(_)) => true,
        (
            FieldKind::Integer | FieldKind::UnsignedInteger | FieldKind::Float,
            Value::Integer(_) | Value::UnsignedInteger(_),
        ) => true,
        (FieldKind::Float, Value::Float(_)) => true,
        (FieldKind::String, Value::String(_)) => true,
        (FieldKind::Sequence, Value::Sequence(_)) => true,
        (FieldKind::Mapping, Value::Mapping(_) | Value::Record(_)) => true,
        (FieldKind::Record(nested), Value::Record(record)) => {
            record.type_descriptor().type_id() == nested().type_id()
        }
        (FieldKind::Record(nested), Value::Mapping(mapping)) => {
            let nested = nested();
            distance(nested, mapping).is_some() && kinds_match(nested, mapping)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Matcher;
    use crate::Describe;
    use crate::de::Resolved;
    use crate::derive::Record;
    use crate::info::TypeDescriptor;
    use crate::value::{Mapping, Value};

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
    struct Label {
        #[record(alias = "t")]
        text: String,
        size: Option<u32>,
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Marker {
        at: Point,
        label: Label,
    }

    fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Mapping {
        entries.into_iter().map(|(k, v)| (String::from(k), v)).collect()
    }

    fn resolve(entries: Mapping, candidates: &[&'static TypeDescriptor]) -> Resolved {
        Matcher::new(candidates).resolve_mapping(entries)
    }

    #[test]
    fn integers_become_floats() {
        let input = mapping([("x", Value::from(1)), ("y", Value::from(2.5))]);
        let point = resolve(input, &[Point::descriptor()]).downcast::<Point>().unwrap();
        assert_eq!(point, Point { x: 1.0, y: 2.5 });
    }

    #[test]
    fn exact_match_wins_in_any_order() {
        let input = mapping([("x", 1.0.into()), ("y", 2.0.into()), ("z", 3.0.into())]);
        let expected = Point3D { x: 1.0, y: 2.0, z: 3.0 };

        for candidates in [
            [Point::descriptor(), Point3D::descriptor()],
            [Point3D::descriptor(), Point::descriptor()],
        ] {
            let found = resolve(input.clone(), &candidates).downcast::<Point3D>().unwrap();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn closest_partial_match_wins() {
        let input = mapping([("x", 1.0.into()), ("y", 2.0.into()), ("w", 0.into())]);
        let matcher = Matcher::new(&[]);
        assert!(matcher.best_match(&input).is_none());

        let candidates = [Point::descriptor(), Point3D::descriptor()];
        let best = Matcher::new(&candidates).best_match(&input).unwrap();
        assert_eq!(best.descriptor().type_name(), "Point");
        assert_eq!(best.distance(), 1);
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        #[derive(Record, Debug, Clone, PartialEq)]
        struct Other {
            x: f64,
            y: f64,
        }

        let input = mapping([("x", 1.0.into()), ("y", 2.0.into())]);

        let candidates = [Other::descriptor(), Point::descriptor()];
        assert!(resolve(input.clone(), &candidates).downcast::<Other>().is_ok());

        let candidates = [Point::descriptor(), Other::descriptor()];
        assert!(resolve(input, &candidates).downcast::<Point>().is_ok());
    }

    #[test]
    fn unmatched_mappings_pass_through() {
        let input = mapping([("x", 1.0.into()), ("name", "n".into())]);
        let output = resolve(input.clone(), &[Point::descriptor(), Label::descriptor()]);
        assert_eq!(output, Resolved::Mapping(input));
    }

    #[test]
    fn kind_mismatch_rejects() {
        let input = mapping([("x", "1".into()), ("y", 2.0.into())]);
        assert!(!resolve(input, &[Point::descriptor()]).is_record());

        let input = mapping([("text", "a".into()), ("size", 1.5.into())]);
        assert!(!resolve(input, &[Label::descriptor()]).is_record());
    }

    #[test]
    fn aliases_and_optionals() {
        let candidates = [Label::descriptor()];

        let label = resolve(mapping([("t", "a".into())]), &candidates).downcast::<Label>().unwrap();
        assert_eq!(label, Label { text: String::from("a"), size: None });

        let input = mapping([("t", "alias".into()), ("text", "literal".into()), ("size", Value::Null)]);
        let label = resolve(input, &candidates).downcast::<Label>().unwrap();
        assert_eq!(label.text, "alias");
    }

    #[test]
    fn nested_records_resolve_bottom_up() {
        let input = mapping([
            ("at", Value::Mapping(mapping([("x", 0.into()), ("y", 1.into())]))),
            ("label", Value::Mapping(mapping([("t", "here".into())]))),
        ]);
        let expected = Marker {
            at: Point { x: 0.0, y: 1.0 },
            label: Label { text: String::from("here"), size: None },
        };

        let all = [Marker::descriptor(), Point::descriptor(), Label::descriptor()];
        assert_eq!(resolve(input.clone(), &all).downcast::<Marker>().unwrap(), expected);

        // Nested types do not need to be candidates themselves.
        let only_outer = [Marker::descriptor()];
        assert_eq!(resolve(input, &only_outer).downcast::<Marker>().unwrap(), expected);
    }

    #[test]
    fn map_fields_keep_nested_mappings() {
        #[derive(Record, Debug, Clone, PartialEq)]
        struct Stats {
            name: String,
            counters: BTreeMap<String, u32>,
        }

        let counters = mapping([("x", 3.into()), ("y", 4.into())]);
        let input = mapping([("name", "s".into()), ("counters", Value::Mapping(counters))]);
        let expected = Stats {
            name: String::from("s"),
            counters: BTreeMap::from([(String::from("x"), 3), (String::from("y"), 4)]),
        };

        // `counters` alone looks like a `Point`.
        let candidates = [Stats::descriptor(), Point::descriptor()];
        assert_eq!(resolve(input.clone(), &candidates).downcast::<Stats>().unwrap(), expected);

        let candidates = [Point::descriptor(), Stats::descriptor()];
        assert_eq!(resolve(input, &candidates).downcast::<Stats>().unwrap(), expected);
    }

    #[test]
    fn failed_instantiation_keeps_resolved_values() {
        #[derive(Record, Debug, Clone, PartialEq)]
        struct Tiny {
            n: u8,
        }

        let point = mapping([("x", 1.0.into()), ("y", 2.0.into())]);
        let input = mapping([("n", 300.into()), ("p", Value::Mapping(point))]);

        let Resolved::Mapping(output) = resolve(input, &[Tiny::descriptor(), Point::descriptor()]) else {
            panic!("`n` does not fit into `u8`");
        };
        assert_eq!(output["n"], Value::from(300));
        assert_eq!(output["p"].downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn sequences_are_resolved_element_wise() {
        let point = Value::Mapping(mapping([("x", 1.0.into()), ("y", 2.0.into())]));
        let tree = Value::Sequence(vec![point, Value::from(7), Value::Null]);

        let resolved = Matcher::new(&[Point::descriptor()]).resolve(tree);
        let items: Vec<_> = resolved.as_sequence().unwrap().to_vec();

        assert_eq!(items[0].downcast_record::<Point>(), Some(&Point { x: 1.0, y: 2.0 }));
        assert_eq!(items[1], Value::from(7));
        assert!(items[2].is_null());
    }

    #[test]
    fn depth_limit_leaves_subtrees_unresolved() {
        let point = Value::Mapping(mapping([("x", 1.0.into()), ("y", 2.0.into())]));
        let tree = Value::Sequence(vec![Value::Sequence(vec![point.clone()])]);

        let candidates = [Point::descriptor()];
        let shallow = Matcher::new(&candidates).with_max_depth(1).resolve(tree.clone());
        assert_eq!(shallow, tree);

        let deep = Matcher::new(&candidates).with_max_depth(2).resolve(tree);
        let inner = &deep.as_sequence().unwrap()[0].as_sequence().unwrap()[0];
        assert!(inner.downcast_record::<Point>().is_some());
    }
}
