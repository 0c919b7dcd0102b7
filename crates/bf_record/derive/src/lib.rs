//! See [`Record`](derive_record).

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECORD_ATTRIBUTE_NAME: &str = "record";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` implements the following traits for a struct with
/// named fields:
///
/// - `Describe`: the type descriptor and construction from a mapping
/// - `Record`: field access, cloning and comparison through `dyn Record`
/// - `Typed`, `ToDynamic`, `FromDynamic`: so the record can be a field of
///   another record
///
/// The struct must implement `Clone`, `PartialEq` and `Debug`, and be
/// `Send + Sync + 'static`. Every field type must implement `Typed`,
/// `ToDynamic` and `FromDynamic`, except `opaque` fields.
///
/// ## Type Attributes
///
/// - `#[record(name = "Name")]`: the short name of the descriptor, the
///   identifier by default.
/// - `#[record(overrides = path)]`: a `fn(&Self) -> Mapping` supplying manual
///   overrides. Overrides replace the reflected field of the same key.
/// - `#[record(override_key = "key")]`: declares a key the overrides supply.
///   Such keys are neither required nor counted as extra while matching. A
///   field of the same name is read like a `skip_read` field.
/// - `#[record(auto_register)]`: adds the type to
///   `TypeRegistry::auto_register`. Not supported on generic types.
///
/// ## Field Attributes
///
/// - `#[record(alias = "external")]`: the key used in mappings.
/// - `#[record(skip_read)]`: not required while matching. The value is taken
///   from the mapping if present and convertible, `Default::default()`
///   otherwise.
/// - `#[record(skip_write)]`: left out when flattening.
/// - `#[record(skip)]`: both of the above.
/// - `#[record(lenient)]`: the kind of the value is not checked while
///   matching.
/// - `#[record(opaque)]`: the type has no dynamic representation. It is never
///   read (the field is `Default::default()`), and flattening fails with
///   `NotSerializable` unless the field is also `skip_write`.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Record, Debug, Clone, PartialEq)]
/// #[record(overrides = Self::overrides, override_key = "kind")]
/// struct Shape {
///     #[record(alias = "n")]
///     name: String,
///     sides: Option<u32>,
///     #[record(skip)]
///     cache: Vec<f64>,
/// }
///
/// impl Shape {
///     fn overrides(&self) -> Mapping {
///         let mut overrides = Mapping::default();
///         overrides.insert("kind".into(), "shape".into());
///         overrides
///     }
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    match derive_data::RecordStruct::from_input(&ast) {
        Ok(record) => impls::impl_record(&record).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
