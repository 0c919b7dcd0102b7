//! Parsing of `#[record(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

use crate::RECORD_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container attributes.
///
/// - `#[record(name = "Name")]`
/// - `#[record(overrides = path::to::func)]`
/// - `#[record(override_key = "key")]`, repeatable
/// - `#[record(auto_register)]`
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub name: Option<LitStr>,
    pub overrides: Option<Path>,
    pub override_keys: Vec<LitStr>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if result.name.is_some() {
                        return Err(meta.error("duplicate `name` attribute"));
                    }
                    result.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("overrides") {
                    if result.overrides.is_some() {
                        return Err(meta.error("duplicate `overrides` attribute"));
                    }
                    result.overrides = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("override_key") {
                    result.override_keys.push(meta.value()?.parse()?);
                } else if meta.path.is_ident("auto_register") {
                    result.auto_register = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown record attribute, expected one of `name`, `overrides`, `override_key`, `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }

        if !result.override_keys.is_empty() && result.overrides.is_none() {
            return Err(syn::Error::new(
                result.override_keys[0].span(),
                "`override_key` requires `overrides = ...`",
            ));
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field attributes.
///
/// - `#[record(alias = "external")]`
/// - `#[record(skip_read)]`, `#[record(skip_write)]`, `#[record(skip)]`
/// - `#[record(lenient)]`
/// - `#[record(opaque)]`
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub alias: Option<LitStr>,
    pub skip_read: bool,
    pub skip_write: bool,
    pub lenient: bool,
    pub opaque: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    if result.alias.is_some() {
                        return Err(meta.error("duplicate `alias` attribute"));
                    }
                    result.alias = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip_read") {
                    result.skip_read = true;
                } else if meta.path.is_ident("skip_write") {
                    result.skip_write = true;
                } else if meta.path.is_ident("skip") {
                    result.skip_read = true;
                    result.skip_write = true;
                } else if meta.path.is_ident("lenient") {
                    result.lenient = true;
                } else if meta.path.is_ident("opaque") {
                    result.opaque = true;
                } else {
                    return Err(meta.error(
                        "unknown record field attribute, expected one of `alias`, `skip_read`, `skip_write`, `skip`, `lenient`, `opaque`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
