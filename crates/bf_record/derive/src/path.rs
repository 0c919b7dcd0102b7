//! Paths into `bf_record` used by the generated code.
//!
//! Kept in one place so that moving an item in `bf_record` only needs a change
//! here.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `bf_record` crate.
///
/// 1. For crates that depend on `bf_record`, `::bf_record` is returned.
/// 2. For crates that depend on `bestfit`, `::bestfit::record` is returned.
/// 3. Otherwise `::bf_record` is returned, which may be incorrect.
pub(crate) fn bf_record() -> syn::Path {
    bf_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bf_record"))
}

#[inline(always)]
pub(crate) fn macro_exports_(path: &syn::Path) -> TokenStream {
    quote! { #path::__macro_exports }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(path: &syn::Path) -> TokenStream {
    quote! { #path::__macro_exports::auto_register }
}

#[inline(always)]
pub(crate) fn value_(path: &syn::Path) -> TokenStream {
    quote! { #path::value::Value }
}

#[inline(always)]
pub(crate) fn mapping_(path: &syn::Path) -> TokenStream {
    quote! { #path::value::Mapping }
}

#[inline(always)]
pub(crate) fn type_descriptor_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::TypeDescriptor }
}

#[inline(always)]
pub(crate) fn field_descriptor_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::FieldDescriptor }
}

#[inline(always)]
pub(crate) fn field_kind_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::FieldKind }
}

#[inline(always)]
pub(crate) fn descriptor_cell_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::DescriptorCell }
}

#[inline(always)]
pub(crate) fn generic_descriptor_cell_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::GenericDescriptorCell }
}

#[inline(always)]
pub(crate) fn instantiation_error_(path: &syn::Path) -> TokenStream {
    quote! { #path::InstantiationError }
}

#[inline(always)]
pub(crate) fn not_serializable_(path: &syn::Path) -> TokenStream {
    quote! { #path::NotSerializable }
}
