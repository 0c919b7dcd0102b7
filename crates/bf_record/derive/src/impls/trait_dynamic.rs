use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// `Typed`: a record field expects a nested record of this type.
pub(crate) fn impl_trait_typed(record: &RecordStruct) -> TokenStream {
    let path = &record.bf_record_path;
    let field_kind_ = crate::path::field_kind_(path);

    record.impl_block(
        quote! { #path::Typed },
        quote! {
            #[inline]
            fn field_kind() -> #field_kind_ {
                #field_kind_::Record(<Self as #path::Describe>::descriptor)
            }
        },
    )
}

/// `ToDynamic`: a nested record flattens to a mapping.
pub(crate) fn impl_trait_to_dynamic(record: &RecordStruct) -> TokenStream {
    let path = &record.bf_record_path;
    let value_ = crate::path::value_(path);
    let not_serializable_ = crate::path::not_serializable_(path);

    record.impl_block(
        quote! { #path::ToDynamic },
        quote! {
            #[inline]
            fn to_dynamic(&self) -> ::core::result::Result<#value_, #not_serializable_> {
                ::core::result::Result::map(#path::ser::flatten(self), #value_::Mapping)
            }
        },
    )
}

/// `FromDynamic`: accepts a resolved record or a mapping.
pub(crate) fn impl_trait_from_dynamic(record: &RecordStruct) -> TokenStream {
    let path = &record.bf_record_path;
    let value_ = crate::path::value_(path);
    let instantiation_error_ = crate::path::instantiation_error_(path);
    let macro_exports_ = crate::path::macro_exports_(path);

    record.impl_block(
        quote! { #path::FromDynamic },
        quote! {
            #[inline]
            fn from_dynamic(value: #value_) -> ::core::result::Result<Self, #instantiation_error_> {
                #macro_exports_::record_from_dynamic::<Self>(value)
            }
        },
    )
}
