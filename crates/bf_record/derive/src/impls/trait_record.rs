use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Record`.
pub(crate) fn impl_trait_record(record: &RecordStruct) -> TokenStream {
    let path = &record.bf_record_path;
    let type_descriptor_ = crate::path::type_descriptor_(path);
    let mapping_ = crate::path::mapping_(path);
    let macro_exports_ = crate::path::macro_exports_(path);

    let field_arms = record.fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let name = &field.name;
        if field.is_opaque() {
            quote! {
                #name => ::core::option::Option::Some(
                    #path::FieldRef::Opaque(::core::any::type_name::<#ty>())
                ),
            }
        } else {
            quote! {
                #name => ::core::option::Option::Some(#path::FieldRef::Value(&self.#ident)),
            }
        }
    });

    let overrides_tokens = match &record.attrs.overrides {
        Some(func) => quote! {
            #[inline]
            fn manual_overrides(&self) -> #mapping_ {
                #func(self)
            }
        },
        None => TokenStream::new(),
    };

    record.impl_block(
        quote! { #path::Record },
        quote! {
            #[inline]
            fn type_descriptor(&self) -> &'static #type_descriptor_ {
                <Self as #path::Describe>::descriptor()
            }

            fn field(&self, name: &str) -> ::core::option::Option<#path::FieldRef<'_>> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #overrides_tokens

            #[inline]
            fn clone_record(&self) -> #macro_exports_::Box<dyn #path::Record> {
                #macro_exports_::Box::new(::core::clone::Clone::clone(self))
            }

            #[inline]
            fn record_eq(&self, other: &dyn #path::Record) -> bool {
                match <dyn #path::Record>::downcast_ref::<Self>(other) {
                    ::core::option::Option::Some(other) => ::core::cmp::PartialEq::eq(self, other),
                    ::core::option::Option::None => false,
                }
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(self: #macro_exports_::Box<Self>) -> #macro_exports_::Box<dyn ::core::any::Any> {
                self
            }
        },
    )
}
