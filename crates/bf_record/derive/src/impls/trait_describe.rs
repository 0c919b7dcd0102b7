use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{RecordField, RecordStruct};

/// Generate implementation code for `Describe`.
///
/// Non-generic types cache their descriptor in a `DescriptorCell`, generic
/// types in a `GenericDescriptorCell` keyed by the concrete type.
pub(crate) fn impl_trait_describe(record: &RecordStruct) -> TokenStream {
    let path = &record.bf_record_path;
    let type_descriptor_ = crate::path::type_descriptor_(path);
    let mapping_ = crate::path::mapping_(path);
    let instantiation_error_ = crate::path::instantiation_error_(path);
    let macro_exports_ = crate::path::macro_exports_(path);

    let type_name = record.type_name();
    let field_tokens = record.fields.iter().map(|field| field_descriptor_tokens(record, field));

    let override_keys = &record.attrs.override_keys;
    let with_override_keys = if override_keys.is_empty() {
        TokenStream::new()
    } else {
        quote! { .with_override_keys(&[#(#override_keys),*]) }
    };

    let descriptor_tokens = quote! {
        #type_descriptor_::new::<Self>(
            #type_name,
            #macro_exports_::vec![#(#field_tokens),*],
        )
        #with_override_keys
    };

    let cell_tokens = if record.is_generic() {
        let cell = crate::path::generic_descriptor_cell_(path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_insert::<Self>(|| {
                #descriptor_tokens
            })
        }
    } else {
        let cell = crate::path::descriptor_cell_(path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_init(|| {
                #descriptor_tokens
            })
        }
    };

    let take_tokens = record.fields.iter().map(|field| {
        let ident = field.ident;
        let value = take_field_tokens(record, field);
        quote! { #ident: #value }
    });

    record.impl_block(
        quote! { #path::Describe },
        quote! {
            fn descriptor() -> &'static #type_descriptor_ {
                #cell_tokens
            }

            #[allow(unused_mut, unused_variables)]
            fn from_mapping(mut mapping: #mapping_) -> ::core::result::Result<Self, #instantiation_error_> {
                ::core::result::Result::Ok(Self {
                    #(#take_tokens,)*
                })
            }
        },
    )
}

/// `FieldDescriptor::new::<T>("name")` followed by its builder calls.
fn field_descriptor_tokens(record: &RecordStruct, field: &RecordField) -> TokenStream {
    let field_descriptor_ = crate::path::field_descriptor_(&record.bf_record_path);
    let ty = field.ty;
    let name = &field.name;

    let mut tokens = if field.is_opaque() {
        quote! { #field_descriptor_::opaque::<#ty>(#name) }
    } else {
        quote! { #field_descriptor_::new::<#ty>(#name) }
    };

    if let Some(alias) = &field.attrs.alias {
        tokens.extend(quote! { .with_alias(#alias) });
    }
    if field.attrs.skip_read && !field.is_opaque() {
        tokens.extend(quote! { .read_ignored() });
    }
    if field.attrs.skip_write {
        tokens.extend(quote! { .write_ignored() });
    }
    if field.attrs.lenient {
        tokens.extend(quote! { .lenient() });
    }

    tokens
}

/// The expression producing a field's value inside `from_mapping`.
fn take_field_tokens(record: &RecordStruct, field: &RecordField) -> TokenStream {
    let path = &record.bf_record_path;
    let ty = field.ty;
    let name = &field.name;

    if field.is_opaque() {
        quote! { <#ty as ::core::default::Default>::default() }
    } else if field.is_read_ignored(&record.attrs) {
        quote! { #path::take_ignored_field::<#ty>(&mut mapping, #name) }
    } else {
        quote! { #path::take_field::<#ty>(&mut mapping, #name)? }
    }
}
