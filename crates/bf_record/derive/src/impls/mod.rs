// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_describe;
mod trait_dynamic;
mod trait_record;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Every impl generated by `#[derive(Record)]`.
pub(crate) fn impl_record(record: &RecordStruct) -> TokenStream {
    let typed_tokens = trait_dynamic::impl_trait_typed(record);
    let to_dynamic_tokens = trait_dynamic::impl_trait_to_dynamic(record);
    let from_dynamic_tokens = trait_dynamic::impl_trait_from_dynamic(record);
    let describe_tokens = trait_describe::impl_trait_describe(record);
    let record_tokens = trait_record::impl_trait_record(record);
    let auto_register_tokens = auto_register::get_auto_register_impl(record);

    quote! {
        const _: () = {
            #typed_tokens

            #to_dynamic_tokens

            #from_dynamic_tokens

            #describe_tokens

            #record_tokens

            #auto_register_tokens
        };
    }
}
