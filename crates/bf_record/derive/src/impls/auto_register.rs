use proc_macro2::TokenStream;

use crate::derive_data::RecordStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(record: &RecordStruct) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = record.attrs.auto_register else {
        return TokenStream::new();
    };

    let bf_record_path = &record.bf_record_path;
    let auto_register_ = crate::path::auto_register_(bf_record_path);
    let ident = record.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #bf_record_path::Describe>::descriptor
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &RecordStruct) -> TokenStream {
    TokenStream::new()
}
