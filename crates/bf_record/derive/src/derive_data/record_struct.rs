use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, parse_quote};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// RecordField

pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Canonical name, the identifier without a raw prefix.
    pub name: String,
    pub attrs: FieldAttributes,
}

impl RecordField<'_> {
    /// The value is never taken from a mapping.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.attrs.opaque
    }

    /// The value is taken leniently: when present and convertible.
    #[inline]
    pub fn is_read_ignored(&self, type_attrs: &TypeAttributes) -> bool {
        self.attrs.skip_read || type_attrs.override_keys.iter().any(|key| key.value() == self.name)
    }
}

// -----------------------------------------------------------------------------
// RecordStruct

pub(crate) struct RecordStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<RecordField<'a>>,
    pub bf_record_path: syn::Path,
}

impl<'a> RecordStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`#[derive(Record)]` only supports structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`#[derive(Record)]` only supports structs with named fields",
                ));
            }
        };

        if let Some(span) = attrs.auto_register
            && !input.generics.params.is_empty()
        {
            return Err(syn::Error::new(
                span,
                "`auto_register` is not supported on generic types",
            ));
        }

        let mut fields = Vec::with_capacity(named.named.len());
        let mut aliases: HashMap<String, &Ident> = HashMap::new();

        for field in &named.named {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;

            if let Some(alias) = &field_attrs.alias
                && let Some(first) = aliases.insert(alias.value(), ident)
            {
                return Err(syn::Error::new(
                    alias.span(),
                    format!("alias `{}` is already used by field `{first}`", alias.value()),
                ));
            }

            fields.push(RecordField {
                ident,
                ty: &field.ty,
                name: ident.to_string().trim_start_matches("r#").to_owned(),
                attrs: field_attrs,
            });
        }

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            fields,
            bf_record_path: crate::path::bf_record(),
        })
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// The short type name given to the descriptor.
    pub fn type_name(&self) -> String {
        match &self.attrs.name {
            Some(name) => name.value(),
            None => self.ident.to_string(),
        }
    }

    /// Generics with the bounds every impl needs on type parameters.
    pub fn bounded_generics(&self) -> Generics {
        let path = &self.bf_record_path;
        let mut generics = self.generics.clone();
        for param in generics.type_params_mut() {
            param.bounds.push(parse_quote!(::core::any::Any));
            param.bounds.push(parse_quote!(::core::marker::Send));
            param.bounds.push(parse_quote!(::core::marker::Sync));
            param.bounds.push(parse_quote!(::core::fmt::Debug));
            param.bounds.push(parse_quote!(::core::clone::Clone));
            param.bounds.push(parse_quote!(::core::cmp::PartialEq));
            param.bounds.push(parse_quote!(#path::Typed));
            param.bounds.push(parse_quote!(#path::ToDynamic));
            param.bounds.push(parse_quote!(#path::FromDynamic));
        }
        generics
    }

    /// `impl #impl_generics #trait_path for #ident #ty_generics #where_clause { #body }`
    pub fn impl_block(&self, trait_path: TokenStream, body: TokenStream) -> TokenStream {
        let generics = self.bounded_generics();
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        let ident = self.ident;
        let where_clause = where_clause.map(ToTokens::to_token_stream);

        quote! {
            impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
                #body
            }
        }
    }
}
