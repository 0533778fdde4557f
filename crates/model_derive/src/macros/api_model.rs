use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Attribute, Fields, ItemStruct, LitStr};

use crate::macros::helpers::{get_named_fields, occurrence_error, syn_error};

/// How a field behaves when it is missing, `null` or assigned `None`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// Must be present and non-null.
    Required,
    /// May be absent or `null`; `None` is stored as `null`.
    Nullable,
    /// May be absent or `null`; `None` removes the key.
    Optional,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Nullable => "nullable, `None` is sent as `null`",
            Self::Optional => "optional, `None` omits the field",
        }
    }
}

struct ApiField {
    ident: syn::Ident,
    ty: syn::Type,
    wire_name: String,
    kind: FieldKind,
    docs: Vec<Attribute>,
}

impl ApiField {
    fn from_field(field: syn::Field) -> syn::Result<Self> {
        let span = field.span();
        let ident = field
            .ident
            .ok_or_else(|| syn_error(span, "api_model fields must be named"))?;

        let mut kind: Option<(FieldKind, syn::Ident)> = None;
        let mut wire_name: Option<LitStr> = None;
        let mut docs = Vec::new();

        for attr in field.attrs {
            if attr.path().is_ident("doc") {
                docs.push(attr);
                continue;
            }
            if !attr.path().is_ident("api_field") {
                return Err(syn::Error::new_spanned(
                    attr,
                    "only doc comments and #[api_field(..)] are allowed on api_model fields",
                ));
            }

            attr.parse_nested_meta(|meta| {
                let keyword = meta
                    .path
                    .get_ident()
                    .cloned()
                    .ok_or_else(|| meta.error("unsupported api_field option"))?;

                let parsed_kind = match keyword.to_string().as_str() {
                    "required" => Some(FieldKind::Required),
                    "nullable" => Some(FieldKind::Nullable),
                    "optional" => Some(FieldKind::Optional),
                    "rename" => {
                        let value: LitStr = meta.value()?.parse()?;
                        if let Some(first) = &wire_name {
                            return Err(occurrence_error(first, &value, "rename"));
                        }
                        wire_name = Some(value);
                        None
                    }
                    _ => return Err(meta.error("expected `required`, `nullable`, `optional` or `rename`")),
                };

                if let Some(parsed_kind) = parsed_kind {
                    if let Some((_, first)) = &kind {
                        return Err(occurrence_error(first, &keyword, "kind"));
                    }
                    kind = Some((parsed_kind, keyword));
                }
                Ok(())
            })?;
        }

        let (kind, _) = kind.ok_or_else(|| {
            syn_error(
                ident.span(),
                "missing #[api_field(required | nullable | optional)]",
            )
        })?;

        Ok(Self {
            wire_name: wire_name.map_or_else(|| ident.to_string(), |name| name.value()),
            ident,
            ty: field.ty,
            kind,
            docs,
        })
    }

    fn getter(&self) -> TokenStream {
        let Self {
            ident,
            ty,
            wire_name,
            kind,
            docs,
        } = self;
        let contract = format!("Wire name `{wire_name}`, {}.", kind.describe());

        match kind {
            FieldKind::Required => quote! {
                #(#docs)*
                #[doc = ""]
                #[doc = #contract]
                pub fn #ident(
                    &self,
                ) -> ::common_utils::errors::CustomResult<#ty, ::common_utils::errors::ModelError> {
                    self.store.get_required(#wire_name)
                }
            },
            FieldKind::Nullable | FieldKind::Optional => quote! {
                #(#docs)*
                #[doc = ""]
                #[doc = #contract]
                pub fn #ident(
                    &self,
                ) -> ::common_utils::errors::CustomResult<
                    ::core::option::Option<#ty>,
                    ::common_utils::errors::ModelError,
                > {
                    self.store.get_optional(#wire_name)
                }
            },
        }
    }

    fn model_setter(&self) -> TokenStream {
        let Self {
            ident,
            ty,
            wire_name,
            kind,
            ..
        } = self;
        let setter = format_ident!("set_{}", ident);
        let doc = format!("Writes `{wire_name}`. Fails once the model has been read from.");

        match kind {
            FieldKind::Required => quote! {
                #[doc = #doc]
                pub fn #setter(
                    &mut self,
                    value: impl ::core::convert::Into<#ty>,
                ) -> ::common_utils::errors::CustomResult<(), ::common_utils::errors::ModelError> {
                    self.store.set(#wire_name, ::core::convert::Into::<#ty>::into(value))
                }
            },
            FieldKind::Nullable => quote! {
                #[doc = #doc]
                pub fn #setter(
                    &mut self,
                    value: ::core::option::Option<#ty>,
                ) -> ::common_utils::errors::CustomResult<(), ::common_utils::errors::ModelError> {
                    self.store.set_nullable(#wire_name, value)
                }
            },
            FieldKind::Optional => quote! {
                #[doc = #doc]
                pub fn #setter(
                    &mut self,
                    value: ::core::option::Option<#ty>,
                ) -> ::common_utils::errors::CustomResult<(), ::common_utils::errors::ModelError> {
                    self.store.set_optional(#wire_name, value)
                }
            },
        }
    }

    fn builder_setter(&self) -> TokenStream {
        let Self {
            ident,
            ty,
            wire_name,
            kind,
            ..
        } = self;
        let doc = format!("Sets `{wire_name}`.");

        match kind {
            FieldKind::Required => quote! {
                #[doc = #doc]
                #[must_use]
                pub fn #ident(mut self, value: impl ::core::convert::Into<#ty>) -> Self {
                    self.inner.set(#wire_name, ::core::convert::Into::<#ty>::into(value));
                    self
                }
            },
            FieldKind::Nullable => quote! {
                #[doc = #doc]
                #[must_use]
                pub fn #ident(mut self, value: ::core::option::Option<#ty>) -> Self {
                    self.inner.set_nullable(#wire_name, value);
                    self
                }
            },
            FieldKind::Optional => quote! {
                #[doc = #doc]
                #[must_use]
                pub fn #ident(mut self, value: ::core::option::Option<#ty>) -> Self {
                    self.inner.set_optional(#wire_name, value);
                    self
                }
            },
        }
    }
}

pub fn api_model_inner(args: TokenStream, item: ItemStruct) -> syn::Result<TokenStream> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(args, "api_model takes no arguments"));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "api_model does not support generic structs",
        ));
    }
    if let Fields::Unit | Fields::Unnamed(_) = item.fields {
        return Err(syn_error(
            Span::call_site(),
            "api_model only supports structs with named fields",
        ));
    }

    let ItemStruct {
        attrs,
        vis,
        ident: name,
        fields,
        ..
    } = item;

    let fields = get_named_fields(fields)?
        .into_iter()
        .map(ApiField::from_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let builder = format_ident!("{}Builder", name);
    let model_name = name.to_string();
    let builder_doc = format!("Builder for [`{name}`].");
    let wire_names = fields.iter().map(|field| &field.wire_name);
    let field_idents = fields.iter().map(|field| &field.ident);
    let validated_names = fields.iter().map(|field| &field.wire_name);
    let getters = fields.iter().map(ApiField::getter);
    let model_setters = fields.iter().map(ApiField::model_setter);
    let builder_setters = fields.iter().map(ApiField::builder_setter);

    Ok(quote! {
        #(#attrs)*
        #[derive(
            Clone,
            Debug,
            Default,
            PartialEq,
            Eq,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        #vis struct #name {
            store: ::common_utils::field_store::RawFieldStore,
        }

        #[doc = #builder_doc]
        #[derive(Debug, Default)]
        #vis struct #builder {
            inner: ::common_utils::field_store::FieldStoreBuilder,
        }

        impl #name {
            /// Starts building a new instance.
            pub fn builder() -> #builder {
                #builder::default()
            }

            /// A builder seeded with every field of this instance, unknown ones included.
            pub fn to_builder(&self) -> #builder {
                #builder {
                    inner: ::common_utils::field_store::FieldStoreBuilder::from_store(&self.store),
                }
            }

            #(#getters)*

            #(#model_setters)*
        }

        impl #builder {
            #(#builder_setters)*

            /// Sets a field this SDK does not declare.
            #[must_use]
            pub fn additional_property(
                mut self,
                key: &str,
                value: ::serde_json::Value,
            ) -> Self {
                self.inner.set_raw(key, value);
                self
            }

            /// Seals the instance. Fails if a value could not be encoded.
            pub fn build(
                self,
            ) -> ::common_utils::errors::CustomResult<#name, ::common_utils::errors::ModelError> {
                self.inner
                    .finish()
                    .map(<#name as ::common_utils::field_store::ApiModel>::from_store)
            }
        }

        impl ::common_utils::field_store::ApiModel for #name {
            const MODEL_NAME: &'static str = #model_name;
            const FIELD_NAMES: &'static [&'static str] = &[#(#wire_names),*];

            fn store(&self) -> &::common_utils::field_store::RawFieldStore {
                &self.store
            }

            fn from_store(store: ::common_utils::field_store::RawFieldStore) -> Self {
                Self { store }
            }
        }

        impl ::common_utils::validation::Validate for #name {
            fn validate(
                &self,
            ) -> ::common_utils::errors::CustomResult<(), ::common_utils::errors::ModelError> {
                #(
                    ::common_utils::validation::validate_field(
                        #model_name,
                        #validated_names,
                        self.#field_idents(),
                    )?;
                )*
                ::core::result::Result::Ok(())
            }
        }
    })
}
