use proc_macro2::Span;
use quote::ToTokens;
use syn::{punctuated::Punctuated, Fields};

/// This method creates a syn::Error instance with a message indicating that multiple occurrences of an attribute option were found. It takes two tokens representing the first and second keywords, and a string representing the option, and returns the syn::Error instance.
pub(super) fn occurrence_error<T: ToTokens>(
    first_keyword: T,
    second_keyword: T,
    attr: &str,
) -> syn::Error {
    let mut error = syn::Error::new_spanned(
        second_keyword,
        format!("Found multiple occurrences of api_field({attr})"),
    );
    error.combine(syn::Error::new_spanned(first_keyword, "first one here"));
    error
}

/// Creates a new `syn::Error` with the given `span` and `message`.
pub(super) fn syn_error(span: Span, message: &str) -> syn::Error {
    syn::Error::new(span, message)
}

/// Returns the named fields of a struct, or an error for tuple and unit structs.
pub(super) fn get_named_fields(
    fields: Fields,
) -> syn::Result<Punctuated<syn::Field, syn::token::Comma>> {
    if let Fields::Named(syn::FieldsNamed { named, .. }) = fields {
        Ok(named)
    } else {
        Err(syn::Error::new(
            Span::call_site(),
            "This macro cannot be used on structs with no named fields",
        ))
    }
}
