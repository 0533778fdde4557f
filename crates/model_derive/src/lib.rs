//! Utility macros for the payments SDK models

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod macros;

/// Turns a field description into a model backed by a
/// `common_utils::field_store::RawFieldStore`.
///
/// Every field must carry `#[api_field(..)]` naming its contract:
///
/// - `required`: must be present and non-null. The getter returns `T` and fails
///   with `MissingRequiredField` or `NullRequiredField` otherwise.
/// - `nullable`: the getter returns `Option<T>`; writing `None` stores an
///   explicit JSON `null`.
/// - `optional`: the getter returns `Option<T>`; writing `None` removes the
///   field from the payload.
///
/// `rename = "..."` sets the wire name when it is not a valid Rust identifier.
///
/// The annotated struct is replaced by one holding only the store. The macro
/// also generates:
///
/// - a getter and a `set_<field>` method per field,
/// - a `<Name>Builder` with one setter per field and a sealing `build`,
/// - `ApiModel` and `Validate` implementations.
///
/// Example
///
/// ```
/// #[model_derive::api_model]
/// /// A postal address.
/// pub struct Address {
///     #[api_field(required)]
///     country: String,
///     /// City name.
///     #[api_field(nullable)]
///     city: String,
///     #[api_field(optional, rename = "type")]
///     kind: String,
/// }
///
/// let address = Address::builder()
///     .country("af")
///     .city(None)
///     .build()
///     .unwrap();
/// assert_eq!(address.city().unwrap(), None);
/// assert_eq!(
///     serde_json::to_string(&address).unwrap(),
///     r#"{"country":"af","city":null}"#
/// );
/// ```
#[proc_macro_attribute]
pub fn api_model(
    args: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = syn::parse_macro_input!(item as syn::ItemStruct);
    macros::api_model_inner(args.into(), item)
        .unwrap_or_else(|error| error.into_compile_error())
        .into()
}
