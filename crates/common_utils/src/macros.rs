/// Declares the variant set of a one-of union.
///
/// Variants are listed in priority order: when a payload could be read as more
/// than one of them, the first one listed wins. Every variant type must be a
/// distinct [`ApiModel`](crate::field_store::ApiModel).
///
/// ```ignore
/// common_utils::one_of! {
///     /// Either an existing customer or the details of a new one.
///     pub enum CustomerRequestVariant {
///         AttachExistingCustomer(AttachExistingCustomer),
///         NewCustomer(NewCustomer),
///     }
/// }
///
/// pub type CustomerRequest = common_utils::one_of::OneOf<CustomerRequestVariant>;
/// ```
#[macro_export]
macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($ty),
            )+
        }

        impl $crate::one_of::OneOfVariants for $name {
            const UNION_NAME: &'static str = stringify!($name);
            const VARIANT_NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn resolve(raw: &::serde_json::Value) -> ::core::option::Option<Self> {
                $(
                    if let ::core::option::Option::Some(value) =
                        $crate::one_of::try_variant::<$ty>(stringify!($name), stringify!($variant), raw)
                    {
                        return ::core::option::Option::Some(Self::$variant(value));
                    }
                )+
                ::core::option::Option::None
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }

            fn validate_variant(
                &self,
            ) -> $crate::errors::CustomResult<(), $crate::errors::ModelError> {
                match self {
                    $(Self::$variant(value) => $crate::validation::Validate::validate(value),)+
                }
            }

            fn to_raw(&self) -> ::serde_json::Value {
                match self {
                    $(Self::$variant(value) => $crate::field_store::ApiModel::to_value(value),)+
                }
            }
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl ::core::convert::From<$ty> for $crate::one_of::OneOf<$name> {
                fn from(value: $ty) -> Self {
                    Self::new(value)
                }
            }

            impl $crate::one_of::Pick<$ty> for $name {
                fn pick(&self) -> ::core::option::Option<&$ty> {
                    #[allow(unreachable_patterns)]
                    match self {
                        Self::$variant(value) => ::core::option::Option::Some(value),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        )+
    };
}

/// Implements [`ApiParams`](crate::request::ApiParams) for a parameter object.
///
/// Path segments are either string literals or `{field}` references to
/// `String` fields holding path parameters. `query` names a field holding an
/// [`ApiModel`](crate::field_store::ApiModel) of query parameters and `body`
/// a field holding any serializable body.
///
/// ```ignore
/// common_utils::impl_api_params!(CustomerRetrieveParams, Get, ["customers", {customer_id}]);
/// common_utils::impl_api_params!(CustomerListParams, Get, ["customers"], query = query);
/// common_utils::impl_api_params!(CustomerCreateParams, Post, ["customers"], body = body);
/// ```
#[macro_export]
macro_rules! impl_api_params {
    (@segment $params:ident, $literal:literal) => {
        $literal
    };
    (@segment $params:ident, {$field:ident}) => {
        $crate::request::path_parameter(stringify!($field), &$params.$field)?
    };
    (
        $name:ident, $method:ident, [$($segment:tt),+ $(,)?]
        $(, query = $query:ident)?
        $(, body = $body:ident)?
        $(,)?
    ) => {
        impl $crate::request::ApiParams for $name {
            const METHOD: $crate::request::Method = $crate::request::Method::$method;

            fn path_segments(
                &self,
            ) -> $crate::errors::CustomResult<
                ::std::vec::Vec<&str>,
                $crate::errors::RequestError,
            > {
                let params = self;
                ::core::result::Result::Ok(::std::vec![
                    $($crate::impl_api_params!(@segment params, $segment)),+
                ])
            }

            $(
                fn query(&self) -> ::core::option::Option<&$crate::field_store::RawFieldStore> {
                    ::core::option::Option::Some($crate::field_store::ApiModel::store(&self.$query))
                }
            )?

            $(
                fn body(
                    &self,
                ) -> $crate::errors::CustomResult<
                    ::core::option::Option<::serde_json::Value>,
                    $crate::errors::RequestError,
                > {
                    ::error_stack::ResultExt::change_context(
                        ::serde_json::to_value(&self.$body),
                        $crate::errors::RequestError::BodyEncodingFailed,
                    )
                    .map(::core::option::Option::Some)
                }
            )?
        }
    };
}
