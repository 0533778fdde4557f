//! Errors and error specific types for universal use

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
///
pub type CustomResult<T, E> = error_stack::Result<T, E>;

macro_rules! impl_error_display {
    ($st: ident, $arg: tt) => {
        impl std::fmt::Display for $st {
            fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                fmt.write_str(&format!(
                    "{{ error_type: {:?}, error_description: {} }}",
                    self, $arg
                ))
            }
        }
    };
}

macro_rules! impl_error_type {
    ($name: ident, $arg: tt) => {
        #[doc = ""]
        #[doc = stringify!(Error variant $name)]
        #[doc = stringify!(Custom error variant for $arg)]
        #[doc = ""]
        #[derive(Debug)]
        pub struct $name;

        impl_error_display!($name, $arg);

        impl std::error::Error for $name {}
    };
}

impl_error_type!(ParsingError, "Parsing error");

/// Errors raised while reading, writing or validating a JSON backed model.
#[allow(missing_docs)] // Only to prevent warnings about struct fields not being documented
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A required property was absent at read time.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: String },

    /// A required property was explicitly set to JSON `null`.
    #[error("Required field is null: {field_name}")]
    NullRequiredField { field_name: String },

    /// The stored JSON could not be converted to the requested type.
    #[error("Field {field_name} could not be read as {expected_type}")]
    TypeMismatch {
        field_name: String,
        expected_type: &'static str,
    },

    /// A closed-set scalar held a value outside of its known members.
    #[error("Invalid value {value:?} for enum {enum_name}")]
    InvalidEnumValue {
        enum_name: &'static str,
        value: String,
    },

    /// A one-of union did not resolve to any of its declared variants.
    #[error("Payload did not match any variant of {union_name}")]
    UnknownVariant { union_name: &'static str },

    /// A write was attempted after the model had already been read from.
    #[error("Field {field_name} cannot be written once the model is frozen")]
    StoreFrozen { field_name: String },

    /// A value handed to a setter could not be encoded as JSON.
    #[error("Failed to encode value for field: {field_name}")]
    EncodingFailed { field_name: String },
}

/// Errors raised while turning a parameter object into a request.
#[allow(missing_docs)] // Only to prevent warnings about struct fields not being documented
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The base URL cannot carry a path (e.g. `mailto:` or `data:` URLs).
    #[error("Base URL cannot be used as a request base: {base_url}")]
    InvalidBaseUrl { base_url: String },

    /// A path parameter was empty.
    #[error("Missing path parameter: {parameter_name}")]
    MissingPathParameter { parameter_name: &'static str },

    /// A path parameter was `.` or `..`, which URL normalization drops.
    #[error("Invalid path parameter {parameter_name}: {value:?}")]
    InvalidPathParameter {
        parameter_name: &'static str,
        value: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode the request body")]
    BodyEncodingFailed,
}
