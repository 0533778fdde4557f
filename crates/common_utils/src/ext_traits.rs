//!
//! This module holds traits for extending functionalities for existing datatypes
//! & inbuilt datatypes.
//!

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::{self, CustomResult};

///
/// Encode interface
/// An interface for serializing models and bodies with `serde_json`
///
pub trait Encode: Serialize + std::fmt::Debug {
    ///
    /// Functionality, for specifically encoding `Self` into a JSON `String`
    ///
    fn encode_to_string_of_json(&self) -> CustomResult<String, errors::ParsingError> {
        serde_json::to_string(self)
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a request"))
    }

    ///
    /// Functionality, for specifically encoding `Self` into `serde_json::Value`
    ///
    fn encode_to_value(&self) -> CustomResult<serde_json::Value, errors::ParsingError> {
        serde_json::to_value(self)
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a value"))
    }

    ///
    /// Functionality, for specifically encoding `Self` into `Vec<u8>`
    ///
    fn encode_to_vec(&self) -> CustomResult<Vec<u8>, errors::ParsingError> {
        serde_json::to_vec(self)
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to convert {self:?} to a value"))
    }
}

impl<A> Encode for A where A: Serialize + std::fmt::Debug + ?Sized {}

///
/// Extending functionalities of `[u8]` for performing parsing
///
pub trait ByteSliceExt {
    ///
    /// Convert `[u8]` into type `<T>` by using `serde::Deserialize`
    ///
    fn parse_struct<'de, T>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<'de, T>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>,
    {
        serde_json::from_slice(self)
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from &[u8]"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_helpers() {
        let value: serde_json::Value = br#"{"a":[1,2]}"#.parse_struct("Value").unwrap();
        assert_eq!(value, json!({ "a": [1, 2] }));

        let numbers: Vec<u8> = b"[1,2]".parse_struct("Vec<u8>").unwrap();
        assert_eq!(numbers, vec![1, 2]);

        assert!(b"{".parse_struct::<serde_json::Value>("Value").is_err());
    }

    #[test]
    fn test_encode_helpers() {
        let value = json!({ "currency": "USD", "amount": 100 });
        assert_eq!(
            value.encode_to_string_of_json().unwrap(),
            r#"{"currency":"USD","amount":100}"#
        );
        assert_eq!(value.encode_to_value().unwrap(), value);
        assert_eq!(value.encode_to_vec().unwrap(), br#"{"currency":"USD","amount":100}"#);
    }
}
