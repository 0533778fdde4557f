//! Open string enums that tolerate values unknown at build time.

use std::{fmt, hash::Hash, marker::PhantomData, str::FromStr};

use error_stack::report;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    errors::{CustomResult, ModelError},
    validation::Validate,
};

/// A string value that is expected to be one member of the closed set `E`.
///
/// The raw string is always kept as received, so members added to the API
/// after this SDK was built still round-trip unchanged. Membership is only
/// checked by [`ApiEnum::known`] and [`Validate::validate`]; plain reads and
/// serialization never fail on an unrecognized value.
///
/// `E` is usually a fieldless enum deriving `strum::EnumString` and
/// `strum::AsRefStr` with the same casing as its wire representation.
pub struct ApiEnum<E> {
    raw: String,
    _members: PhantomData<fn() -> E>,
}

impl<E> ApiEnum<E> {
    /// Wraps a raw wire value without checking it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _members: PhantomData,
        }
    }

    /// The value exactly as it travels on the wire.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consumes the wrapper, returning the raw wire value.
    pub fn into_raw(self) -> String {
        self.raw
    }

    fn enum_name() -> &'static str {
        let full_name = std::any::type_name::<E>();
        full_name.rsplit("::").next().unwrap_or(full_name)
    }
}

impl<E: FromStr> ApiEnum<E> {
    /// The known member this value maps to, if any.
    pub fn value(&self) -> Option<E> {
        E::from_str(&self.raw).ok()
    }

    /// Whether the raw value is one of the known members.
    pub fn is_known(&self) -> bool {
        self.value().is_some()
    }

    /// The known member this value maps to, failing on unrecognized values.
    pub fn known(&self) -> CustomResult<E, ModelError> {
        self.value().ok_or_else(|| {
            report!(ModelError::InvalidEnumValue {
                enum_name: Self::enum_name(),
                value: self.raw.clone(),
            })
        })
    }
}

impl<E: AsRef<str>> From<E> for ApiEnum<E> {
    fn from(member: E) -> Self {
        Self::from_raw(member.as_ref())
    }
}

impl<E: FromStr> Validate for ApiEnum<E> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.known().map(|_| ())
    }
}

impl<E> Clone for ApiEnum<E> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.clone())
    }
}

impl<E> fmt::Debug for ApiEnum<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiEnum")
            .field(&Self::enum_name())
            .field(&self.raw)
            .finish()
    }
}

impl<E> fmt::Display for ApiEnum<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<E> PartialEq for ApiEnum<E> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<E> Eq for ApiEnum<E> {}

impl<E> Hash for ApiEnum<E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<E: AsRef<str>> PartialEq<E> for ApiEnum<E> {
    fn eq(&self, other: &E) -> bool {
        self.raw == other.as_ref()
    }
}

impl<E> Serialize for ApiEnum<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, E> Deserialize<'de> for ApiEnum<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
    #[strum(serialize_all = "snake_case")]
    enum CardBrand {
        Visa,
        Mastercard,
        AmericanExpress,
    }

    #[test]
    fn test_known_member_round_trip() {
        let brand = ApiEnum::from(CardBrand::AmericanExpress);
        assert_eq!(brand.raw(), "american_express");
        assert_eq!(brand.value(), Some(CardBrand::AmericanExpress));
        assert_eq!(brand, CardBrand::AmericanExpress);

        let serialized = serde_json::to_string(&brand).unwrap();
        assert_eq!(serialized, r#""american_express""#);
        let deserialized: ApiEnum<CardBrand> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, brand);
        assert!(deserialized.validate().is_ok());
    }

    #[test]
    fn test_unknown_member_is_kept_until_validated() {
        let brand: ApiEnum<CardBrand> = serde_json::from_str(r#""union_pay""#).unwrap();
        assert_eq!(brand.value(), None);
        assert!(!brand.is_known());
        assert_eq!(serde_json::to_string(&brand).unwrap(), r#""union_pay""#);

        let error = brand.validate().unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::InvalidEnumValue {
                enum_name: "CardBrand",
                value: "union_pay".to_string(),
            }
        );
        assert!(brand.known().is_err());
    }

    #[test]
    fn test_non_string_payload_is_rejected() {
        assert!(serde_json::from_str::<ApiEnum<CardBrand>>("42").is_err());
        assert!(ApiEnum::<CardBrand>::from_raw("visa").is_known());
        assert_eq!(ApiEnum::from(CardBrand::Mastercard).to_string(), "mastercard");
    }

    proptest::proptest! {
        #[test]
        fn proptest_any_string_round_trips(raw in "\\PC*") {
            let value = ApiEnum::<CardBrand>::from_raw(raw.clone());
            let serialized = serde_json::to_string(&value).unwrap();
            let deserialized: ApiEnum<CardBrand> = serde_json::from_str(&serialized).unwrap();
            proptest::prop_assert_eq!(deserialized.raw(), raw.as_str());
        }
    }
}
