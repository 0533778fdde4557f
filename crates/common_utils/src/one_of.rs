//! One-of unions resolved by trial deserialization.
//!
//! Several API slots accept structurally different payloads without a
//! discriminator field. A [`OneOf`] keeps the payload exactly as received and
//! resolves it against the union's declared variants in order; the first
//! variant that both deserializes and validates wins. Payloads matching no
//! variant are kept as they are and only reported when the caller validates
//! or asks for the resolved variant.
//!
//! Variant sets are declared with [`one_of!`](crate::one_of!).

use std::fmt;

use error_stack::{report, ResultExt};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
#[cfg(feature = "logs")]
use sdk_env::logger;

use crate::{
    errors::{CustomResult, ModelError},
    validation::Validate,
};

/// The closed set of variants of one union, in declaration order.
///
/// Implemented by [`one_of!`](crate::one_of!).
pub trait OneOfVariants: Sized {
    /// Name of the union, used in error reports.
    const UNION_NAME: &'static str;

    /// Names of the variants in declaration order.
    const VARIANT_NAMES: &'static [&'static str];

    /// Tries every variant in declaration order, returning the first match.
    fn resolve(raw: &Value) -> Option<Self>;

    /// Name of the variant held.
    fn variant_name(&self) -> &'static str;

    /// Validates the variant held.
    fn validate_variant(&self) -> CustomResult<(), ModelError>;

    /// The JSON the variant held represents.
    fn to_raw(&self) -> Value;
}

/// Narrows a variant set to one of its member types.
pub trait Pick<T> {
    /// The member value, if the variant held is of type `T`.
    fn pick(&self) -> Option<&T>;
}

/// Attempts to read `raw` as the variant `T`, accepting it only if it validates.
#[cfg_attr(not(feature = "logs"), allow(unused_variables))]
pub fn try_variant<T>(union_name: &'static str, variant_name: &'static str, raw: &Value) -> Option<T>
where
    T: DeserializeOwned + Validate,
{
    let candidate = match T::deserialize(raw) {
        Ok(candidate) => candidate,
        Err(_error) => {
            #[cfg(feature = "logs")]
            logger::debug!(union = union_name, variant = variant_name, error = %_error, "variant rejected while deserializing");
            return None;
        }
    };

    match candidate.validate() {
        Ok(()) => Some(candidate),
        Err(_report) => {
            #[cfg(feature = "logs")]
            logger::debug!(union = union_name, variant = variant_name, error = ?_report, "variant rejected while validating");
            None
        }
    }
}

/// A value that is exactly one of the variants of `V`, or an unrecognized payload.
pub struct OneOf<V> {
    variant: Option<V>,
    raw: Value,
}

impl<V: OneOfVariants> OneOf<V> {
    /// Wraps a known variant. No resolution takes place.
    pub fn new(variant: impl Into<V>) -> Self {
        let variant = variant.into();
        Self {
            raw: variant.to_raw(),
            variant: Some(variant),
        }
    }

    /// Resolves a raw payload against the declared variants.
    ///
    /// Never fails: payloads matching no variant are kept unresolved.
    pub fn from_raw(raw: Value) -> Self {
        let variant = V::resolve(&raw);

        #[cfg(feature = "logs")]
        {
            match &variant {
                Some(resolved) => logger::trace!(
                    union = V::UNION_NAME,
                    variant = resolved.variant_name(),
                    "union resolved"
                ),
                None => logger::warn!(
                    union = V::UNION_NAME,
                    candidates = ?V::VARIANT_NAMES,
                    "payload did not match any known variant"
                ),
            }
        }

        Self { variant, raw }
    }

    /// Whether the payload resolved to a known variant.
    pub fn is_resolved(&self) -> bool {
        self.variant.is_some()
    }

    /// The resolved variant, for exhaustive matching.
    pub fn variant(&self) -> CustomResult<&V, ModelError> {
        self.variant.as_ref().ok_or_else(|| self.unknown_variant())
    }

    /// Consumes the union, returning the resolved variant.
    pub fn into_variant(self) -> CustomResult<V, ModelError> {
        match self.variant {
            Some(variant) => Ok(variant),
            None => Err::<V, _>(report!(ModelError::UnknownVariant {
                union_name: V::UNION_NAME,
            }))
            .attach_printable_lazy(|| format!("Unrecognized payload: {}", self.raw)),
        }
    }

    /// The resolved variant, or `None` when the payload is unrecognized.
    pub fn try_variant(&self) -> Option<&V> {
        self.variant.as_ref()
    }

    /// The variant as type `T`, if that is what the payload resolved to.
    pub fn try_pick<T>(&self) -> Option<&T>
    where
        V: Pick<T>,
    {
        self.variant.as_ref().and_then(Pick::pick)
    }

    /// Applies `handler` to the resolved variant.
    pub fn match_variant<R>(&self, handler: impl FnOnce(&V) -> R) -> CustomResult<R, ModelError> {
        self.variant().map(handler)
    }

    /// The payload as captured.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the union, returning the payload as captured.
    pub fn into_raw(self) -> Value {
        self.raw
    }

    fn unknown_variant(&self) -> error_stack::Report<ModelError> {
        report!(ModelError::UnknownVariant {
            union_name: V::UNION_NAME,
        })
        .attach_printable(format!("Unrecognized payload: {}", self.raw))
    }
}

impl<V: OneOfVariants> Validate for OneOf<V> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        self.variant()?
            .validate_variant()
            .attach_printable_lazy(|| format!("while validating {}", V::UNION_NAME))
    }
}

impl<V: Clone> Clone for OneOf<V> {
    fn clone(&self) -> Self {
        Self {
            variant: self.variant.clone(),
            raw: self.raw.clone(),
        }
    }
}

impl<V: OneOfVariants + fmt::Debug> fmt::Debug for OneOf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => f.debug_tuple(V::UNION_NAME).field(variant).finish(),
            None => f
                .debug_struct(V::UNION_NAME)
                .field("unrecognized", &self.raw)
                .finish(),
        }
    }
}

impl<V> PartialEq for OneOf<V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<V> Eq for OneOf<V> {}

impl<V> Serialize for OneOf<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, V: OneOfVariants> Deserialize<'de> for OneOf<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::field_store::{ApiModel, RawFieldStore};

    // Hand written stand-ins for generated models: `Card` needs `number`,
    // `Wallet` needs `wallet_id`, `Token` needs `number` too, overlapping `Card`.
    macro_rules! test_model {
        ($name:ident, $required:literal) => {
            #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
            #[serde(transparent)]
            struct $name {
                store: RawFieldStore,
            }

            impl Validate for $name {
                fn validate(&self) -> CustomResult<(), ModelError> {
                    self.store.get_required::<String>($required).map(|_| ())
                }
            }

            impl ApiModel for $name {
                const MODEL_NAME: &'static str = stringify!($name);
                const FIELD_NAMES: &'static [&'static str] = &[$required];

                fn store(&self) -> &RawFieldStore {
                    &self.store
                }

                fn from_store(store: RawFieldStore) -> Self {
                    Self { store }
                }
            }
        };
    }

    test_model!(Card, "number");
    test_model!(Wallet, "wallet_id");
    test_model!(Token, "number");

    crate::one_of! {
        /// Test union.
        enum PaymentSource {
            Card(Card),
            Wallet(Wallet),
            Token(Token),
        }
    }

    type Source = OneOf<PaymentSource>;

    fn model<M: ApiModel>(value: Value) -> M {
        M::from_value(value).unwrap()
    }

    #[test]
    fn test_construct_from_variant() {
        let source = Source::new(model::<Wallet>(json!({ "wallet_id": "w_1" })));

        assert!(source.is_resolved());
        assert_eq!(source.raw(), &json!({ "wallet_id": "w_1" }));
        assert!(source.try_pick::<Wallet>().is_some());
        assert!(source.try_pick::<Card>().is_none());
        assert!(source.validate().is_ok());
    }

    #[test]
    fn test_resolution_follows_declaration_order() {
        let source: Source = serde_json::from_value(json!({ "number": "4242" })).unwrap();

        assert_eq!(source.variant().unwrap().variant_name(), "Card");
        assert!(source.try_pick::<Token>().is_none());
    }

    #[test]
    fn test_later_variant_resolves_when_earlier_fails_validation() {
        let source: Source =
            serde_json::from_value(json!({ "wallet_id": "w_1", "number": null })).unwrap();

        let label = source
            .match_variant(|variant| match variant {
                PaymentSource::Card(_) => "card",
                PaymentSource::Wallet(_) => "wallet",
                PaymentSource::Token(_) => "token",
            })
            .unwrap();
        assert_eq!(label, "wallet");
    }

    #[test]
    fn test_unrecognized_payload_is_preserved() {
        let payload = json!({ "iban": "DE89 3704", "extra": [1, 2, 3] });
        let source: Source = serde_json::from_value(payload.clone()).unwrap();

        assert!(!source.is_resolved());
        assert!(source.try_pick::<Card>().is_none());
        assert_eq!(serde_json::to_value(&source).unwrap(), payload);

        let error = source.validate().unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::UnknownVariant {
                union_name: "PaymentSource"
            }
        );
        assert!(source.match_variant(|_| ()).is_err());
        assert!(source.into_variant().is_err());
    }

    #[test]
    fn test_non_object_payload_is_preserved() {
        let source: Source = serde_json::from_str("\"card_on_file\"").unwrap();
        assert!(!source.is_resolved());
        assert_eq!(serde_json::to_string(&source).unwrap(), "\"card_on_file\"");
    }

    #[test]
    fn test_equality_uses_raw_projection() {
        let built = Source::new(model::<Card>(json!({ "number": "4242", "cvc": "123" })));
        let parsed: Source =
            serde_json::from_str(r#"{"cvc":"123","number":"4242"}"#).unwrap();
        assert_eq!(built, parsed);

        let unknown_a: Source = serde_json::from_value(json!({ "x": 1 })).unwrap();
        let unknown_b: Source = serde_json::from_value(json!({ "x": 1 })).unwrap();
        assert_eq!(unknown_a, unknown_b);
        assert_ne!(unknown_a, built);
    }
}
