//! JSON backed storage shared by every generated API model.
//!
//! A [`RawFieldStore`] keeps the fields of one JSON object exactly as they were
//! received or assigned, including fields this SDK knows nothing about, so a
//! model read from the wire serializes back to the same document. Typed access
//! goes through [`RawFieldStore::get_required`] and
//! [`RawFieldStore::get_optional`], which convert lazily and report contract
//! violations as [`ModelError`]s.
//!
//! The store has two phases. While it is a draft it may be written; the first
//! typed read (or an explicit [`RawFieldStore::freeze`]) seals it, after which
//! every write fails with [`ModelError::StoreFrozen`]. Sealed stores are plain
//! immutable values and may be shared across threads.

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use error_stack::{report, ResultExt};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
#[cfg(feature = "logs")]
use sdk_env::logger;

use crate::{
    errors::{CustomResult, ModelError, ParsingError},
    ext_traits::ByteSliceExt,
    validation::Validate,
};

/// Ordered map from field name to raw JSON value with a freeze-on-read lifecycle.
#[derive(Default)]
pub struct RawFieldStore {
    fields: Map<String, Value>,
    frozen: AtomicBool,
}

impl RawFieldStore {
    /// An empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A writable store over an existing map, e.g. one copied from another model.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            frozen: AtomicBool::new(false),
        }
    }

    /// Builds a store from any JSON value, which must be an object.
    pub fn from_value(value: Value) -> CustomResult<Self, ModelError> {
        match value {
            Value::Object(fields) => Ok(Self::from_map(fields)),
            other => Err::<Self, _>(report!(ModelError::TypeMismatch {
                field_name: String::from("<root>"),
                expected_type: "JSON object",
            }))
            .attach_printable_lazy(|| format!("Received {other}")),
        }
    }

    /// A writable copy of this store's fields, regardless of its own state.
    pub fn draft(&self) -> Self {
        Self::from_map(self.fields.clone())
    }

    /// Seals the store. Idempotent.
    pub fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "logs")]
            logger::trace!(fields = self.fields.len(), "field store frozen");
        }
    }

    /// Whether the store has been sealed.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Reads a field that the API contract marks as required.
    ///
    /// Freezes the store.
    pub fn get_required<T: DeserializeOwned>(&self, key: &str) -> CustomResult<T, ModelError> {
        self.freeze();
        match self.fields.get(key) {
            None => Err(report!(ModelError::MissingRequiredField {
                field_name: key.to_string(),
            })),
            Some(Value::Null) => Err(report!(ModelError::NullRequiredField {
                field_name: key.to_string(),
            })),
            Some(value) => Self::convert(key, value),
        }
    }

    /// Reads a field that may be absent or `null`, both of which yield `None`.
    ///
    /// Freezes the store.
    pub fn get_optional<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> CustomResult<Option<T>, ModelError> {
        self.freeze();
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::convert(key, value).map(Some),
        }
    }

    /// Writes a value.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> CustomResult<(), ModelError> {
        self.ensure_writable(key)?;
        let value = Self::encode(key, &value)?;
        self.fields.insert(key.to_string(), value);
        Ok(())
    }

    /// Writes a value for a field whose contract allows a persisted `null`:
    /// `None` is stored as JSON `null`.
    pub fn set_nullable<T: Serialize>(
        &mut self,
        key: &str,
        value: Option<T>,
    ) -> CustomResult<(), ModelError> {
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.ensure_writable(key)?;
                self.fields.insert(key.to_string(), Value::Null);
                Ok(())
            }
        }
    }

    /// Writes a value for a field whose contract treats `null` as absence:
    /// `None` removes the key.
    pub fn set_optional<T: Serialize>(
        &mut self,
        key: &str,
        value: Option<T>,
    ) -> CustomResult<(), ModelError> {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key).map(|_| ()),
        }
    }

    /// Removes a field, making it absent.
    pub fn remove(&mut self, key: &str) -> CustomResult<Option<Value>, ModelError> {
        self.ensure_writable(key)?;
        Ok(self.fields.shift_remove(key))
    }

    /// Whether the field is present, `null` included.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether the field is present with an explicit JSON `null`.
    pub fn is_present_null(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(Value::Null))
    }

    /// The raw JSON of one field. Does not freeze the store.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All raw fields in insertion order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Keys present in the store that are not in `known`.
    pub fn unknown_keys<'a>(&'a self, known: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(move |key| !known.contains(key))
    }

    /// The JSON object this store represents.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Consumes the store, returning its fields.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    fn ensure_writable(&self, key: &str) -> CustomResult<(), ModelError> {
        if self.is_frozen() {
            Err(report!(ModelError::StoreFrozen {
                field_name: key.to_string(),
            }))
        } else {
            Ok(())
        }
    }

    fn convert<T: DeserializeOwned>(key: &str, value: &Value) -> CustomResult<T, ModelError> {
        T::deserialize(value)
            .change_context(ModelError::TypeMismatch {
                field_name: key.to_string(),
                expected_type: std::any::type_name::<T>(),
            })
            .attach_printable_lazy(|| format!("Stored value: {value}"))
    }

    fn encode<T: Serialize>(key: &str, value: &T) -> CustomResult<Value, ModelError> {
        serde_json::to_value(value).change_context(ModelError::EncodingFailed {
            field_name: key.to_string(),
        })
    }
}

impl Clone for RawFieldStore {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            frozen: AtomicBool::new(self.is_frozen()),
        }
    }
}

impl fmt::Debug for RawFieldStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFieldStore")
            .field("fields", &self.fields)
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

impl PartialEq for RawFieldStore {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for RawFieldStore {}

impl Serialize for RawFieldStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawFieldStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}

/// Writable draft used by generated model builders.
///
/// Setters never fail at the call site; the first error is kept and reported
/// by [`FieldStoreBuilder::finish`].
#[derive(Debug, Default)]
pub struct FieldStoreBuilder {
    store: RawFieldStore,
    error: Option<error_stack::Report<ModelError>>,
}

impl FieldStoreBuilder {
    /// A builder seeded with a copy of another store's fields.
    pub fn from_store(store: &RawFieldStore) -> Self {
        Self {
            store: store.draft(),
            error: None,
        }
    }

    /// See [`RawFieldStore::set`].
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
        let result = self.store.set(key, value);
        self.record(result);
    }

    /// See [`RawFieldStore::set_nullable`].
    pub fn set_nullable<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let result = self.store.set_nullable(key, value);
        self.record(result);
    }

    /// See [`RawFieldStore::set_optional`].
    pub fn set_optional<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let result = self.store.set_optional(key, value);
        self.record(result);
    }

    /// Stores a raw JSON value under any key, known to the model or not.
    pub fn set_raw(&mut self, key: &str, value: Value) {
        let result = self.store.set(key, value);
        self.record(result);
    }

    /// Seals the draft.
    pub fn finish(self) -> CustomResult<RawFieldStore, ModelError> {
        match self.error {
            Some(error) => Err(error),
            None => {
                self.store.freeze();
                Ok(self.store)
            }
        }
    }

    fn record(&mut self, result: CustomResult<(), ModelError>) {
        if let (Err(error), None) = (result, self.error.as_ref()) {
            self.error = Some(error);
        }
    }
}

/// Implemented by every JSON object backed model.
pub trait ApiModel: Sized + Validate {
    /// Name of the model, used in error reports.
    const MODEL_NAME: &'static str;

    /// Wire names of the fields the model declares, in declaration order.
    const FIELD_NAMES: &'static [&'static str];

    /// The backing store.
    fn store(&self) -> &RawFieldStore;

    /// Wraps a store.
    fn from_store(store: RawFieldStore) -> Self;

    /// Builds the model from a parsed JSON document.
    fn from_value(value: Value) -> CustomResult<Self, ModelError> {
        RawFieldStore::from_value(value)
            .attach_printable_lazy(|| format!("while reading {}", Self::MODEL_NAME))
            .map(Self::from_store)
    }

    /// Parses a response body.
    fn from_slice(bytes: &[u8]) -> CustomResult<Self, ParsingError> {
        bytes
            .parse_struct::<RawFieldStore>(Self::MODEL_NAME)
            .map(Self::from_store)
    }

    /// The exact JSON the model represents, unknown fields included.
    fn to_value(&self) -> Value {
        self.store().to_value()
    }

    /// Fields present on the wire that the model does not declare.
    fn unknown_fields(&self) -> Vec<&str> {
        self.store().unknown_keys(Self::FIELD_NAMES).collect()
    }

    /// Seals the model so that later writes fail.
    #[must_use]
    fn frozen(self) -> Self {
        self.store().freeze();
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn store_from(value: Value) -> RawFieldStore {
        RawFieldStore::from_value(value).unwrap()
    }

    #[test]
    fn test_required_field_errors() {
        let store = store_from(json!({ "name": null, "count": "three" }));

        let missing = store.get_required::<String>("email").unwrap_err();
        assert_eq!(
            missing.current_context(),
            &ModelError::MissingRequiredField {
                field_name: "email".to_string()
            }
        );

        let null = store.get_required::<String>("name").unwrap_err();
        assert_eq!(
            null.current_context(),
            &ModelError::NullRequiredField {
                field_name: "name".to_string()
            }
        );

        let mismatch = store.get_required::<i64>("count").unwrap_err();
        assert!(matches!(
            mismatch.current_context(),
            ModelError::TypeMismatch { field_name, .. } if field_name == "count"
        ));
    }

    #[test]
    fn test_optional_field_reads() {
        let store = store_from(json!({ "city": null, "zipcode": "12345", "count": 3 }));

        assert_eq!(store.get_optional::<String>("street").unwrap(), None);
        assert_eq!(store.get_optional::<String>("city").unwrap(), None);
        assert_eq!(
            store.get_optional::<String>("zipcode").unwrap(),
            Some("12345".to_string())
        );
        assert!(store.get_optional::<String>("count").is_err());
    }

    #[test]
    fn test_absent_and_present_null_serialize_differently() {
        let mut store = RawFieldStore::new();
        store.set("country", "af").unwrap();
        store.set_nullable::<String>("city", None).unwrap();
        store.set_optional::<String>("metadata", None).unwrap();

        assert!(store.is_present_null("city"));
        assert!(!store.contains_key("metadata"));
        assert_eq!(
            serde_json::to_string(&store).unwrap(),
            r#"{"country":"af","city":null}"#
        );
    }

    #[test]
    fn test_read_freezes_store() {
        let mut store = RawFieldStore::new();
        store.set("name", "before").unwrap();
        assert!(!store.is_frozen());

        let _ = store.get_optional::<String>("name").unwrap();
        assert!(store.is_frozen());

        let error = store.set("name", "after").unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::StoreFrozen {
                field_name: "name".to_string()
            }
        );
        assert!(store.remove("name").is_err());
        assert_eq!(store.raw("name"), Some(&json!("before")));

        let mut draft = store.draft();
        assert!(!draft.is_frozen());
        draft.set("name", "after").unwrap();
        assert_ne!(draft, store);
    }

    #[test]
    fn test_equality_ignores_key_order_and_state() {
        let first = store_from(json!({ "a": 1, "b": [1, 2] }));
        let second = store_from(json!({ "b": [1, 2], "a": 1 }));
        second.freeze();

        assert_eq!(first, second);
        assert_ne!(first, store_from(json!({ "a": 1 })));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = r#"{"customer_id":"cus_1","loyalty_tier":{"level":3,"since":null}}"#;
        let store: RawFieldStore = serde_json::from_str(raw).unwrap();

        assert_eq!(store.get_required::<String>("customer_id").unwrap(), "cus_1");
        assert_eq!(
            store.unknown_keys(&["customer_id"]).collect::<Vec<_>>(),
            vec!["loyalty_tier"]
        );
        assert_eq!(serde_json::to_string(&store).unwrap(), raw);
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(serde_json::from_str::<RawFieldStore>("[1, 2]").is_err());
        assert!(RawFieldStore::from_value(json!("text")).is_err());
    }

    #[test]
    fn test_builder_seals_and_reports_first_error() {
        let mut builder = FieldStoreBuilder::default();
        builder.set("email", "jane@example.com");
        builder.set_nullable::<String>("name", None);
        let store = builder.finish().unwrap();
        assert!(store.is_frozen());

        let mut builder = FieldStoreBuilder::default();
        let mut bad_key_map = std::collections::HashMap::new();
        bad_key_map.insert(vec![1_u8], "value");
        builder.set("metadata", bad_key_map);
        builder.set("email", "jane@example.com");
        let error = builder.finish().unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::EncodingFailed {
                field_name: "metadata".to_string()
            }
        );
    }

    #[test]
    fn test_frozen_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RawFieldStore>();

        let store = std::sync::Arc::new(store_from(json!({ "amount": 100 })));
        store.freeze();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || store.get_required::<i64>("amount").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
    }

    proptest::proptest! {
        #[test]
        fn proptest_string_fields_round_trip(
            fields in proptest::collection::btree_map("[a-z_]{1,12}", proptest::option::of("\\PC{0,16}"), 0..8)
        ) {
            let mut store = RawFieldStore::new();
            for (key, value) in &fields {
                store.set_nullable(key, value.clone()).unwrap();
            }
            let serialized = serde_json::to_string(&store).unwrap();
            let deserialized: RawFieldStore = serde_json::from_str(&serialized).unwrap();
            proptest::prop_assert_eq!(&deserialized, &store);
            for (key, value) in &fields {
                proptest::prop_assert_eq!(&deserialized.get_optional::<String>(key).unwrap(), value);
            }
        }
    }
}
