//! The envelope every list endpoint responds with.

use std::{fmt, marker::PhantomData};

use common_utils::{
    errors::{CustomResult, ModelError},
    field_store::{ApiModel, FieldStoreBuilder, RawFieldStore},
    validation::{validate_field, Validate},
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    customers::Customer, disputes::Dispute, payments::Payment, refunds::Refund,
    subscriptions::Subscription,
};

/// One page of a list endpoint's results.
pub struct ListPage<T> {
    store: RawFieldStore,
    _items: PhantomData<fn() -> T>,
}

pub type CustomerListResponse = ListPage<Customer>;
pub type PaymentListResponse = ListPage<Payment>;
pub type SubscriptionListResponse = ListPage<Subscription>;
pub type RefundListResponse = ListPage<Refund>;
pub type DisputeListResponse = ListPage<Dispute>;

impl<T: Serialize> ListPage<T> {
    /// A sealed page holding `items`.
    pub fn from_items(items: Vec<T>) -> CustomResult<Self, ModelError> {
        let mut builder = FieldStoreBuilder::default();
        builder.set("items", items);
        builder.finish().map(|store| Self {
            store,
            _items: PhantomData,
        })
    }
}

impl<T: DeserializeOwned> ListPage<T> {
    /// The entries of the page. Wire name `items`, required.
    pub fn items(&self) -> CustomResult<Vec<T>, ModelError> {
        self.store.get_required("items")
    }
}

impl<T: DeserializeOwned + Validate> Validate for ListPage<T> {
    fn validate(&self) -> CustomResult<(), ModelError> {
        validate_field("ListPage", "items", self.items())
    }
}

impl<T: DeserializeOwned + Validate> ApiModel for ListPage<T> {
    const MODEL_NAME: &'static str = "ListPage";
    const FIELD_NAMES: &'static [&'static str] = &["items"];

    fn store(&self) -> &RawFieldStore {
        &self.store
    }

    fn from_store(store: RawFieldStore) -> Self {
        Self {
            store,
            _items: PhantomData,
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            store: RawFieldStore::default(),
            _items: PhantomData,
        }
    }
}

impl<T> Clone for ListPage<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _items: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ListPage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPage").field("store", &self.store).finish()
    }
}

impl<T> PartialEq for ListPage<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl<T> Eq for ListPage<T> {}

impl<T> Serialize for ListPage<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.store.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ListPage<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawFieldStore::deserialize(deserializer).map(|store| Self {
            store,
            _items: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::checkout_sessions::CheckoutSessionResponse;

    #[test]
    fn test_items_are_read_lazily() {
        let page: ListPage<CheckoutSessionResponse> = serde_json::from_value(json!({
            "items": [
                { "session_id": "cks_1", "checkout_url": "https://checkout.example.com/cks_1" },
                { "session_id": "cks_2" }
            ],
            "has_more": false
        }))
        .unwrap();

        let items = page.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(page.unknown_fields(), vec!["has_more"]);
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_from_items() {
        let item = CheckoutSessionResponse::builder()
            .session_id("cks_1")
            .checkout_url("https://checkout.example.com/cks_1")
            .build()
            .unwrap();
        let page = ListPage::from_items(vec![item]).unwrap();

        assert!(page.validate().is_ok());
        assert_eq!(
            page.to_value(),
            json!({ "items": [{ "session_id": "cks_1", "checkout_url": "https://checkout.example.com/cks_1" }] })
        );
        assert!(page.store().is_frozen());
    }

    #[test]
    fn test_missing_items() {
        let page = CustomerListResponse::from_slice(b"{}").unwrap();
        assert_eq!(
            page.items().unwrap_err().current_context(),
            &ModelError::MissingRequiredField {
                field_name: "items".to_string()
            }
        );
        assert!(CustomerListResponse::from_slice(b"[]").is_err());
    }
}
