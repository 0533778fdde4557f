use common_utils::{api_enum::ApiEnum, types::MinorUnit};

use crate::{
    customers::CustomerRequest,
    enums::{CountryCode, Currency, PaymentMethodType},
    Metadata,
};

#[model_derive::api_model]
pub struct ProductItem {
    /// Unique identifier of the product.
    #[api_field(required)]
    product_id: String,
    #[api_field(required)]
    quantity: i64,
    /// Amount the customer pays if pay-what-you-want is enabled.
    #[api_field(nullable)]
    amount: MinorUnit,
}

#[model_derive::api_model]
/// Billing address prefilled on the checkout page.
pub struct CheckoutBillingAddress {
    #[api_field(required)]
    country: ApiEnum<CountryCode>,
    #[api_field(nullable)]
    city: String,
    #[api_field(nullable)]
    state: String,
    #[api_field(nullable)]
    street: String,
    #[api_field(nullable)]
    zipcode: String,
}

#[model_derive::api_model]
pub struct SubscriptionData {
    /// Optional trial period in days. If specified, this value overrides the
    /// trial period set in the product's price.
    #[api_field(nullable)]
    trial_period_days: i32,
}

#[model_derive::api_model]
pub struct CheckoutSessionRequest {
    #[api_field(required)]
    product_cart: Vec<ProductItem>,
    /// Customer details for the session.
    #[api_field(nullable)]
    customer: CustomerRequest,
    #[api_field(nullable)]
    billing_address: CheckoutBillingAddress,
    #[api_field(nullable)]
    allowed_payment_method_types: Vec<ApiEnum<PaymentMethodType>>,
    #[api_field(nullable)]
    billing_currency: ApiEnum<Currency>,
    #[api_field(nullable)]
    discount_code: String,
    /// The url to redirect after payment failure or success.
    #[api_field(nullable)]
    return_url: String,
    #[api_field(nullable)]
    subscription_data: SubscriptionData,
    #[api_field(nullable)]
    metadata: Metadata,
    /// If confirm is true, all the details will be finalized. If required data
    /// is missing, an error will be returned.
    #[api_field(optional)]
    confirm: bool,
    #[api_field(optional)]
    show_saved_payment_methods: bool,
}

#[model_derive::api_model]
pub struct CheckoutSessionResponse {
    /// The ID of the created checkout session.
    #[api_field(required)]
    session_id: String,
    /// Checkout url.
    #[api_field(required)]
    checkout_url: String,
}

/// `POST /checkouts`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutSessionCreateParams {
    pub body: CheckoutSessionRequest,
}

common_utils::impl_api_params!(CheckoutSessionCreateParams, Post, ["checkouts"], body = body);

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::{errors::ModelError, field_store::ApiModel, validation::Validate};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nullable_customer_accepts_null() {
        let session = CheckoutSessionRequest::from_value(json!({
            "product_cart": [{ "product_id": "prod_1", "quantity": 1 }],
            "customer": null,
            "confirm": true
        }))
        .unwrap();

        assert!(session.validate().is_ok());
        assert!(session.customer().unwrap().is_none());
        assert_eq!(session.confirm().unwrap(), Some(true));
    }

    #[test]
    fn test_unrecognized_customer_fails_validation() {
        let session = CheckoutSessionRequest::from_value(json!({
            "product_cart": [],
            "customer": { "phone_number": "+15550100" }
        }))
        .unwrap();

        let customer = session.customer().unwrap().unwrap();
        assert!(!customer.is_resolved());
        assert_eq!(customer.raw(), &json!({ "phone_number": "+15550100" }));
        assert!(matches!(
            session.validate().unwrap_err().current_context(),
            ModelError::UnknownVariant { .. }
        ));
    }
}
