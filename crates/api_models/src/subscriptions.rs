use common_utils::{
    api_enum::ApiEnum,
    one_of,
    one_of::OneOf,
    types::{MinorUnit, Timestamp},
};

use crate::{
    customers::{CustomerLimitedDetails, CustomerRequest},
    enums::{Currency, SubscriptionStatus, TimeInterval},
    payments::BillingAddress,
    Metadata,
};

#[model_derive::api_model]
/// Response struct representing subscription details.
pub struct Subscription {
    /// Unique identifier for the subscription.
    #[api_field(required)]
    subscription_id: String,
    #[api_field(required)]
    status: ApiEnum<SubscriptionStatus>,
    /// Identifier of the product associated with this subscription.
    #[api_field(required)]
    product_id: String,
    /// Number of units/items included in the subscription.
    #[api_field(required)]
    quantity: i64,
    #[api_field(required)]
    customer: CustomerLimitedDetails,
    #[api_field(required)]
    billing: BillingAddress,
    #[api_field(required)]
    currency: ApiEnum<Currency>,
    #[api_field(required)]
    created_at: Timestamp,
    /// Timestamp of the next scheduled billing. Indicates the end of current
    /// billing period.
    #[api_field(required)]
    next_billing_date: Timestamp,
    /// Timestamp of the last payment. Indicates the start of current billing period.
    #[api_field(required)]
    previous_billing_date: Timestamp,
    /// Amount charged before tax for each recurring payment in smallest currency unit.
    #[api_field(required)]
    recurring_pre_tax_amount: MinorUnit,
    /// Number of payment frequency intervals.
    #[api_field(required)]
    payment_frequency_count: i32,
    #[api_field(required)]
    payment_frequency_interval: ApiEnum<TimeInterval>,
    /// Number of subscription period intervals.
    #[api_field(required)]
    subscription_period_count: i32,
    #[api_field(required)]
    subscription_period_interval: ApiEnum<TimeInterval>,
    /// Number of days in the trial period (0 if no trial).
    #[api_field(required)]
    trial_period_days: i32,
    /// Indicates if the recurring_pre_tax_amount is tax inclusive.
    #[api_field(required)]
    tax_inclusive: bool,
    /// Whether the subscription will be cancelled at the next billing date.
    #[api_field(required)]
    cancel_at_next_billing_date: bool,
    #[api_field(required)]
    metadata: Metadata,
    /// Cancelled timestamp if the subscription is cancelled.
    #[api_field(nullable)]
    cancelled_at: Timestamp,
    #[api_field(nullable)]
    discount_id: String,
    /// Timestamp when the subscription will expire.
    #[api_field(nullable)]
    expires_at: Timestamp,
}

#[model_derive::api_model]
pub struct SubscriptionCreateBody {
    #[api_field(required)]
    billing: BillingAddress,
    #[api_field(required)]
    customer: CustomerRequest,
    /// Unique identifier of the product to subscribe to.
    #[api_field(required)]
    product_id: String,
    /// Number of units to subscribe for. Must be at least 1.
    #[api_field(required)]
    quantity: i64,
    /// Optional trial period in days. If specified, this value overrides the
    /// trial period set in the product's price. Must be between 0 and 10000 days.
    #[api_field(nullable)]
    trial_period_days: i32,
    #[api_field(nullable)]
    discount_code: String,
    /// If true, generates a payment link. Defaults to false if not specified.
    #[api_field(nullable)]
    payment_link: bool,
    #[api_field(nullable)]
    return_url: String,
    #[api_field(optional)]
    metadata: Metadata,
}

#[model_derive::api_model]
pub struct SubscriptionCreateResponse {
    #[api_field(required)]
    subscription_id: String,
    /// First payment id for the subscription.
    #[api_field(required)]
    payment_id: String,
    #[api_field(required)]
    customer: CustomerLimitedDetails,
    /// Tax will be added to the amount and charged to the customer on each billing cycle.
    #[api_field(required)]
    recurring_pre_tax_amount: MinorUnit,
    #[api_field(required)]
    metadata: Metadata,
    /// Client secret used to load the payment SDK for payment.
    #[api_field(nullable)]
    client_secret: String,
    #[api_field(nullable)]
    payment_link: String,
    /// Expiry timestamp of the payment link.
    #[api_field(nullable)]
    expires_on: Timestamp,
    #[api_field(nullable)]
    discount_id: String,
}

#[model_derive::api_model]
pub struct SubscriptionUpdateBody {
    #[api_field(nullable)]
    status: ApiEnum<SubscriptionStatus>,
    #[api_field(nullable)]
    billing: BillingAddress,
    /// When set, the subscription will remain active until the end of the billing period.
    #[api_field(nullable)]
    cancel_at_next_billing_date: bool,
    #[api_field(nullable)]
    metadata: Metadata,
}

/// The only `type` a [`NewPaymentMethod`] accepts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum NewPaymentMethodType {
    New,
}

/// The only `type` an [`ExistingPaymentMethod`] accepts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ExistingPaymentMethodType {
    Existing,
}

#[model_derive::api_model]
/// Collects a new payment method through a payment link.
pub struct NewPaymentMethod {
    #[api_field(required, rename = "type")]
    kind: ApiEnum<NewPaymentMethodType>,
    #[api_field(nullable)]
    return_url: String,
}

#[model_derive::api_model]
/// Switches to a payment method the customer already saved.
pub struct ExistingPaymentMethod {
    #[api_field(required, rename = "type")]
    kind: ApiEnum<ExistingPaymentMethodType>,
    #[api_field(required)]
    payment_method_id: String,
}

impl NewPaymentMethod {
    /// A new payment method collected with an optional redirect.
    pub fn new(
        return_url: Option<String>,
    ) -> common_utils::errors::CustomResult<Self, common_utils::errors::ModelError> {
        Self::builder()
            .kind(NewPaymentMethodType::New)
            .return_url(return_url)
            .build()
    }
}

impl ExistingPaymentMethod {
    /// Refers to the saved payment method `payment_method_id`.
    pub fn new(
        payment_method_id: impl Into<String>,
    ) -> common_utils::errors::CustomResult<Self, common_utils::errors::ModelError> {
        Self::builder()
            .kind(ExistingPaymentMethodType::Existing)
            .payment_method_id(payment_method_id)
            .build()
    }
}

one_of! {
    /// Either a new payment method or a saved one.
    pub enum PaymentMethodUpdateVariant {
        NewPaymentMethod(NewPaymentMethod),
        ExistingPaymentMethod(ExistingPaymentMethod),
    }
}

/// The body of a subscription payment method change.
pub type PaymentMethodUpdateBody = OneOf<PaymentMethodUpdateVariant>;

#[model_derive::api_model]
pub struct SubscriptionListQuery {
    #[api_field(optional)]
    customer_id: String,
    #[api_field(optional)]
    status: ApiEnum<SubscriptionStatus>,
    #[api_field(optional)]
    page_size: u32,
    #[api_field(optional)]
    page_number: u32,
}

/// `POST /subscriptions`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionCreateParams {
    pub body: SubscriptionCreateBody,
}

/// `GET /subscriptions/{subscription_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionRetrieveParams {
    pub subscription_id: String,
}

/// `PATCH /subscriptions/{subscription_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionUpdateParams {
    pub subscription_id: String,
    pub body: SubscriptionUpdateBody,
}

/// `GET /subscriptions`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionListParams {
    pub query: SubscriptionListQuery,
}

/// `POST /subscriptions/{subscription_id}/update-payment-method`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionUpdatePaymentMethodParams {
    pub subscription_id: String,
    pub body: PaymentMethodUpdateBody,
}

common_utils::impl_api_params!(SubscriptionCreateParams, Post, ["subscriptions"], body = body);
common_utils::impl_api_params!(
    SubscriptionRetrieveParams,
    Get,
    ["subscriptions", {subscription_id}]
);
common_utils::impl_api_params!(
    SubscriptionUpdateParams,
    Patch,
    ["subscriptions", {subscription_id}],
    body = body
);
common_utils::impl_api_params!(SubscriptionListParams, Get, ["subscriptions"], query = query);
common_utils::impl_api_params!(
    SubscriptionUpdatePaymentMethodParams,
    Post,
    ["subscriptions", {subscription_id}, "update-payment-method"],
    body = body
);

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::{errors::ModelError, field_store::ApiModel, validation::Validate};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payment_method_type_constants() {
        assert_eq!(
            NewPaymentMethod::new(None).unwrap().to_value(),
            json!({ "type": "new", "return_url": null })
        );
        assert_eq!(
            ExistingPaymentMethod::new("pm_1").unwrap().to_value(),
            json!({ "type": "existing", "payment_method_id": "pm_1" })
        );
    }

    #[test]
    fn test_payment_method_body_resolves_by_type() {
        let existing: PaymentMethodUpdateBody =
            serde_json::from_value(json!({ "type": "existing", "payment_method_id": "pm_1" }))
                .unwrap();
        assert!(existing.try_pick::<ExistingPaymentMethod>().is_some());

        let new: PaymentMethodUpdateBody =
            serde_json::from_value(json!({ "type": "new", "payment_method_id": "pm_1" })).unwrap();
        assert!(new.try_pick::<NewPaymentMethod>().is_some());
        assert_eq!(
            new.raw(),
            &json!({ "type": "new", "payment_method_id": "pm_1" })
        );
    }

    #[test]
    fn test_unknown_payment_method_type_is_unresolved() {
        let body: PaymentMethodUpdateBody =
            serde_json::from_value(json!({ "type": "wallet", "wallet_id": "w_1" })).unwrap();

        assert!(!body.is_resolved());
        assert_eq!(
            body.validate().unwrap_err().current_context(),
            &ModelError::UnknownVariant {
                union_name: "PaymentMethodUpdateVariant"
            }
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "type": "wallet", "wallet_id": "w_1" })
        );
    }

    #[test]
    fn test_subscription_intervals_keep_wire_casing() {
        let interval: ApiEnum<TimeInterval> = serde_json::from_value(json!("Month")).unwrap();
        assert_eq!(interval, TimeInterval::Month);
        assert!(interval.validate().is_ok());
    }
}
