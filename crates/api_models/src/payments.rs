use common_utils::{
    api_enum::ApiEnum,
    types::{MinorUnit, Timestamp},
};

use crate::{
    customers::{CustomerLimitedDetails, CustomerRequest},
    disputes::Dispute,
    enums::{CountryCode, Currency, IntentStatus, PaymentMethodType},
    refunds::Refund,
    Metadata,
};

#[model_derive::api_model]
/// The billing address of a payment or subscription.
pub struct BillingAddress {
    /// Two-letter ISO country code (ISO 3166-1 alpha-2).
    #[api_field(required)]
    country: ApiEnum<CountryCode>,
    /// City name.
    #[api_field(nullable)]
    city: String,
    /// State or province name.
    #[api_field(nullable)]
    state: String,
    /// Street address including house number and unit/apartment if applicable.
    #[api_field(nullable)]
    street: String,
    /// Postal code or ZIP code.
    #[api_field(nullable)]
    zipcode: String,
}

#[model_derive::api_model]
pub struct OneTimeProductCartItem {
    #[api_field(required)]
    product_id: String,
    #[api_field(required)]
    quantity: i64,
    /// Amount the customer pays if pay-what-you-want is enabled, in the lowest
    /// denomination of the currency.
    #[api_field(nullable)]
    amount: MinorUnit,
}

#[model_derive::api_model]
pub struct Payment {
    /// Unique identifier for the payment.
    #[api_field(required)]
    payment_id: String,
    /// Identifier of the business associated with the payment.
    #[api_field(required)]
    business_id: String,
    /// Timestamp when the payment was created.
    #[api_field(required)]
    created_at: Timestamp,
    #[api_field(required)]
    currency: ApiEnum<Currency>,
    /// Total amount charged to the customer including tax, in smallest currency unit.
    #[api_field(required)]
    total_amount: MinorUnit,
    /// The amount that will be credited to your account.
    #[api_field(required)]
    settlement_amount: MinorUnit,
    #[api_field(required)]
    settlement_currency: ApiEnum<Currency>,
    #[api_field(required)]
    billing: BillingAddress,
    #[api_field(required)]
    customer: CustomerLimitedDetails,
    #[api_field(required)]
    metadata: Metadata,
    /// List of refunds issued for this payment.
    #[api_field(required)]
    refunds: Vec<Refund>,
    /// List of disputes associated with this payment.
    #[api_field(required)]
    disputes: Vec<Dispute>,
    #[api_field(nullable)]
    status: ApiEnum<IntentStatus>,
    /// Payment method used by the customer (e.g. "card", "bank_transfer").
    #[api_field(nullable)]
    payment_method: String,
    /// Checkout URL.
    #[api_field(nullable)]
    payment_link: String,
    /// An error message if the payment failed.
    #[api_field(nullable)]
    error_message: String,
    /// An error code if the payment failed.
    #[api_field(nullable)]
    error_code: String,
    /// The discount id if a discount is applied.
    #[api_field(nullable)]
    discount_id: String,
    /// Identifier of the subscription if the payment is part of a subscription.
    #[api_field(nullable)]
    subscription_id: String,
    /// Amount of tax collected in smallest currency unit.
    #[api_field(nullable)]
    tax: MinorUnit,
    /// Timestamp when the payment was last updated.
    #[api_field(nullable)]
    updated_at: Timestamp,
    /// List of products purchased in a one-time payment.
    #[api_field(nullable)]
    product_cart: Vec<OneTimeProductCartItem>,
}

#[model_derive::api_model]
pub struct PaymentCreateBody {
    #[api_field(required)]
    billing: BillingAddress,
    /// Customer information for the payment.
    #[api_field(required)]
    customer: CustomerRequest,
    /// List of products in the cart. Must contain at least 1 and at most 100 items.
    #[api_field(required)]
    product_cart: Vec<OneTimeProductCartItem>,
    /// List of payment methods allowed during checkout. Customers will never see
    /// payment methods that are not in this list.
    #[api_field(nullable)]
    allowed_payment_method_types: Vec<ApiEnum<PaymentMethodType>>,
    /// Fix the currency in which the end customer is billed.
    #[api_field(nullable)]
    billing_currency: ApiEnum<Currency>,
    /// Discount code to apply to the transaction.
    #[api_field(nullable)]
    discount_code: String,
    /// Whether to generate a payment link. Defaults to false if not specified.
    #[api_field(nullable)]
    payment_link: bool,
    /// Optional URL to redirect the customer after payment.
    #[api_field(nullable)]
    return_url: String,
    #[api_field(optional)]
    metadata: Metadata,
    /// Display saved payment methods of a returning customer. False by default.
    #[api_field(optional)]
    show_saved_payment_methods: bool,
}

#[model_derive::api_model]
pub struct PaymentCreateResponse {
    #[api_field(required)]
    payment_id: String,
    /// Client secret used to load the payment SDK for payment.
    #[api_field(required)]
    client_secret: String,
    #[api_field(required)]
    customer: CustomerLimitedDetails,
    /// Total amount of the payment in smallest currency unit.
    #[api_field(required)]
    total_amount: MinorUnit,
    #[api_field(required)]
    metadata: Metadata,
    #[api_field(nullable)]
    discount_id: String,
    /// Expiry timestamp of the payment link.
    #[api_field(nullable)]
    expires_on: Timestamp,
    #[api_field(nullable)]
    payment_link: String,
    #[api_field(nullable)]
    product_cart: Vec<OneTimeProductCartItem>,
}

#[model_derive::api_model]
pub struct PaymentListQuery {
    #[api_field(optional)]
    customer_id: String,
    #[api_field(optional)]
    subscription_id: String,
    #[api_field(optional)]
    status: ApiEnum<IntentStatus>,
    /// Get events after this created time.
    #[api_field(optional)]
    created_at_gte: Timestamp,
    /// Get events created before this time.
    #[api_field(optional)]
    created_at_lte: Timestamp,
    #[api_field(optional)]
    page_size: u32,
    #[api_field(optional)]
    page_number: u32,
}

/// `POST /payments`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentCreateParams {
    pub body: PaymentCreateBody,
}

/// `GET /payments/{payment_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentRetrieveParams {
    pub payment_id: String,
}

/// `GET /payments`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentListParams {
    pub query: PaymentListQuery,
}

common_utils::impl_api_params!(PaymentCreateParams, Post, ["payments"], body = body);
common_utils::impl_api_params!(PaymentRetrieveParams, Get, ["payments", {payment_id}]);
common_utils::impl_api_params!(PaymentListParams, Get, ["payments"], query = query);
