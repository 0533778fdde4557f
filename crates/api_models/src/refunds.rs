use common_utils::{
    api_enum::ApiEnum,
    types::{MinorUnit, Timestamp},
};

use crate::enums::{Currency, RefundStatus};

#[model_derive::api_model]
pub struct Refund {
    /// The unique identifier of the refund.
    #[api_field(required)]
    refund_id: String,
    /// The unique identifier of the payment associated with the refund.
    #[api_field(required)]
    payment_id: String,
    /// The unique identifier of the business issuing the refund.
    #[api_field(required)]
    business_id: String,
    /// The timestamp of when the refund was created in UTC.
    #[api_field(required)]
    created_at: Timestamp,
    /// If true the refund is a partial refund.
    #[api_field(required)]
    is_partial: bool,
    #[api_field(required)]
    status: ApiEnum<RefundStatus>,
    /// The refunded amount.
    #[api_field(nullable)]
    amount: MinorUnit,
    #[api_field(nullable)]
    currency: ApiEnum<Currency>,
    /// The reason provided for the refund, if any. Optional.
    #[api_field(nullable)]
    reason: String,
}

#[model_derive::api_model]
pub struct RefundItem {
    /// The id of the item (i.e. `product_id` or `addon_id`).
    #[api_field(required)]
    item_id: String,
    /// The amount to refund. If None, the full amount for the item is refunded.
    #[api_field(nullable)]
    amount: MinorUnit,
    /// Specify if tax is inclusive of the refund. Default true.
    #[api_field(nullable)]
    tax_inclusive: bool,
}

#[model_derive::api_model]
pub struct RefundCreateBody {
    /// The unique identifier of the payment to be refunded.
    #[api_field(required)]
    payment_id: String,
    /// The reason for the refund, if any.
    #[api_field(nullable)]
    reason: String,
    /// Partially refund an existing payment.
    #[api_field(nullable)]
    items: Vec<RefundItem>,
}

#[model_derive::api_model]
pub struct RefundListQuery {
    #[api_field(optional)]
    payment_id: String,
    #[api_field(optional)]
    status: ApiEnum<RefundStatus>,
    #[api_field(optional)]
    page_size: u32,
    #[api_field(optional)]
    page_number: u32,
}

/// `POST /refunds`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundCreateParams {
    pub body: RefundCreateBody,
}

/// `GET /refunds/{refund_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundRetrieveParams {
    pub refund_id: String,
}

/// `GET /refunds`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundListParams {
    pub query: RefundListQuery,
}

common_utils::impl_api_params!(RefundCreateParams, Post, ["refunds"], body = body);
common_utils::impl_api_params!(RefundRetrieveParams, Get, ["refunds", {refund_id}]);
common_utils::impl_api_params!(RefundListParams, Get, ["refunds"], query = query);
