use common_utils::{api_enum::ApiEnum, types::Timestamp};

use crate::enums::{DisputeStage, DisputeStatus};

#[model_derive::api_model]
pub struct Dispute {
    /// The unique identifier of the dispute.
    #[api_field(required)]
    dispute_id: String,
    /// The unique identifier of the payment associated with the dispute.
    #[api_field(required)]
    payment_id: String,
    /// The unique identifier of the business involved in the dispute.
    #[api_field(required)]
    business_id: String,
    /// The amount involved in the dispute, represented as a string to accommodate
    /// precision.
    #[api_field(required)]
    amount: String,
    /// The currency of the disputed amount, represented as an ISO 4217 currency code.
    #[api_field(required)]
    currency: String,
    /// The timestamp of when the dispute was created, in UTC.
    #[api_field(required)]
    created_at: Timestamp,
    #[api_field(required)]
    dispute_stage: ApiEnum<DisputeStage>,
    #[api_field(required)]
    dispute_status: ApiEnum<DisputeStatus>,
    /// Remarks
    #[api_field(nullable)]
    remarks: String,
}

#[model_derive::api_model]
pub struct DisputeListQuery {
    #[api_field(optional)]
    dispute_status: ApiEnum<DisputeStatus>,
    #[api_field(optional)]
    dispute_stage: ApiEnum<DisputeStage>,
    #[api_field(optional)]
    customer_id: String,
    #[api_field(optional)]
    page_size: u32,
    #[api_field(optional)]
    page_number: u32,
}

/// `GET /disputes/{dispute_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisputeRetrieveParams {
    pub dispute_id: String,
}

/// `GET /disputes`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisputeListParams {
    pub query: DisputeListQuery,
}

common_utils::impl_api_params!(DisputeRetrieveParams, Get, ["disputes", {dispute_id}]);
common_utils::impl_api_params!(DisputeListParams, Get, ["disputes"], query = query);
