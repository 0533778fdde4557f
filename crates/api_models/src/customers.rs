use common_utils::{one_of, one_of::OneOf, types::Timestamp};

use crate::Metadata;

#[model_derive::api_model]
/// A customer of the business.
pub struct Customer {
    #[api_field(required)]
    business_id: String,
    #[api_field(required)]
    created_at: Timestamp,
    #[api_field(required)]
    customer_id: String,
    #[api_field(required)]
    email: String,
    #[api_field(required)]
    name: String,
    #[api_field(nullable)]
    phone_number: String,
    /// Additional metadata associated with the customer.
    #[api_field(optional)]
    metadata: Metadata,
}

#[model_derive::api_model]
/// The customer as embedded in payments and subscriptions.
pub struct CustomerLimitedDetails {
    /// Unique identifier for the customer.
    #[api_field(required)]
    customer_id: String,
    /// Email address of the customer.
    #[api_field(required)]
    email: String,
    /// Full name of the customer.
    #[api_field(required)]
    name: String,
    /// Phone number of the customer.
    #[api_field(nullable)]
    phone_number: String,
    /// Additional metadata associated with the customer.
    #[api_field(optional)]
    metadata: Metadata,
}

#[model_derive::api_model]
/// Refers to a customer that already exists.
pub struct AttachExistingCustomer {
    #[api_field(required)]
    customer_id: String,
}

#[model_derive::api_model]
/// Describes a customer to create, or to reuse when one with the same email exists.
pub struct NewCustomer {
    /// Email is required for creating a new customer.
    #[api_field(required)]
    email: String,
    /// Optional full name of the customer. If provided during session creation, it is
    /// persisted and becomes immutable for the session.
    #[api_field(nullable)]
    name: String,
    #[api_field(nullable)]
    phone_number: String,
    /// Create a new customer even if one with the same email exists.
    #[api_field(optional)]
    create_new_customer: bool,
}

one_of! {
    /// Either an existing customer or the details of a new one.
    pub enum CustomerRequestVariant {
        AttachExistingCustomer(AttachExistingCustomer),
        NewCustomer(NewCustomer),
    }
}

/// The customer of a payment, checkout session or subscription.
pub type CustomerRequest = OneOf<CustomerRequestVariant>;

#[model_derive::api_model]
pub struct CustomerCreateBody {
    #[api_field(required)]
    email: String,
    #[api_field(required)]
    name: String,
    #[api_field(nullable)]
    phone_number: String,
    #[api_field(optional)]
    metadata: Metadata,
}

#[model_derive::api_model]
pub struct CustomerUpdateBody {
    #[api_field(nullable)]
    name: String,
    #[api_field(nullable)]
    phone_number: String,
    #[api_field(optional)]
    metadata: Metadata,
}

#[model_derive::api_model]
pub struct CustomerListQuery {
    /// Filter by exact email.
    #[api_field(optional)]
    email: String,
    /// Page size. Default is 10, max is 100.
    #[api_field(optional)]
    page_size: u32,
    /// Page number. Default is 0.
    #[api_field(optional)]
    page_number: u32,
}

/// `POST /customers`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerCreateParams {
    pub body: CustomerCreateBody,
}

/// `GET /customers/{customer_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerRetrieveParams {
    pub customer_id: String,
}

/// `PATCH /customers/{customer_id}`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerUpdateParams {
    pub customer_id: String,
    pub body: CustomerUpdateBody,
}

/// `GET /customers`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    pub query: CustomerListQuery,
}

common_utils::impl_api_params!(CustomerCreateParams, Post, ["customers"], body = body);
common_utils::impl_api_params!(CustomerRetrieveParams, Get, ["customers", {customer_id}]);
common_utils::impl_api_params!(
    CustomerUpdateParams,
    Patch,
    ["customers", {customer_id}],
    body = body
);
common_utils::impl_api_params!(CustomerListParams, Get, ["customers"], query = query);

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::{errors::ModelError, field_store::ApiModel, validation::Validate};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_new_customer_none_is_never_sent() {
        let assigned = NewCustomer::builder()
            .email("email")
            .create_new_customer(None)
            .build()
            .unwrap();
        let untouched = NewCustomer::builder().email("email").build().unwrap();

        assert_eq!(assigned, untouched);
        assert_eq!(assigned.to_value(), json!({ "email": "email" }));
        assert_eq!(assigned.create_new_customer().unwrap(), None);
    }

    #[test]
    fn test_limited_details_metadata_none_is_never_sent() {
        let details = CustomerLimitedDetails::builder()
            .customer_id("cus_1")
            .email("email")
            .name("name")
            .phone_number(None)
            .metadata(None)
            .build()
            .unwrap();

        assert_eq!(
            details.to_value(),
            json!({ "customer_id": "cus_1", "email": "email", "name": "name", "phone_number": null })
        );
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_customer_requires_created_at() {
        let customer = Customer::from_value(json!({
            "business_id": "bus_1",
            "customer_id": "cus_1",
            "email": "email",
            "name": "name"
        }))
        .unwrap();

        let error = customer.validate().unwrap_err();
        assert_eq!(
            error.current_context(),
            &ModelError::MissingRequiredField {
                field_name: "created_at".to_string()
            }
        );
    }

    #[test]
    fn test_union_from_variant_does_not_parse() {
        let request = CustomerRequest::new(
            AttachExistingCustomer::builder()
                .customer_id("cus_1")
                .build()
                .unwrap(),
        );

        assert!(request.try_pick::<NewCustomer>().is_none());
        assert_eq!(
            request
                .try_pick::<AttachExistingCustomer>()
                .unwrap()
                .customer_id()
                .unwrap(),
            "cus_1"
        );
    }
}
