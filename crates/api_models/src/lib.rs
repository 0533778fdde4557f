#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod checkout_sessions;
pub mod customers;
pub mod disputes;
pub mod enums;
pub mod list;
pub mod payments;
pub mod refunds;
pub mod subscriptions;

/// Free-form key and value pairs attached to a resource, kept sorted by key.
pub type Metadata = std::collections::BTreeMap<String, String>;
