//! Commonly used constants

/// Header carrying the body media type
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Media type of every request body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Header identifying the client
pub const USER_AGENT_HEADER: &str = "User-Agent";

/// Value sent in the `User-Agent` header
pub const USER_AGENT: &str = concat!("payments-sdk-rust/", env!("CARGO_PKG_VERSION"));

