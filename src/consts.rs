//! Connector integration related const declarations

/// Result code the gateway returns for an approved transaction
pub const APPROVAL_RESPONSE_CODE: &str = "000";

/// Root-level response code signalling a gateway-level rejection
/// (malformed request, authentication failure) rather than a decline
pub const GATEWAY_REJECTION_CODE: &str = "1";

/// Content type for outbound requests
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Declaration prepended to every serialized request document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Fixed customerId attribute carried on every transaction element
pub const DEFAULT_CUSTOMER_ID: &str = "1";

/// Fixed delivery type the gateway schema expects for service merchants
pub const DELIVERY_TYPE: &str = "SVC";
