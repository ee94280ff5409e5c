//! Generic transaction record, transport seam and caller-visible outcome types

use bytes::Bytes;
use masking::{PeekInterface, Secret};

use crate::errors::{ConnectorError, CustomResult};

/// One value in the generic transaction record.
///
/// The record is a dynamic field bag; the tagged variants keep scalar
/// values, secret scalar values and the ordered line-item list apart so
/// that downstream code validates shape at the schema boundary instead of
/// relying on implicit absence.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Plain scalar value
    Text(String),
    /// Scalar value that must never appear in logs or debug output
    Sensitive(Secret<String>),
    /// Ordered list of products attached to the transaction
    Items(Vec<LineItem>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Secret<String>> for FieldValue {
    fn from(value: Secret<String>) -> Self {
        Self::Sensitive(value)
    }
}

impl From<Vec<LineItem>> for FieldValue {
    fn from(value: Vec<LineItem>) -> Self {
        Self::Items(value)
    }
}

/// One product or service entry on the transaction.
///
/// Money fields are kept as caller-supplied strings; the gateway schema
/// takes them verbatim. The sequence number is assigned by the field
/// mapper and reflects list position, 1-based and contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    /// Item description
    pub description: Option<String>,
    /// SKU or product code
    pub product_code: Option<String>,
    /// Quantity purchased
    pub quantity: Option<String>,
    /// Unit of measure
    pub unit_of_measure: Option<String>,
    /// Cost of a single unit
    pub unit_cost: Option<String>,
    /// Line total
    pub total: Option<String>,
    /// Discount applied to the line
    pub discount: Option<String>,
    /// Tax charged on the line
    pub tax: Option<String>,
    /// Commodity code
    pub commodity_code: Option<String>,
    /// 1-based position in the products list, assigned at mapping time
    pub item_sequence_number: Option<u32>,
}

/// The generic transaction input: an insertion-ordered mapping from field
/// name to value. One record per transaction attempt; the field mapper
/// mutates it in place and unknown fields pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct TransactionRecord {
    entries: Vec<(String, FieldValue)>,
}

impl TransactionRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, overwriting in place if it already exists so that
    /// insertion order is preserved
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the raw value of a field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns a plain scalar field. Secret values are deliberately not
    /// exposed here; use [`Self::get_secret`] at the serialization boundary.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns a scalar field wrapped for serialization. Plain values are
    /// wrapped on the way out; secret values stay masked in transit.
    pub fn get_secret(&self, name: &str) -> Option<Secret<String>> {
        match self.get(name) {
            Some(FieldValue::Text(value)) => Some(Secret::new(value.clone())),
            Some(FieldValue::Sensitive(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns the ordered line-item list stored under `name`
    pub fn items(&self, name: &str) -> Option<&[LineItem]> {
        match self.get(name) {
            Some(FieldValue::Items(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Mutable access to the ordered line-item list stored under `name`
    pub fn items_mut(&mut self, name: &str) -> Option<&mut Vec<LineItem>> {
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
        {
            Some(FieldValue::Items(items)) => Some(items),
            _ => None,
        }
    }

    /// Whether a field is present with a non-empty value. This is the
    /// predicate the required-field validation runs on.
    pub fn has_value(&self, name: &str) -> bool {
        match self.get(name) {
            Some(FieldValue::Text(value)) => !value.is_empty(),
            Some(FieldValue::Sensitive(value)) => !value.peek().is_empty(),
            Some(FieldValue::Items(items)) => !items.is_empty(),
            None => false,
        }
    }
}

/// Response handed back by the injected transport
#[derive(Debug, Clone)]
pub struct HttpsResponse {
    /// Raw HTTP status line, e.g. `200 OK`
    pub status_line: String,
    /// Response headers in arrival order
    pub headers: Vec<(String, String)>,
    /// Raw response body
    pub body: Bytes,
}

/// Injected HTTPS POST capability.
///
/// TLS, certificates and timeouts are the implementor's concern; this
/// crate performs exactly one blocking exchange per transaction and never
/// retries.
pub trait HttpsPost {
    /// Executes a single POST and returns the raw response
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &[u8],
    ) -> CustomResult<HttpsResponse, ConnectorError>;
}

/// Generic failure taxonomy the vendor result codes map into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureStatus {
    /// Card past its expiration date
    Expired,
    /// Insufficient funds
    Nsf,
    /// Card reported lost or stolen
    Stolen,
    /// Issuer requests the card be picked up
    Pickup,
    /// Card is on a restricted list
    Blacklisted,
    /// Ordinary decline; also the default for unmapped codes
    Decline,
}

/// Caller-visible result of one submitted transaction
#[derive(Debug, Clone, Default)]
pub struct PaymentOutcome {
    /// Whether the gateway approved the transaction
    pub is_success: bool,
    /// Vendor result code, empty if the gateway did not return one
    pub result_code: String,
    /// Authorization code, empty if not returned
    pub authorization_code: String,
    /// Gateway transaction id, empty if not returned
    pub order_number: String,
    /// AVS result code from the fraud block
    pub avs_code: String,
    /// Card validation result code from the fraud block
    pub card_validation_code: String,
    /// Human-readable diagnostic; always populated on failure
    pub error_message: Option<String>,
    /// Machine-readable failure category; populated on failure only
    pub failure_status: Option<FailureStatus>,
}
