use std::{collections::HashMap, sync::LazyLock};

use error_stack::report;
use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    cards::{self, CardIssuer},
    configs::LitleConfig,
    consts,
    errors::{ConnectorError, CustomResult},
    types::{FailureStatus, HttpsResponse, LineItem, PaymentOutcome, TransactionRecord},
    utils,
};

// Hard limit in the gateway schema for the statement descriptor.
const DESCRIPTOR_MAX_LENGTH: usize = 25;

/// Transaction shapes the gateway schema defines. Anything else is
/// explicitly unsupported rather than guessed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAction {
    Sale,
    Authorization,
    Capture,
    Credit,
    Void,
    Other(String),
}

impl PaymentAction {
    /// Resolves an already-translated wire action name
    pub fn from_wire(name: &str) -> Self {
        match name {
            "sale" => Self::Sale,
            "authorization" => Self::Authorization,
            "capture" => Self::Capture,
            "credit" => Self::Credit,
            "void" => Self::Void,
            other => Self::Other(other.to_string()),
        }
    }

    /// Element name of the action on the wire
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Sale => "sale",
            Self::Authorization => "authorization",
            Self::Capture => "capture",
            Self::Credit => "credit",
            Self::Void => "void",
            Self::Other(name) => name.as_str(),
        }
    }
}

/// Translates a generic action string into the gateway's wire action.
/// Unmapped actions pass through lower-cased, which keeps forward
/// compatibility with wire names the generic layer does not know about.
pub fn translate_action(action: &str) -> String {
    let action = action.to_lowercase();
    match action.as_str() {
        "normal authorization" => "sale".to_string(),
        "authorization only" => "authorization".to_string(),
        "post authorization" => "capture".to_string(),
        "void" => "void".to_string(),
        "credit" => "credit".to_string(),
        _ => action,
    }
}

// Diners Club, JCB and China UnionPay collapse to DI, matching the
// historical vendor table the live integration runs against.
fn card_type_code(issuer: CardIssuer) -> Option<&'static str> {
    match issuer {
        CardIssuer::Visa => Some("VI"),
        CardIssuer::Master => Some("MC"),
        CardIssuer::AmericanExpress => Some("AX"),
        CardIssuer::Discover
        | CardIssuer::DinersClub
        | CardIssuer::JCB
        | CardIssuer::UnionPay => Some("DI"),
        CardIssuer::Maestro | CardIssuer::CarteBlanche => None,
    }
}

/// Normalizes the generic record in place, populating every derived field
/// the request builder reads. Never fails; missing optional fields simply
/// stay absent and are omitted downstream.
pub fn map_transaction_fields(record: &mut TransactionRecord) {
    if let Some(action) = record.get_str("action").map(translate_action) {
        record.set("action", action);
    }
    if let Some(phone) = record.get_str("company_phone").map(utils::digits_only) {
        record.set("company_phone", phone);
    }
    // Two-step lookup: brand classification first, the caller-supplied
    // generic type field as the explicit fallback.
    let card_type = record
        .get_secret("card_number")
        .and_then(|number| cards::get_card_issuer(number.peek()).ok())
        .and_then(card_type_code)
        .map(str::to_owned)
        .or_else(|| record.get_str("type").map(str::to_owned));
    if let Some(card_type) = card_type {
        record.set("card_type", card_type);
    }
    // Only the literal "YES" marks a recurring order.
    let recurring = record.get_str("recurring_billing") == Some("YES");
    record.set("order_source", if recurring { "recurring" } else { "ecommerce" });
    record.set("customer_type", if recurring { "Existing" } else { "New" });
    if let Some(expiration) = record.get_str("expiration").map(utils::digits_only) {
        record.set("expiration", expiration);
    }
    record.set("deliverytype", consts::DELIVERY_TYPE);
    if let Some(items) = record.items_mut("products") {
        for (index, item) in items.iter_mut().enumerate() {
            item.item_sequence_number = Some(index as u32 + 1);
        }
    }
}

/// Required-field set for an action. Runs against the mapped record
/// before any network activity.
pub fn required_fields(action: &PaymentAction) -> &'static [&'static str] {
    match action {
        PaymentAction::Capture | PaymentAction::Credit => {
            &["login", "action", "type", "order_number", "amount"]
        }
        PaymentAction::Void => &["login", "action", "type", "order_number"],
        _ => &["login", "action", "type"],
    }
}

/// Fails the transaction before transmission if any required key is
/// missing or empty
pub fn validate_required_fields(
    record: &TransactionRecord,
    action: &PaymentAction,
) -> CustomResult<(), ConnectorError> {
    for field_name in required_fields(action) {
        if !record.has_value(field_name) {
            return Err(report!(ConnectorError::MissingRequiredField {
                field_name,
            }));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename = "litleOnlineRequest")]
pub struct LitleOnlineRequest {
    #[serde(rename = "@version")]
    version: String,
    #[serde(rename = "@xmlns")]
    xmlns: String,
    #[serde(rename = "@merchantId", skip_serializing_if = "Option::is_none")]
    merchant_id: Option<String>,
    authentication: Authentication,
    #[serde(skip_serializing_if = "Option::is_none")]
    sale: Option<SaleRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization: Option<SaleRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capture: Option<CaptureRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit: Option<CreditRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    void: Option<VoidRequest>,
}

#[derive(Debug, Serialize)]
struct Authentication {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<Secret<String>>,
}

/// Shared shape for sale and authorization requests; the two differ only
/// in the element name the gateway sees.
#[derive(Debug, Serialize)]
pub struct SaleRequest {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "@reportGroup")]
    report_group: String,
    #[serde(rename = "@customerId")]
    customer_id: &'static str,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(rename = "orderSource", skip_serializing_if = "Option::is_none")]
    order_source: Option<String>,
    #[serde(rename = "customerInfo", skip_serializing_if = "Option::is_none")]
    customer_info: Option<CustomerInfo>,
    #[serde(rename = "billToAddress", skip_serializing_if = "Option::is_none")]
    bill_to_address: Option<Address>,
    #[serde(rename = "shipToAddress", skip_serializing_if = "Option::is_none")]
    ship_to_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<CardData>,
    #[serde(rename = "customBilling", skip_serializing_if = "Option::is_none")]
    custom_billing: Option<CustomBilling>,
    #[serde(rename = "enhancedData", skip_serializing_if = "Option::is_none")]
    enhanced_data: Option<EnhancedData>,
}

#[derive(Debug, Serialize)]
pub struct CaptureRequest {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "@reportGroup")]
    report_group: String,
    #[serde(rename = "@customerId")]
    customer_id: &'static str,
    #[serde(rename = "litleTxnId", skip_serializing_if = "Option::is_none")]
    litle_txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(rename = "enhancedData", skip_serializing_if = "Option::is_none")]
    enhanced_data: Option<EnhancedData>,
}

#[derive(Debug, Serialize)]
pub struct CreditRequest {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "@reportGroup")]
    report_group: String,
    #[serde(rename = "@customerId")]
    customer_id: &'static str,
    #[serde(rename = "litleTxnId", skip_serializing_if = "Option::is_none")]
    litle_txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<String>,
    #[serde(rename = "customBilling", skip_serializing_if = "Option::is_none")]
    custom_billing: Option<CustomBilling>,
    #[serde(rename = "enhancedData", skip_serializing_if = "Option::is_none")]
    enhanced_data: Option<EnhancedData>,
}

#[derive(Debug, Serialize)]
pub struct VoidRequest {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "@reportGroup")]
    report_group: String,
    #[serde(rename = "@customerId")]
    customer_id: &'static str,
    #[serde(rename = "litleTxnId", skip_serializing_if = "Option::is_none")]
    litle_txn_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CustomerInfo {
    #[serde(rename = "customerType", skip_serializing_if = "Option::is_none")]
    customer_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Secret<String>>,
    #[serde(rename = "addressLine1", skip_serializing_if = "Option::is_none")]
    address_line1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<Secret<String>>,
}

impl Address {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.address_line1.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
            && self.country.is_none()
            && self.phone.is_none()
    }
}

#[derive(Debug, Serialize)]
struct CardData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<Secret<String>>,
    #[serde(rename = "expDate", skip_serializing_if = "Option::is_none")]
    exp_date: Option<Secret<String>>,
    #[serde(rename = "cardValidationNum", skip_serializing_if = "Option::is_none")]
    card_validation_num: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
struct CustomBilling {
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnhancedData {
    #[serde(rename = "orderDate", skip_serializing_if = "Option::is_none")]
    order_date: Option<String>,
    #[serde(rename = "salesTax", skip_serializing_if = "Option::is_none")]
    sales_tax: Option<String>,
    #[serde(
        rename = "invoiceReferenceNumber",
        skip_serializing_if = "Option::is_none"
    )]
    invoice_reference_number: Option<String>,
    #[serde(rename = "customerReference", skip_serializing_if = "Option::is_none")]
    customer_reference: Option<String>,
    #[serde(rename = "lineItemData", skip_serializing_if = "Vec::is_empty")]
    line_items: Vec<LineItemData>,
}

/// One `lineItemData` entry; field order is part of the wire contract.
#[derive(Debug, Serialize)]
struct LineItemData {
    #[serde(rename = "itemSequenceNumber", skip_serializing_if = "Option::is_none")]
    item_sequence_number: Option<u32>,
    #[serde(rename = "itemDescription", skip_serializing_if = "Option::is_none")]
    item_description: Option<String>,
    #[serde(rename = "productCode", skip_serializing_if = "Option::is_none")]
    product_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<String>,
    #[serde(rename = "unitOfMeasure", skip_serializing_if = "Option::is_none")]
    unit_of_measure: Option<String>,
    #[serde(rename = "taxAmount", skip_serializing_if = "Option::is_none")]
    tax_amount: Option<String>,
    #[serde(rename = "lineItemTotal", skip_serializing_if = "Option::is_none")]
    line_item_total: Option<String>,
    #[serde(rename = "itemDiscountAmount", skip_serializing_if = "Option::is_none")]
    item_discount_amount: Option<String>,
    #[serde(rename = "commodityCode", skip_serializing_if = "Option::is_none")]
    commodity_code: Option<String>,
    #[serde(rename = "unitCost", skip_serializing_if = "Option::is_none")]
    unit_cost: Option<String>,
}

impl From<&LineItem> for LineItemData {
    fn from(item: &LineItem) -> Self {
        Self {
            item_sequence_number: item.item_sequence_number,
            item_description: item.description.clone(),
            product_code: item.product_code.clone(),
            quantity: item.quantity.clone(),
            unit_of_measure: item.unit_of_measure.clone(),
            tax_amount: item.tax.clone(),
            line_item_total: item.total.clone(),
            item_discount_amount: item.discount.clone(),
            commodity_code: item.commodity_code.clone(),
            unit_cost: item.unit_cost.clone(),
        }
    }
}

impl TryFrom<(&LitleConfig, &TransactionRecord)> for LitleOnlineRequest {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(
        (config, record): (&LitleConfig, &TransactionRecord),
    ) -> Result<Self, Self::Error> {
        let action = PaymentAction::from_wire(record.get_str("action").unwrap_or_default());
        let mut request = Self {
            version: config.schema_version.clone(),
            xmlns: config.xmlns.clone(),
            merchant_id: record.get_str("merchantid").map(str::to_owned),
            authentication: Authentication {
                user: record.get_str("login").map(str::to_owned),
                password: record.get_secret("password"),
            },
            sale: None,
            authorization: None,
            capture: None,
            credit: None,
            void: None,
        };
        match action {
            PaymentAction::Sale => request.sale = Some(build_sale(config, record)),
            PaymentAction::Authorization => {
                request.authorization = Some(build_sale(config, record));
            }
            PaymentAction::Capture => request.capture = Some(build_capture(config, record)),
            PaymentAction::Credit => request.credit = Some(build_credit(config, record)),
            PaymentAction::Void => request.void = Some(build_void(config, record)),
            PaymentAction::Other(name) => {
                return Err(report!(ConnectorError::NotSupported {
                    message: format!("Payment action {name}"),
                    connector: "litle",
                }));
            }
        }
        Ok(request)
    }
}

fn build_sale(config: &LitleConfig, record: &TransactionRecord) -> SaleRequest {
    SaleRequest {
        id: record.get_str("invoice_number").map(str::to_owned),
        report_group: config.report_group.clone(),
        customer_id: consts::DEFAULT_CUSTOMER_ID,
        order_id: record.get_str("invoice_number").map(str::to_owned),
        amount: minor_unit_amount(record),
        order_source: record.get_str("order_source").map(str::to_owned),
        customer_info: customer_info(record),
        bill_to_address: bill_to_address(record),
        ship_to_address: ship_to_address(record),
        card: card_data(record),
        custom_billing: custom_billing(record),
        enhanced_data: enhanced_data(record),
    }
}

fn build_capture(config: &LitleConfig, record: &TransactionRecord) -> CaptureRequest {
    CaptureRequest {
        id: record.get_str("invoice_number").map(str::to_owned),
        report_group: config.report_group.clone(),
        customer_id: consts::DEFAULT_CUSTOMER_ID,
        litle_txn_id: record.get_str("order_number").map(str::to_owned),
        amount: minor_unit_amount(record),
        enhanced_data: enhanced_data(record),
    }
}

fn build_credit(config: &LitleConfig, record: &TransactionRecord) -> CreditRequest {
    CreditRequest {
        id: record.get_str("invoice_number").map(str::to_owned),
        report_group: config.report_group.clone(),
        customer_id: consts::DEFAULT_CUSTOMER_ID,
        litle_txn_id: record.get_str("order_number").map(str::to_owned),
        amount: minor_unit_amount(record),
        custom_billing: custom_billing(record),
        enhanced_data: enhanced_data(record),
    }
}

fn build_void(config: &LitleConfig, record: &TransactionRecord) -> VoidRequest {
    VoidRequest {
        id: record.get_str("invoice_number").map(str::to_owned),
        report_group: config.report_group.clone(),
        customer_id: consts::DEFAULT_CUSTOMER_ID,
        litle_txn_id: record.get_str("order_number").map(str::to_owned),
    }
}

fn minor_unit_amount(record: &TransactionRecord) -> Option<String> {
    record
        .get_str("amount")
        .and_then(utils::to_minor_unit_string)
}

fn customer_info(record: &TransactionRecord) -> Option<CustomerInfo> {
    record
        .get_str("customer_type")
        .map(|customer_type| CustomerInfo {
            customer_type: Some(customer_type.to_string()),
        })
}

fn bill_to_address(record: &TransactionRecord) -> Option<Address> {
    let address = Address {
        name: record.get_secret("name"),
        email: record.get_secret("email"),
        address_line1: record.get_secret("address"),
        city: record.get_str("city").map(str::to_owned),
        state: record.get_str("state").map(str::to_owned),
        zip: record.get_secret("zip"),
        country: record.get_str("country").map(str::to_owned),
        phone: record.get_secret("phone"),
    };
    (!address.is_empty()).then_some(address)
}

fn ship_to_address(record: &TransactionRecord) -> Option<Address> {
    let address = Address {
        name: record.get_secret("ship_name"),
        email: None,
        address_line1: record.get_secret("ship_address"),
        city: record.get_str("ship_city").map(str::to_owned),
        state: record.get_str("ship_state").map(str::to_owned),
        zip: record.get_secret("ship_zip"),
        country: record.get_str("ship_country").map(str::to_owned),
        phone: None,
    };
    (!address.is_empty()).then_some(address)
}

fn card_data(record: &TransactionRecord) -> Option<CardData> {
    let card = CardData {
        card_type: record.get_str("card_type").map(str::to_owned),
        number: record.get_secret("card_number"),
        exp_date: record.get_secret("expiration"),
        card_validation_num: record.get_secret("cvv2"),
    };
    card.number.is_some().then_some(card)
}

fn custom_billing(record: &TransactionRecord) -> Option<CustomBilling> {
    let billing = CustomBilling {
        phone: record.get_str("company_phone").map(str::to_owned),
        descriptor: record
            .get_str("description")
            .map(|descriptor| utils::truncate(descriptor, DESCRIPTOR_MAX_LENGTH)),
    };
    (billing.phone.is_some() || billing.descriptor.is_some()).then_some(billing)
}

fn enhanced_data(record: &TransactionRecord) -> Option<EnhancedData> {
    let line_items = record
        .items("products")
        .map(|items| items.iter().map(LineItemData::from).collect::<Vec<_>>())
        .unwrap_or_default();
    let data = EnhancedData {
        order_date: record.get_str("order_date").map(str::to_owned),
        sales_tax: record.get_str("salestax").map(str::to_owned),
        invoice_reference_number: record.get_str("invoice_number").map(str::to_owned),
        customer_reference: record.get_str("po_number").map(str::to_owned),
        line_items,
    };
    let populated = data.order_date.is_some()
        || data.sales_tax.is_some()
        || data.invoice_reference_number.is_some()
        || data.customer_reference.is_some()
        || !data.line_items.is_empty();
    populated.then_some(data)
}

#[derive(Debug, Deserialize)]
pub struct LitleOnlineResponse {
    #[serde(rename = "@response")]
    pub response: Option<String>,
    #[serde(rename = "@message")]
    pub message: Option<String>,
    #[serde(rename = "saleResponse")]
    sale_response: Option<TransactionResponse>,
    #[serde(rename = "authorizationResponse")]
    authorization_response: Option<TransactionResponse>,
    #[serde(rename = "captureResponse")]
    capture_response: Option<TransactionResponse>,
    #[serde(rename = "creditResponse")]
    credit_response: Option<TransactionResponse>,
    #[serde(rename = "voidResponse")]
    void_response: Option<TransactionResponse>,
}

impl LitleOnlineResponse {
    fn transaction_block(&self, action: &PaymentAction) -> Option<&TransactionResponse> {
        match action {
            PaymentAction::Sale => self.sale_response.as_ref(),
            PaymentAction::Authorization => self.authorization_response.as_ref(),
            PaymentAction::Capture => self.capture_response.as_ref(),
            PaymentAction::Credit => self.credit_response.as_ref(),
            PaymentAction::Void => self.void_response.as_ref(),
            PaymentAction::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionResponse {
    #[serde(rename = "litleTxnId")]
    litle_txn_id: Option<String>,
    response: Option<String>,
    message: Option<String>,
    #[serde(rename = "authCode")]
    auth_code: Option<String>,
    #[serde(rename = "fraudResult")]
    fraud_result: Option<FraudResult>,
}

#[derive(Debug, Default, Deserialize)]
struct FraudResult {
    #[serde(rename = "avsResult")]
    avs_result: Option<String>,
    #[serde(rename = "cardValidationResult")]
    card_validation_result: Option<String>,
}

// Vendor result codes with a failure category other than the default.
static FAILURE_STATUS_BY_CODE: LazyLock<HashMap<&'static str, FailureStatus>> =
    LazyLock::new(|| {
        HashMap::from([
            ("110", FailureStatus::Nsf),         // Insufficient funds
            ("303", FailureStatus::Pickup),      // Pick up card
            ("304", FailureStatus::Stolen),      // Lost/stolen card
            ("305", FailureStatus::Expired),     // Expired card
            ("308", FailureStatus::Blacklisted), // Restricted card
        ])
    });

fn failure_status_for_code(code: &str) -> FailureStatus {
    FAILURE_STATUS_BY_CODE
        .get(code)
        .copied()
        .unwrap_or(FailureStatus::Decline)
}

fn synthesized_error_message(res: &HttpsResponse) -> String {
    let headers = res
        .headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{}\n{}\n{}",
        res.status_line,
        headers,
        String::from_utf8_lossy(&res.body)
    )
}

/// Turns a parsed response document into the caller-visible outcome.
///
/// A root-level rejection code marks a gateway rejection (malformed
/// request, authentication failure) and short-circuits the action block
/// lookup; otherwise success is decided by an exact match on the approval
/// result code. Every failure carries a non-empty diagnostic, synthesized
/// from the raw exchange when the gateway supplied no message.
pub fn interpret_response(
    action: &PaymentAction,
    response: &LitleOnlineResponse,
    res: &HttpsResponse,
) -> PaymentOutcome {
    let gateway_rejection =
        response.response.as_deref() == Some(consts::GATEWAY_REJECTION_CODE);
    let block = if gateway_rejection {
        None
    } else {
        response.transaction_block(action)
    };
    let mut message = if gateway_rejection {
        response.message.clone()
    } else {
        block.and_then(|block| block.message.clone())
    };

    let result_code = block
        .and_then(|block| block.response.clone())
        .unwrap_or_default();
    let is_success = !gateway_rejection && result_code == consts::APPROVAL_RESPONSE_CODE;

    let mut outcome = PaymentOutcome {
        is_success,
        result_code,
        authorization_code: block
            .and_then(|block| block.auth_code.clone())
            .unwrap_or_default(),
        order_number: block
            .and_then(|block| block.litle_txn_id.clone())
            .unwrap_or_default(),
        avs_code: block
            .and_then(|block| block.fraud_result.as_ref())
            .and_then(|fraud| fraud.avs_result.clone())
            .unwrap_or_default(),
        card_validation_code: block
            .and_then(|block| block.fraud_result.as_ref())
            .and_then(|fraud| fraud.card_validation_result.clone())
            .unwrap_or_default(),
        error_message: None,
        failure_status: None,
    };

    if !is_success {
        outcome.failure_status = Some(failure_status_for_code(&outcome.result_code));
        if message.as_deref().map_or(true, str::is_empty) {
            message = Some(synthesized_error_message(res));
        }
        outcome.error_message = message;
    }
    outcome
}
