use std::cell::RefCell;

use bytes::Bytes;
use litle_connector::{
    configs::LitleConfig,
    errors::{ConnectorError, CustomResult},
    types::{FailureStatus, HttpsPost, HttpsResponse, LineItem, TransactionRecord},
    Litle,
};
use masking::Secret;

struct MockTransport {
    status_line: &'static str,
    body: &'static str,
    last_request: RefCell<Option<String>>,
}

impl MockTransport {
    fn returning(status_line: &'static str, body: &'static str) -> Self {
        Self {
            status_line,
            body,
            last_request: RefCell::new(None),
        }
    }

    fn last_request(&self) -> String {
        self.last_request
            .borrow()
            .clone()
            .expect("a request should have been sent")
    }
}

impl HttpsPost for MockTransport {
    fn post(
        &self,
        _url: &str,
        _headers: &[(String, String)],
        body: &[u8],
    ) -> CustomResult<HttpsResponse, ConnectorError> {
        self.last_request
            .replace(Some(String::from_utf8_lossy(body).into_owned()));
        Ok(HttpsResponse {
            status_line: self.status_line.to_string(),
            headers: vec![("Content-Type".to_string(), "text/xml".to_string())],
            body: Bytes::from(self.body),
        })
    }
}

const APPROVED_SALE: &str = r#"<litleOnlineResponse version="7.2" response="0" message="Valid Format" xmlns="http://www.litle.com/schema"><saleResponse id="INV0001" reportGroup="Default Report Group" customerId="1"><litleTxnId>100000000000000001</litleTxnId><orderId>INV0001</orderId><response>000</response><message>Approved</message><authCode>654321</authCode><fraudResult><avsResult>01</avsResult><cardValidationResult>M</cardValidationResult></fraudResult></saleResponse></litleOnlineResponse>"#;

const DECLINED_SALE: &str = r#"<litleOnlineResponse version="7.2" response="0" message="Valid Format" xmlns="http://www.litle.com/schema"><saleResponse><litleTxnId>100000000000000002</litleTxnId><response>110</response><message>Insufficient Funds</message></saleResponse></litleOnlineResponse>"#;

const GATEWAY_REJECTION: &str = r#"<litleOnlineResponse version="7.2" response="1" message="Error parsing request" xmlns="http://www.litle.com/schema"></litleOnlineResponse>"#;

const APPROVED_VOID: &str = r#"<litleOnlineResponse version="7.2" response="0" message="Valid Format" xmlns="http://www.litle.com/schema"><voidResponse><litleTxnId>100000000000000003</litleTxnId><response>000</response><message>Approved</message></voidResponse></litleOnlineResponse>"#;

fn card_record() -> TransactionRecord {
    let mut record = TransactionRecord::new();
    record.set("login", "LOGINID");
    record.set("password", Secret::new("PASSWORD".to_string()));
    record.set("merchantid", "101");
    record.set("action", "Normal Authorization");
    record.set("type", "CC");
    record.set("amount", "49.95");
    record.set("invoice_number", "INV0001");
    record.set("card_number", Secret::new("4111111111111111".to_string()));
    record.set("expiration", "09/29");
    record.set("cvv2", Secret::new("123".to_string()));
    record.set("name", "Tofu Beast");
    record.set("address", "123 Anystreet");
    record.set("city", "Anywhere");
    record.set("state", "GA");
    record.set("zip", "84058");
    record.set("country", "US");
    record
}

#[test]
fn approved_sale_round_trip() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", APPROVED_SALE);
    let mut record = card_record();

    let outcome = client
        .submit(&mut record, &transport)
        .expect("submission should succeed");

    let request = transport.last_request();
    assert!(request.starts_with(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><litleOnlineRequest version="7.2""#
    ));
    assert!(request.contains("<type>VI</type>"));
    assert!(request.contains("<amount>4995</amount>"));
    assert!(request.contains("<orderSource>ecommerce</orderSource>"));

    assert!(outcome.is_success);
    assert_eq!(outcome.authorization_code, "654321");
    assert_eq!(outcome.order_number, "100000000000000001");
    assert_eq!(outcome.avs_code, "01");
    assert_eq!(outcome.card_validation_code, "M");
}

#[test]
fn recurring_billing_flag_switches_order_source() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", APPROVED_SALE);
    let mut record = card_record();
    record.set("recurring_billing", "YES");

    client
        .submit(&mut record, &transport)
        .expect("submission should succeed");

    let request = transport.last_request();
    assert!(request.contains("<orderSource>recurring</orderSource>"));
    assert!(request.contains("<customerType>Existing</customerType>"));
}

#[test]
fn line_items_are_serialized_in_order() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", APPROVED_SALE);
    let mut record = card_record();
    record.set(
        "products",
        vec![
            LineItem {
                description: Some("Widget".to_string()),
                product_code: Some("WDG-1".to_string()),
                quantity: Some("2".to_string()),
                total: Some("39.90".to_string()),
                ..Default::default()
            },
            LineItem {
                description: Some("Shipping".to_string()),
                ..Default::default()
            },
        ],
    );

    client
        .submit(&mut record, &transport)
        .expect("submission should succeed");

    let request = transport.last_request();
    let first = request
        .find("<itemSequenceNumber>1</itemSequenceNumber><itemDescription>Widget</itemDescription>")
        .expect("first line item should be present");
    let second = request
        .find("<itemSequenceNumber>2</itemSequenceNumber><itemDescription>Shipping</itemDescription>")
        .expect("second line item should be present");
    assert!(first < second);
}

#[test]
fn business_decline_maps_to_failure_category() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", DECLINED_SALE);
    let mut record = card_record();

    let outcome = client
        .submit(&mut record, &transport)
        .expect("a decline is an ordinary outcome");

    assert!(!outcome.is_success);
    assert_eq!(outcome.result_code, "110");
    assert_eq!(outcome.error_message.as_deref(), Some("Insufficient Funds"));
    assert_eq!(outcome.failure_status, Some(FailureStatus::Nsf));
}

#[test]
fn gateway_rejection_reports_the_root_message() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", GATEWAY_REJECTION);
    let mut record = card_record();

    let outcome = client
        .submit(&mut record, &transport)
        .expect("a gateway rejection is an ordinary outcome");

    assert!(!outcome.is_success);
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Error parsing request")
    );
    assert_eq!(outcome.result_code, "");
    assert_eq!(outcome.authorization_code, "");
}

#[test]
fn non_200_status_is_a_fatal_transport_failure() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("500 Internal Server Error", "");
    let mut record = card_record();

    let err = client
        .submit(&mut record, &transport)
        .expect_err("a transport failure must abort the attempt");
    assert!(matches!(
        err.current_context(),
        ConnectorError::TransportFailure { .. }
    ));
}

#[test]
fn void_omits_the_amount_and_passes_validation() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", APPROVED_VOID);
    let mut record = TransactionRecord::new();
    record.set("login", "LOGINID");
    record.set("password", Secret::new("PASSWORD".to_string()));
    record.set("merchantid", "101");
    record.set("action", "Void");
    record.set("type", "CC");
    record.set("order_number", "100000000000000003");

    let outcome = client
        .submit(&mut record, &transport)
        .expect("void submission should succeed");

    let request = transport.last_request();
    assert!(request.contains("<litleTxnId>100000000000000003</litleTxnId>"));
    assert!(!request.contains("<amount>"));
    assert!(outcome.is_success);
    assert_eq!(outcome.order_number, "100000000000000003");
}

#[test]
fn missing_required_field_fails_before_any_network_call() {
    let client = Litle::new(LitleConfig::default());
    let transport = MockTransport::returning("200 OK", APPROVED_SALE);
    let mut record = TransactionRecord::new();
    record.set("login", "LOGINID");
    record.set("action", "Post Authorization");
    record.set("type", "CC");
    record.set("order_number", "100000000000000001");
    // amount deliberately absent

    let err = client
        .submit(&mut record, &transport)
        .expect_err("capture without amount must fail");
    assert!(matches!(
        err.current_context(),
        ConnectorError::MissingRequiredField {
            field_name: "amount"
        }
    ));
    assert!(transport.last_request.borrow().is_none());
}
