pub mod transformers;

use error_stack::{report, ResultExt};

use crate::{
    configs::LitleConfig,
    consts,
    errors::{ConnectorError, CustomResult},
    types::{HttpsPost, HttpsResponse, PaymentOutcome, TransactionRecord},
};

use transformers as litle;

/// Adapter for the Litle & Co. Online gateway.
///
/// One instance holds the immutable endpoint configuration; every call to
/// [`Litle::submit`] runs a full map -> validate -> build -> send ->
/// interpret cycle on its own record, so instances are freely shareable.
#[derive(Debug, Clone)]
pub struct Litle {
    config: LitleConfig,
}

impl Litle {
    /// Creates a client for the given endpoint configuration
    pub fn new(config: LitleConfig) -> Self {
        Self { config }
    }

    /// Connector identifier
    pub fn id(&self) -> &'static str {
        "litle"
    }

    /// Endpoint configuration this client was built with
    pub fn config(&self) -> &LitleConfig {
        &self.config
    }

    fn common_get_content_type(&self) -> &'static str {
        consts::XML_CONTENT_TYPE
    }

    fn get_url(&self) -> String {
        self.config.endpoint_url()
    }

    fn get_headers(&self) -> Vec<(String, String)> {
        vec![(
            "Content-Type".to_string(),
            self.common_get_content_type().to_string(),
        )]
    }

    /// Serializes the mapped record into the versioned XML request body
    pub fn get_request_body(
        &self,
        record: &TransactionRecord,
    ) -> CustomResult<String, ConnectorError> {
        let connector_req = litle::LitleOnlineRequest::try_from((&self.config, record))?;
        let body = quick_xml::se::to_string(&connector_req)
            .change_context(ConnectorError::RequestEncodingFailed)?;
        Ok(format!("{}{body}", consts::XML_DECLARATION))
    }

    /// Executes one full transaction exchange against the gateway.
    ///
    /// The record is normalized in place, validated against the
    /// action-specific required-field set, serialized and POSTed through
    /// the injected transport. Gateway rejections and declines come back
    /// as `Ok` outcomes with `is_success == false`; `Err` is reserved for
    /// pre-transmission failures and transport failures.
    pub fn submit(
        &self,
        record: &mut TransactionRecord,
        transport: &dyn HttpsPost,
    ) -> CustomResult<PaymentOutcome, ConnectorError> {
        litle::map_transaction_fields(record);
        let action =
            litle::PaymentAction::from_wire(record.get_str("action").unwrap_or_default());
        litle::validate_required_fields(record, &action)?;
        let body = self.get_request_body(record)?;
        tracing::debug!(
            connector = self.id(),
            action = action.wire_name(),
            "submitting online request"
        );
        let res = transport.post(&self.get_url(), &self.get_headers(), body.as_bytes())?;
        self.handle_response(&action, res)
    }

    fn handle_response(
        &self,
        action: &litle::PaymentAction,
        res: HttpsResponse,
    ) -> CustomResult<PaymentOutcome, ConnectorError> {
        if !res.status_line.starts_with("200") {
            return Err(report!(ConnectorError::TransportFailure {
                status_line: res.status_line,
            }));
        }
        let response: litle::LitleOnlineResponse =
            quick_xml::de::from_str(&String::from_utf8_lossy(&res.body))
                .change_context(ConnectorError::ResponseDeserializationFailed)?;
        let outcome = litle::interpret_response(action, &response, &res);
        tracing::info!(
            connector = self.id(),
            success = outcome.is_success,
            result_code = %outcome.result_code,
            "online response interpreted"
        );
        Ok(outcome)
    }
}
