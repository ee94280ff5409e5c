//! Errors surfaced by the connector

/// Custom [`Result`] alias carrying an [`error_stack::Report`]
pub type CustomResult<T, E> = Result<T, error_stack::Report<E>>;

/// Connector related errors
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// A field the selected action marks as required is absent or empty.
    /// Raised before any network activity.
    #[error("Missing required field {field_name}")]
    MissingRequiredField {
        /// Name of the missing field
        field_name: &'static str,
    },
    /// Failed to serialize the request document
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    /// Failed to parse the response document
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    /// The transport returned a non-200 status line. Fatal for the
    /// transaction attempt; no result fields are populated.
    #[error("Transport failure: {status_line}")]
    TransportFailure {
        /// Raw HTTP status line returned by the transport
        status_line: String,
    },
    /// The requested capability has no mapping in the gateway schema
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        /// Capability that was requested
        message: String,
        /// Connector that rejected it
        connector: &'static str,
    },
}
