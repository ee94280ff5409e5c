//! Connector configuration

/// Immutable per-client configuration for the Litle Online endpoint.
///
/// Constructed once at client initialization; the defaults target the
/// production gateway and the schema version this crate implements.
#[derive(Debug, Clone)]
pub struct LitleConfig {
    /// Gateway host
    pub host: String,
    /// Gateway port
    pub port: u16,
    /// URL path of the online API
    pub path: String,
    /// Schema version string carried on the request root
    pub schema_version: String,
    /// XML namespace carried on the request root
    pub xmlns: String,
    /// Report group label carried on every transaction element
    pub report_group: String,
}

impl Default for LitleConfig {
    fn default() -> Self {
        Self {
            host: "payments.litle.com".to_string(),
            port: 443,
            path: "/vap/communicator/online".to_string(),
            schema_version: "7.2".to_string(),
            xmlns: "http://www.litle.com/schema".to_string(),
            report_group: "Default Report Group".to_string(),
        }
    }
}

impl LitleConfig {
    /// Full endpoint URL for the online API
    pub fn endpoint_url(&self) -> String {
        format!("https://{}:{}{}", self.host, self.port, self.path)
    }
}
