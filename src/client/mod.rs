//! HTTP client for the Mailjet v3 REST API.
//!
//! A thin synchronous transport over `ureq`. It authenticates with the API
//! key pair, addresses the `contact`, `contactdata` and `contactmetadata`
//! resources, and reduces every response to an [`ApiResponse`] carrying
//! the success flag, counts and raw data records. Async callers should go
//! through [`crate::services::AsyncContactService`], which moves calls onto
//! `tokio::task::spawn_blocking`.

mod factory;
pub use factory::ClientFactory;

use crate::config::{Config, DEFAULT_API_VERSION};
use crate::error::{MailjetError, MailjetResult};
use crate::metrics::{HttpTimer, Metrics};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Mailjet REST resources used by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Contact,
    ContactData,
    ContactMetadata,
}

impl Resource {
    /// Path segment of the resource under `/REST/`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::ContactData => "contactdata",
            Self::ContactMetadata => "contactmetadata",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Successful response body: `{"Count": n, "Total": n, "Data": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "Count", default)]
    count: u64,

    #[serde(rename = "Total", default)]
    total: u64,

    #[serde(rename = "Data", default)]
    data: Vec<serde_json::Value>,
}

/// Error response body, e.g. `{"ErrorMessage": "Object not found", "StatusCode": 404}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<String>,
}

/// Outcome of one Mailjet API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// True for a 2xx status
    pub success: bool,

    /// HTTP status code
    pub status: u16,

    /// Remote-reported reason phrase
    pub reason: String,

    /// Total number of matching records
    pub total: u64,

    /// Number of records in (or affected by) this response
    pub count: u64,

    /// Raw data records
    pub data: Vec<serde_json::Value>,
}

impl ApiResponse {
    /// Response returned for write calls held back in sandbox mode.
    fn suppressed() -> Self {
        Self {
            success: true,
            status: 200,
            reason: "Not sent (sandbox mode)".to_string(),
            total: 0,
            count: 0,
            data: Vec::new(),
        }
    }

    /// Turn a failed response into `MailjetError::Request`.
    pub fn into_success(self) -> MailjetResult<Self> {
        if !self.success {
            return Err(MailjetError::Request {
                status: self.status,
                reason: self.reason,
            });
        }
        Ok(self)
    }

    /// Deserialize every data record as `T`.
    pub fn records<T: DeserializeOwned>(&self) -> MailjetResult<Vec<T>> {
        self.data
            .iter()
            .map(|record| serde_json::from_value(record.clone()).map_err(MailjetError::Json))
            .collect()
    }

    /// Deserialize the first data record as `T`.
    pub fn first_record<T: DeserializeOwned>(&self, resource: Resource) -> MailjetResult<T> {
        let record = self.data.first().ok_or_else(|| {
            MailjetError::EmptyResponse(format!("{} response contained no records", resource))
        })?;
        serde_json::from_value(record.clone()).map_err(MailjetError::Json)
    }
}

/// HTTP client for the Mailjet API.
///
/// Cheap to clone; clones share the connection agent and metrics.
#[derive(Clone)]
pub struct MailjetClient {
    /// API host, e.g. `https://api.mailjet.com`
    base_url: String,

    /// Version segment, e.g. `v3`
    api_version: String,

    /// Precomputed `Basic` authorization header value
    authorization: String,

    /// When false, POST and PUT are not sent
    live_mode: bool,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl fmt::Debug for MailjetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailjetClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("live_mode", &self.live_mode)
            .finish_non_exhaustive()
    }
}

impl MailjetClient {
    /// Create a new MailjetClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
            authorization: Self::basic_authorization(&config.api_key, &config.api_secret),
            live_mode: config.live_mode,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a live-mode client against a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: &str, api_secret: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            authorization: Self::basic_authorization(api_key, api_secret),
            live_mode: true,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Switch sandbox mode on or off for this client.
    pub fn with_live_mode(mut self, live_mode: bool) -> Self {
        self.live_mode = live_mode;
        self
    }

    pub fn is_live(&self) -> bool {
        self.live_mode
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn basic_authorization(api_key: &str, api_secret: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", api_key, api_secret)))
    }

    /// Build `{base}/{version}/REST/{resource}[/{id}]`, URL-encoding the id.
    fn build_url(&self, resource: Resource, id: Option<&str>) -> String {
        let base = self.base_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        match id {
            Some(id) => format!(
                "{}/{}/REST/{}/{}",
                base,
                version,
                resource.path(),
                urlencoding::encode(id)
            ),
            None => format!("{}/{}/REST/{}", base, version, resource.path()),
        }
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
    }

    /// Execute a GET request, optionally addressing one record and adding query filters.
    pub fn get(
        &self,
        resource: Resource,
        id: Option<&str>,
        filters: &[(&str, &str)],
    ) -> MailjetResult<ApiResponse> {
        let url = self.build_url(resource, id);
        let mut request = self.request("GET", &url);
        for (key, value) in filters {
            request = request.query(key, value);
        }

        tracing::debug!("GET {}", url);
        self.dispatch("GET", &url, || request.call())
    }

    /// Execute a POST request with a JSON body.
    pub fn post(&self, resource: Resource, body: &serde_json::Value) -> MailjetResult<ApiResponse> {
        let url = self.build_url(resource, None);
        if !self.live_mode {
            return Ok(self.suppress("POST", &url, body));
        }

        tracing::debug!("POST {}", url);
        self.dispatch("POST", &url, || self.request("POST", &url).send_json(body))
    }

    /// Execute a PUT request against one record with a JSON body.
    pub fn put(
        &self,
        resource: Resource,
        id: &str,
        body: &serde_json::Value,
    ) -> MailjetResult<ApiResponse> {
        let url = self.build_url(resource, Some(id));
        if !self.live_mode {
            return Ok(self.suppress("PUT", &url, body));
        }

        tracing::debug!("PUT {}", url);
        self.dispatch("PUT", &url, || self.request("PUT", &url).send_json(body))
    }

    fn suppress(&self, method: &str, url: &str, body: &serde_json::Value) -> ApiResponse {
        tracing::info!("Sandbox mode: {} {} not sent (body: {})", method, url, body);
        self.metrics.record_suppressed_write();
        ApiResponse::suppressed()
    }

    /// Time the call and reduce its result to an `ApiResponse`.
    ///
    /// Non-2xx statuses come back as `success == false`; only transport
    /// failures become errors here.
    fn dispatch(
        &self,
        method: &str,
        url: &str,
        send: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> MailjetResult<ApiResponse> {
        let timer = HttpTimer::new(self.metrics.clone());

        match send() {
            Ok(response) => {
                let status = response.status();
                let reason = response.status_text().to_string();
                let body = response
                    .into_string()
                    .map_err(|e| MailjetError::Http(e.to_string()));
                let parsed = body.and_then(|body| Self::parse_success(status, reason, &body));
                match &parsed {
                    Ok(_) => timer.complete(),
                    Err(_) => timer.complete_with_error(),
                }
                tracing::debug!("{} {} - status {}", method, url, status);
                parsed
            }
            Err(ureq::Error::Status(status, response)) => {
                timer.complete_with_error();
                let status_text = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                let reason = Self::error_reason(&body).unwrap_or(status_text);
                tracing::warn!("{} {} - status {}: {}", method, url, status, reason);
                Ok(ApiResponse {
                    success: false,
                    status,
                    reason,
                    total: 0,
                    count: 0,
                    data: Vec::new(),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                timer.complete_with_error();
                tracing::warn!("{} {} - transport error: {}", method, url, transport);
                Err(MailjetError::Http(transport.to_string()))
            }
        }
    }

    fn parse_success(status: u16, reason: String, body: &str) -> MailjetResult<ApiResponse> {
        let envelope = if body.trim().is_empty() {
            ResponseEnvelope::default()
        } else {
            serde_json::from_str::<ResponseEnvelope>(body)?
        };

        Ok(ApiResponse {
            success: true,
            status,
            reason,
            total: envelope.total,
            count: envelope.count,
            data: envelope.data,
        })
    }

    fn error_reason(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error_message)
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client(base_url: &str) -> MailjetClient {
        MailjetClient::with_base_url(base_url.to_string(), "public", "private")
    }

    #[test]
    fn test_build_url() {
        let client = test_client("https://api.mailjet.com");
        assert_eq!(
            client.build_url(Resource::ContactMetadata, None),
            "https://api.mailjet.com/v3/REST/contactmetadata"
        );
        assert_eq!(
            client.build_url(Resource::Contact, Some("1337")),
            "https://api.mailjet.com/v3/REST/contact/1337"
        );

        let client_with_slash = test_client("https://api.mailjet.com/");
        assert_eq!(
            client_with_slash.build_url(Resource::ContactData, Some("1")),
            "https://api.mailjet.com/v3/REST/contactdata/1"
        );
    }

    #[test]
    fn test_build_url_encodes_email_id() {
        let client = test_client("https://api.mailjet.com");
        assert_eq!(
            client.build_url(Resource::Contact, Some("jane+news@example.com")),
            "https://api.mailjet.com/v3/REST/contact/jane%2Bnews%40example.com"
        );
    }

    #[test]
    fn test_basic_authorization() {
        // "public:private"
        assert_eq!(
            MailjetClient::basic_authorization("public", "private"),
            "Basic cHVibGljOnByaXZhdGU="
        );
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            api_key: "public".to_string(),
            api_secret: "private".to_string(),
            live_mode: false,
            api_version: "v3".to_string(),
            api_url: "https://api.mailjet.com".to_string(),
            request_timeout: 5,
            log_level: "error".to_string(),
        };

        let client = MailjetClient::new(&config);
        assert_eq!(client.base_url, "https://api.mailjet.com");
        assert!(!client.is_live());
    }

    #[test]
    fn test_sandbox_suppresses_writes() {
        let client = test_client("http://127.0.0.1:9").with_live_mode(false);
        let response = client
            .post(Resource::Contact, &json!({"Email": "jane@example.com"}))
            .unwrap();

        assert!(response.success);
        assert_eq!(response.count, 0);
        assert_eq!(client.metrics().suppressed_writes_total(), 1);
        assert_eq!(client.metrics().http_requests_total(), 0);
    }

    #[test]
    fn test_parse_success_envelope() {
        let response = MailjetClient::parse_success(
            200,
            "OK".to_string(),
            r#"{"Count": 1, "Total": 3, "Data": [{"ID": 1}]}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.count, 1);
        assert_eq!(response.total, 3);
        assert_eq!(response.data, vec![json!({"ID": 1})]);

        let empty = MailjetClient::parse_success(204, "No Content".to_string(), "").unwrap();
        assert_eq!(empty.count, 0);
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_error_reason() {
        assert_eq!(
            MailjetClient::error_reason(r#"{"ErrorInfo": "", "ErrorMessage": "Object not found", "StatusCode": 404}"#),
            Some("Object not found".to_string())
        );
        assert_eq!(MailjetClient::error_reason("<html>oops</html>"), None);
        assert_eq!(MailjetClient::error_reason(r#"{"ErrorMessage": ""}"#), None);
    }

    #[test]
    fn test_into_success() {
        let failed = ApiResponse {
            success: false,
            status: 401,
            reason: "Unauthorized".to_string(),
            total: 0,
            count: 0,
            data: Vec::new(),
        };
        match failed.into_success() {
            Err(MailjetError::Request { status, reason }) => {
                assert_eq!(status, 401);
                assert_eq!(reason, "Unauthorized");
            }
            other => panic!("Expected Request error, got: {:?}", other),
        }

        assert!(ApiResponse::suppressed().into_success().is_ok());
    }

    #[test]
    fn test_first_record_on_empty_data() {
        let result: MailjetResult<serde_json::Value> =
            ApiResponse::suppressed().first_record(Resource::Contact);
        assert!(matches!(result, Err(MailjetError::EmptyResponse(_))));
    }
}
