use crate::models::{PropertyRecord, ResponseEnvelope, SearchRequest};
use std::sync::Arc;

/// Production base URL of the Altum API
pub const ALTUM_BASE_URL: &str = "https://api.altum.ai";
/// Sandbox base URL; uses its own API key
pub const ALTUM_SANDBOX_URL: &str = "https://api.altum.ai/sandbox";
/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the Altum client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Full URL of the autosearch endpoint (e.g. "https://api.altum.ai/autosearch")
    pub endpoint: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance; timeouts are configured here
    pub client: reqwest::Client,
    /// API key sent in the `x-api-key` header
    pub api_key: Option<ApiKey>,
}

/// API key for the Altum API
///
/// `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
}

impl ApiKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self { key: key.into() }
    }

    /// Key with everything but the last four characters hidden
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey").field("key", &self.masked()).finish()
    }
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }

    /// Autosearch endpoint under the given base URL
    pub fn autosearch_url(base: &str) -> String {
        format!("{}/autosearch", base.trim_end_matches('/'))
    }

    /// Headers sent with every request, in send order
    pub fn request_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Content-Type", "application/json".to_string())];
        if let Some(api_key) = &self.api_key {
            headers.push((API_KEY_HEADER, api_key.key.clone()));
        }
        if let Some(user_agent) = &self.user_agent {
            headers.push(("User-Agent", user_agent.clone()));
        }
        headers
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            endpoint: Configuration::autosearch_url(ALTUM_BASE_URL),
            user_agent: Some("altum-client-rs/0.1".to_owned()),
            client: reqwest::Client::new(),
            api_key: None,
        }
    }
}

/// Errors that can occur when talking to the Altum API
#[derive(Debug)]
pub enum AltumError {
    /// Network, timeout, DNS or other transport-level failures
    RequestError(Box<dyn std::error::Error + Send + Sync>),

    /// The body was not the JSON array of listings we expected
    ParseError(serde_json::Error),

    /// The API answered with a status other than 200
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body as sent by the API
        message: String,
    },
}

impl std::fmt::Display for AltumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AltumError::RequestError(e) => write!(f, "Request error: {}", e),
            AltumError::ParseError(e) => write!(f, "Parse error: {}", e),
            AltumError::ApiError { status, message } => {
                write!(f, "Altum API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AltumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AltumError::RequestError(e) => Some(e.as_ref()),
            AltumError::ParseError(e) => Some(e),
            AltumError::ApiError { .. } => None,
        }
    }
}

/// Client for the Altum autosearch endpoint
///
/// ```rust,no_run
/// use altum_client::{AltumClient, ApiKey, Configuration, SearchRequest};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), altum_client::AltumError> {
/// let config = Arc::new(Configuration {
///     api_key: Some(ApiKey::new("your-api-key-here")),
///     ..Configuration::default()
/// });
/// let client = AltumClient::new(config);
///
/// for listing in client.search(&SearchRequest::new("1015MN")).await? {
///     println!("{}", listing.address_line());
/// }
/// # Ok(())
/// # }
/// ```
pub struct AltumClient {
    configuration: Arc<Configuration>,
}

impl std::fmt::Debug for AltumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AltumClient")
            .field("endpoint", &self.configuration.endpoint)
            .finish()
    }
}

impl AltumClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Send one GET to the autosearch endpoint and capture the response as-is
    ///
    /// Only transport failures are errors here; every status code, including
    /// 4xx and 5xx, comes back as a [`ResponseEnvelope`].
    pub async fn search_raw(&self, request: &SearchRequest) -> Result<ResponseEnvelope, AltumError> {
        let mut builder = self
            .configuration
            .client
            .get(&self.configuration.endpoint)
            .query(request);

        for (name, value) in self.configuration.request_headers() {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AltumError::RequestError(Box::new(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| AltumError::RequestError(Box::new(e)))?;

        Ok(ResponseEnvelope::new(status, headers, body))
    }

    /// Search listings by postcode
    ///
    /// A non-200 status becomes [`AltumError::ApiError`] carrying the body text.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<PropertyRecord>, AltumError> {
        let envelope = self.search_raw(request).await?;

        if !envelope.is_success() {
            return Err(AltumError::ApiError {
                status: envelope.status,
                message: envelope.body,
            });
        }

        envelope.parse_records()
    }
}
