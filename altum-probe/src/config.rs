use std::sync::Arc;
use std::time::Duration;

use altum_client::models::{is_valid_postcode, normalize_postcode};
use altum_client::{
    ALTUM_BASE_URL, ALTUM_SANDBOX_URL, ApiKey, Configuration as ClientConfiguration, SearchRequest,
};

use crate::colors::ColorMode;
use crate::error::{ProbeError, Result};

/// Postcode searched when none is given (Westerstraat, Amsterdam)
pub const DEFAULT_POSTCODE: &str = "1015MN";
/// Street looked for in the results
pub const DEFAULT_STREET_FILTER: &str = "westerstraat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for one probe run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Full autosearch endpoint URL
    pub endpoint: String,
    /// API key; the request goes out without one if unset
    pub api_key: Option<String>,
    /// Postcode to search, normalized before sending
    pub postcode: String,
    /// Sort key passed to the API
    pub sort: String,
    /// Maximum number of listings requested
    pub limit: u32,
    /// Case-insensitive substring matched against `street`
    pub street_filter: String,
    /// Timeout for the whole request in seconds
    pub timeout_secs: u64,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Report coloring
    pub color_mode: ColorMode,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint: ClientConfiguration::autosearch_url(ALTUM_BASE_URL),
            api_key: None,
            postcode: DEFAULT_POSTCODE.to_string(),
            sort: SearchRequest::DEFAULT_SORT.to_string(),
            limit: SearchRequest::DEFAULT_LIMIT,
            street_filter: DEFAULT_STREET_FILTER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("altum-probe/{}", env!("CARGO_PKG_VERSION")),
            color_mode: ColorMode::Auto,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Point at the sandbox autosearch endpoint
    pub fn with_sandbox(self) -> Self {
        self.with_endpoint(ClientConfiguration::autosearch_url(ALTUM_SANDBOX_URL))
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_postcode<S: Into<String>>(mut self, postcode: S) -> Self {
        self.postcode = postcode.into();
        self
    }

    pub fn with_sort<S: Into<String>>(mut self, sort: S) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_street_filter<S: Into<String>>(mut self, street: S) -> Self {
        self.street_filter = street.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// The query this configuration sends
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest::new(normalize_postcode(&self.postcode))
            .with_sort(self.sort.clone())
            .with_limit(self.limit)
    }

    /// Build the client configuration, including an HTTP client with the timeout applied
    pub fn client_configuration(&self) -> Result<Arc<ClientConfiguration>> {
        if self.timeout_secs == 0 {
            return Err(ProbeError::config_error("timeout must be at least 1 second"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        Ok(Arc::new(ClientConfiguration {
            endpoint: self.endpoint.clone(),
            user_agent: Some(self.user_agent.clone()),
            client,
            api_key: self.api_key.clone().map(ApiKey::new),
        }))
    }

    /// Problems worth pointing out that do not stop the request
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.api_key.is_none() {
            warnings.push("No API key configured; sending request without x-api-key".to_string());
        }

        let postcode = normalize_postcode(&self.postcode);
        if !is_valid_postcode(&postcode) {
            warnings.push(format!(
                "'{}' does not look like a Dutch postcode (expected e.g. 1015MN)",
                postcode
            ));
        }

        if self.street_filter.trim().is_empty() {
            warnings.push("Street filter is empty; every listing will match".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardcoded_probe() {
        let config = ProbeConfig::default();
        assert_eq!(config.endpoint, "https://api.altum.ai/autosearch");
        assert_eq!(config.postcode, "1015MN");
        assert_eq!(config.sort, "datum");
        assert_eq!(config.limit, 10);
        assert_eq!(config.street_filter, "westerstraat");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_search_request_normalizes_postcode() {
        let request = ProbeConfig::new()
            .with_postcode("1015 mn")
            .with_limit(3)
            .search_request();
        assert_eq!(request.search, "1015MN");
        assert_eq!(request.sort, "datum");
        assert_eq!(request.limit, 3);
    }

    #[test]
    fn test_sandbox_endpoint() {
        let config = ProbeConfig::new().with_sandbox();
        assert_eq!(config.endpoint, "https://api.altum.ai/sandbox/autosearch");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = ProbeConfig::new().with_api_key("   ");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_warnings() {
        let config = ProbeConfig::new().with_api_key("key");
        assert!(config.warnings().is_empty());

        let config = ProbeConfig::new().with_postcode("ABC");
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("No API key"));
        assert!(warnings[1].contains("'ABC'"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = ProbeConfig::new().with_timeout(0).client_configuration();
        assert!(matches!(result, Err(ProbeError::ConfigError { .. })));
    }

    #[test]
    fn test_client_configuration_carries_key() {
        let config = ProbeConfig::new()
            .with_api_key("secret")
            .client_configuration()
            .unwrap();
        assert_eq!(config.api_key, Some(ApiKey::new("secret")));
        assert_eq!(config.endpoint, "https://api.altum.ai/autosearch");
    }
}
