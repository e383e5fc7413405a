use crate::client::AltumError;
use crate::models::PropertyRecord;

/// Everything the probe needs to know about one HTTP response
///
/// The body is kept as raw text so it can be shown even when it is not valid JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status: u16,
    /// Response headers in the order the server sent them
    pub headers: Vec<(String, String)>,
    /// Raw body text
    pub body: String,
}

impl ResponseEnvelope {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Only an exact 200 counts; other 2xx codes are reported like any API error.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Case-insensitive header lookup, first match wins
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decode the body as a JSON array of listings
    pub fn parse_records(&self) -> Result<Vec<PropertyRecord>, AltumError> {
        serde_json::from_str(&self.body).map_err(AltumError::ParseError)
    }
}
