use serde::{Deserialize, Serialize};

/// Query for the autosearch endpoint
///
/// Serializes to the `search`, `sort` and `limit` query parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Postcode to search, e.g. `1015MN`
    pub search: String,
    /// Sort key understood by the API
    pub sort: String,
    /// Maximum number of listings to return
    pub limit: u32,
}

impl SearchRequest {
    pub const DEFAULT_SORT: &'static str = "datum";
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new<S: Into<String>>(search: S) -> Self {
        Self {
            search: search.into(),
            sort: Self::DEFAULT_SORT.to_string(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_sort<S: Into<String>>(mut self, sort: S) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Strip all whitespace and upper-case, so `1015 mn` becomes `1015MN`
pub fn normalize_postcode(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Dutch postcode: four digits without a leading zero, then two capital letters
pub fn is_valid_postcode(postcode: &str) -> bool {
    let bytes = postcode.as_bytes();
    bytes.len() == 6
        && (b'1'..=b'9').contains(&bytes[0])
        && bytes[1..4].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SearchRequest::new("1015MN");
        assert_eq!(request.sort, "datum");
        assert_eq!(request.limit, 10);
    }

    #[test]
    fn test_serializes_as_query_fields() {
        let request = SearchRequest::new("1015MN").with_limit(5).with_sort("prijs");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"search": "1015MN", "sort": "prijs", "limit": 5})
        );
    }

    #[test]
    fn test_normalize_postcode() {
        assert_eq!(normalize_postcode("1015MN"), "1015MN");
        assert_eq!(normalize_postcode(" 1015 mn "), "1015MN");
        assert_eq!(normalize_postcode("1015\tMn"), "1015MN");
    }

    #[test]
    fn test_is_valid_postcode() {
        assert!(is_valid_postcode("1015MN"));
        assert!(is_valid_postcode("9999ZZ"));
        assert!(!is_valid_postcode("0123AB"));
        assert!(!is_valid_postcode("1015mn"));
        assert!(!is_valid_postcode("1015 MN"));
        assert!(!is_valid_postcode("101MN"));
        assert!(!is_valid_postcode("1015MNX"));
        assert!(!is_valid_postcode(""));
    }
}
