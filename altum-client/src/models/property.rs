use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STREET: &str = "street";
pub const HOUSE_NUMBER: &str = "housenumber";
pub const HOUSE_ADDITION: &str = "houseaddition";
pub const ASKING_PRICE: &str = "asking_price";
pub const MARKET_STATUS: &str = "market_status";
pub const DATE_LISTED: &str = "date_listed";

/// One listing returned by the autosearch endpoint
///
/// The API does not commit to a schema, so a record keeps every field it was
/// sent, in response order, and only exposes read accessors. A field that is
/// missing or `null` reads as `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRecord {
    fields: Map<String, Value>,
}

impl PropertyRecord {
    pub fn new(fields: Map<String, Value>) -> PropertyRecord {
        PropertyRecord { fields }
    }

    /// All fields in response order, nulls included
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    /// Field rendered as text, see [`display_value`]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(display_value)
    }

    pub fn street(&self) -> Option<String> {
        self.text(STREET)
    }

    pub fn market_status(&self) -> Option<String> {
        self.text(MARKET_STATUS)
    }

    pub fn date_listed(&self) -> Option<String> {
        self.text(DATE_LISTED)
    }

    /// Street, house number and addition, e.g. `Westerstraat 72-1`
    ///
    /// The addition is appended verbatim; an empty or missing one adds nothing.
    pub fn address_line(&self) -> String {
        let street = self.street().unwrap_or_default();
        let number = self.text(HOUSE_NUMBER).unwrap_or_default();
        let addition = self.text(HOUSE_ADDITION).unwrap_or_default();
        format!("{} {}{}", street, number, addition).trim().to_string()
    }

    /// Asking price as a whole number of euros
    ///
    /// The API sends either a number or a numeric string. Fractions are truncated,
    /// anything unparseable is treated as no price.
    pub fn asking_price(&self) -> Option<i64> {
        match self.get(ASKING_PRICE)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
            _ => None,
        }
    }
}

/// Render a JSON value the way a person reads it: strings without quotes,
/// scalars as-is, nested structures as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> PropertyRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fields_keep_response_order() {
        let rec = record(json!({"zeta": 1, "alpha": 2, "street": "Westerstraat"}));
        let keys: Vec<&str> = rec.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "street"]);
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let rec = record(json!({"street": null, "market_status": "Beschikbaar"}));
        assert_eq!(rec.street(), None);
        assert_eq!(rec.market_status().as_deref(), Some("Beschikbaar"));
        assert_eq!(rec.date_listed(), None);
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn test_address_line_with_addition() {
        let rec = record(json!({
            "street": "Westerstraat",
            "housenumber": "72",
            "houseaddition": "-1"
        }));
        assert_eq!(rec.address_line(), "Westerstraat 72-1");
    }

    #[test]
    fn test_address_line_skips_null_or_empty_addition() {
        let rec = record(json!({"street": "Kerkstraat", "housenumber": 12, "houseaddition": null}));
        assert_eq!(rec.address_line(), "Kerkstraat 12");

        let rec = record(json!({"street": "Kerkstraat", "housenumber": 12, "houseaddition": ""}));
        assert_eq!(rec.address_line(), "Kerkstraat 12");
    }

    #[test]
    fn test_asking_price_accepts_numbers_and_strings() {
        assert_eq!(record(json!({"asking_price": 500000})).asking_price(), Some(500000));
        assert_eq!(record(json!({"asking_price": "425000"})).asking_price(), Some(425000));
        assert_eq!(record(json!({"asking_price": 399999.9})).asking_price(), Some(399999));
        assert_eq!(record(json!({"asking_price": "op aanvraag"})).asking_price(), None);
        assert_eq!(record(json!({"asking_price": null})).asking_price(), None);
        assert_eq!(record(json!({})).asking_price(), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Amsterdam")), "Amsterdam");
        assert_eq!(display_value(&json!(72)), "72");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_serializes_back_to_plain_object() {
        let rec = record(json!({"street": "Westerstraat", "housenumber": "72"}));
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({"street": "Westerstraat", "housenumber": "72"})
        );
    }
}
