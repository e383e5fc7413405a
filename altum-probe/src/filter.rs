use std::collections::BTreeSet;

use altum_client::PropertyRecord;

/// Shown for listings without a street in the available-streets fallback
pub const UNKNOWN_STREET: &str = "Unknown";

/// Case-insensitive substring match on `street`; a missing street is the empty string.
pub fn matches_street(record: &PropertyRecord, needle: &str) -> bool {
    record
        .street()
        .unwrap_or_default()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Listings whose street contains `needle`, in response order
pub fn matching_listings<'a>(records: &'a [PropertyRecord], needle: &str) -> Vec<&'a PropertyRecord> {
    records
        .iter()
        .filter(|record| matches_street(record, needle))
        .collect()
}

/// Distinct street names, sorted, with missing streets reported as [`UNKNOWN_STREET`]
pub fn available_streets(records: &[PropertyRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.street().unwrap_or_else(|| UNKNOWN_STREET.to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Extra explanation for the status codes that usually mean a setup problem
pub fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("Check your API key"),
        403 => Some("API key may not have permission for this endpoint"),
        400 => Some("Bad request - check parameters"),
        _ => None,
    }
}
