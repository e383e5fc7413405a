//! Human-readable rendering of a probe run.
//!
//! Every section is written to the supplied writer as labeled plain text
//! (optionally colored), so the same output can go to a terminal or a buffer.

use std::error::Error;
use std::io::{self, Write};

use altum_client::models::display_value;
use altum_client::models::property::ASKING_PRICE;
use altum_client::{API_KEY_HEADER, ApiKey, PropertyRecord, ResponseEnvelope, SearchRequest};

use crate::colors::ColorHelper;
use crate::filter::{available_streets, matching_listings, status_hint};
use crate::stats::ListingStats;

/// Printed for optional fields a listing does not carry
pub const ABSENT: &str = "n/a";

const RULE_WIDTH: usize = 60;

/// Error text followed by each of its sources, so transport errors show the root cause
pub fn error_chain(error: &dyn Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

pub struct Report<'a, W: Write> {
    out: &'a mut W,
    colors: &'a ColorHelper,
}

impl<'a, W: Write> Report<'a, W> {
    pub fn new(out: &'a mut W, colors: &'a ColorHelper) -> Self {
        Self { out, colors }
    }

    fn section(&mut self, title: &str, rule: usize) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.colors.heading(title))?;
        writeln!(self.out, "{}", self.colors.dimmed(&"-".repeat(rule)))
    }

    fn failure(&mut self, label: &str, detail: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", self.colors.red(&format!("❌ {}:", label)), detail)
    }

    pub fn banner(&mut self, endpoint: &str, postcode: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", self.colors.heading("🔍 ALTUM API DEBUG TEST"))?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "Searching for postcode: {}", postcode)?;
        writeln!(self.out, "API Endpoint: {}", endpoint)?;
        writeln!(self.out, "{}", rule)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", self.colors.yellow("⚠️  WARNING:"), message)
    }

    /// Planned headers and query parameters; the API key is masked
    pub fn request_details(
        &mut self,
        headers: &[(&str, String)],
        request: &SearchRequest,
    ) -> io::Result<()> {
        self.section("📤 REQUEST DETAILS:", 30)?;
        writeln!(self.out, "Headers:")?;
        for (name, value) in headers {
            let shown = if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                ApiKey::new(value.as_str()).masked()
            } else {
                value.clone()
            };
            writeln!(self.out, "  {}: {}", self.colors.cyan(name), shown)?;
        }
        writeln!(self.out, "Params:")?;
        writeln!(self.out, "  search: {}", request.search)?;
        writeln!(self.out, "  sort: {}", request.sort)?;
        writeln!(self.out, "  limit: {}", request.limit)?;
        writeln!(self.out)?;
        writeln!(self.out, "🚀 Making API call...")
    }

    /// Status line, every header and the raw body, before any parsing
    pub fn response(&mut self, envelope: &ResponseEnvelope) -> io::Result<()> {
        self.section(&format!("📊 RESPONSE STATUS: {}", envelope.status), 30)?;
        writeln!(self.out, "Response Headers:")?;
        for (name, value) in &envelope.headers {
            writeln!(self.out, "  {}: {}", self.colors.cyan(name), value)?;
        }

        self.section("📄 RAW RESPONSE TEXT:", 30)?;
        writeln!(self.out, "{}", envelope.body)
    }

    pub fn request_error(&mut self, error: &dyn Error) -> io::Result<()> {
        writeln!(self.out)?;
        self.failure("REQUEST ERROR", &error_chain(error))
    }

    pub fn decode_error(&mut self, error: &dyn Error) -> io::Result<()> {
        writeln!(self.out)?;
        self.failure("JSON DECODE ERROR", &error_chain(error))?;
        writeln!(self.out, "The response is not valid JSON")
    }

    pub fn api_error(&mut self, status: u16) -> io::Result<()> {
        writeln!(self.out)?;
        self.failure("API ERROR - Status Code", &status.to_string())?;
        if let Some(hint) = status_hint(status) {
            writeln!(self.out, "   {}", self.colors.yellow(&format!("→ {}", hint)))?;
        }
        Ok(())
    }

    pub fn unexpected_error(&mut self, error: &dyn Error) -> io::Result<()> {
        writeln!(self.out)?;
        self.failure("UNEXPECTED ERROR", &error_chain(error))
    }

    /// Count, per-listing field dump and the complete pretty-printed JSON
    pub fn listings(&mut self, records: &[PropertyRecord]) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.colors.green("✅ JSON PARSED SUCCESSFULLY"))?;
        writeln!(self.out, "Number of properties found: {}", records.len())?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;

        self.section("🏠 FORMATTED RESULTS:", 30)?;
        for (index, record) in records.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "{}", self.colors.heading(&format!("--- Property {} ---", index + 1)))?;
            for (key, value) in record.fields() {
                writeln!(self.out, "{}: {}", key, display_value(value))?;
            }
        }

        self.section("📋 COMPLETE RAW JSON:", 30)?;
        writeln!(self.out, "{}", pretty_json(&records)?)
    }

    /// Listings whose street contains `needle`, or the streets that were seen instead
    pub fn street_matches(&mut self, records: &[PropertyRecord], needle: &str) -> io::Result<()> {
        self.section(
            &format!("🎯 LOOKING FOR {} PROPERTIES:", needle.to_uppercase()),
            40,
        )?;

        let found = matching_listings(records, needle);
        for record in &found {
            writeln!(self.out, "{} {}", self.colors.green("✅ FOUND:"), record.address_line())?;
            writeln!(self.out, "   Price: {}", record.text(ASKING_PRICE).as_deref().unwrap_or(ABSENT))?;
            writeln!(self.out, "   Status: {}", record.market_status().as_deref().unwrap_or(ABSENT))?;
            writeln!(self.out, "   Listed: {}", record.date_listed().as_deref().unwrap_or(ABSENT))?;
            writeln!(self.out, "   Full data: {}", pretty_json(record)?)?;
        }

        if found.is_empty() {
            self.failure(
                "NOT FOUND",
                &format!("No properties matching '{}' found in this postcode", needle),
            )?;
            writeln!(self.out, "Available streets in this postcode:")?;
            for street in available_streets(records) {
                writeln!(self.out, "  - {}", street)?;
            }
        }

        Ok(())
    }

    pub fn statistics(&mut self, stats: &ListingStats) -> io::Result<()> {
        self.section("📈 LISTING STATISTICS:", 30)?;
        writeln!(self.out, "Total properties: {}", stats.total)?;
        writeln!(self.out, "With asking price: {}", stats.with_price)?;
        writeln!(self.out, "Available: {}", stats.available)?;
        writeln!(self.out, "Sold: {}", stats.sold)?;
        if let (Some(average), Some(min), Some(max)) =
            (stats.average_price, stats.min_price, stats.max_price)
        {
            writeln!(self.out, "Average asking price: {}", average)?;
            writeln!(self.out, "Price range: {} - {}", min, max)?;
        }
        Ok(())
    }
}

fn pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
