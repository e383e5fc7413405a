use std::io::Write;

use altum_client::AltumClient;
use tracing::{debug, info, warn};

use crate::colors::ColorHelper;
use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::report::Report;
use crate::stats::ListingStats;

/// One-shot debug probe against the autosearch endpoint
///
/// A run sends exactly one request and reports everything about it. Failures of
/// any kind become report lines; [`ApiProbe::run`] itself cannot fail.
#[derive(Debug)]
pub struct ApiProbe {
    config: ProbeConfig,
    colors: ColorHelper,
}

impl ApiProbe {
    pub fn new(config: ProbeConfig) -> Self {
        let colors = ColorHelper::new(config.color_mode);
        Self { config, colors }
    }

    /// Replace the color helper, e.g. with [`ColorHelper::plain`] for captured output
    pub fn with_colors(mut self, colors: ColorHelper) -> Self {
        self.colors = colors;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run the probe, writing the report to `out`
    pub async fn run<W: Write>(&self, out: &mut W) {
        if let Err(e) = self.try_run(out).await {
            warn!(error = %e, "probe run failed");
            // Nothing left to report to if the writer itself is broken
            let _ = Report::new(out, &self.colors).unexpected_error(&e);
        }
        let _ = out.flush();
    }

    /// Run the probe on a fresh single-threaded runtime
    pub fn run_blocking<W: Write>(&self, out: &mut W) {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.run(out)),
            Err(e) => {
                warn!(error = %e, "failed to start async runtime");
                let _ = Report::new(out, &self.colors).unexpected_error(&ProbeError::RuntimeError(e));
            }
        }
    }

    async fn try_run<W: Write>(&self, out: &mut W) -> Result<()> {
        let request = self.config.search_request();
        let mut report = Report::new(out, &self.colors);

        report.banner(&self.config.endpoint, &request.search)?;
        for warning in self.config.warnings() {
            warn!("{}", warning);
            report.warning(&warning)?;
        }

        let client = AltumClient::new(self.config.client_configuration()?);
        report.request_details(&client.configuration().request_headers(), &request)?;

        info!(
            endpoint = %self.config.endpoint,
            postcode = %request.search,
            limit = request.limit,
            "sending autosearch request"
        );

        let envelope = match client.search_raw(&request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "autosearch request failed");
                report.request_error(&e)?;
                return Ok(());
            }
        };

        debug!(
            status = envelope.status,
            headers = envelope.headers.len(),
            body_bytes = envelope.body.len(),
            "response received"
        );
        report.response(&envelope)?;

        if !envelope.is_success() {
            warn!(status = envelope.status, "autosearch returned an error status");
            report.api_error(envelope.status)?;
            return Ok(());
        }

        let records = match envelope.parse_records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "response body is not a listing array");
                report.decode_error(&e)?;
                return Ok(());
            }
        };

        info!(count = records.len(), "listings parsed");
        report.listings(&records)?;
        report.street_matches(&records, &self.config.street_filter)?;
        report.statistics(&ListingStats::from_records(&records))?;

        Ok(())
    }
}
