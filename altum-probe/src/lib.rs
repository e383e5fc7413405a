//! Debug probe for the Altum AI autosearch API.
//!
//! Sends a single postcode search, prints the request, the raw response and the
//! parsed listings, and looks for one street in the results. Every failure is
//! reported in the output rather than returned.

pub use altum_client as altum;

pub mod colors;
pub mod config;
pub mod error;
pub mod filter;
pub mod probe;
pub mod report;
pub mod stats;

pub use colors::{ColorHelper, ColorMode};
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use probe::ApiProbe;
