use altum_client::AltumError;
use thiserror::Error;

/// Errors that can occur while probing the Altum API
///
/// The probe never lets these escape a run; each one ends up as a labeled
/// line in the report.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Error from the underlying Altum client
    #[error("Altum client error: {0}")]
    ClientError(#[from] AltumError),

    /// HTTP client construction error
    #[error("HTTP client setup failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Writing the report failed
    #[error("Output failed: {0}")]
    IoError(#[from] std::io::Error),

    /// The async runtime could not be started
    #[error("Async runtime failed to start: {0}")]
    RuntimeError(std::io::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl ProbeError {
    /// Create a new configuration error
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Type alias for Results using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;
