pub mod client;
pub mod models;

// Re-export the client and configuration for easy access
pub use client::{
    API_KEY_HEADER, ALTUM_BASE_URL, ALTUM_SANDBOX_URL, AltumClient, AltumError, ApiKey,
    Configuration,
};
pub use models::{PropertyRecord, ResponseEnvelope, SearchRequest};
