pub mod envelope;
pub mod property;
pub mod request;

pub use envelope::ResponseEnvelope;
pub use property::{PropertyRecord, display_value};
pub use request::{SearchRequest, is_valid_postcode, normalize_postcode};
