//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod session;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRecord, ConversionRequest, convert};
pub use currency::{Credential, RateProvider};
pub use error::ConversionError;
pub use session::Session;
