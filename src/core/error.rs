//! Failure kinds of a single conversion

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by rate lookups and conversions.
///
/// Every variant is terminal for the call in progress; nothing is retried.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The amount was zero, negative or not a finite number.
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(f64),

    /// The rate provider could not be reached.
    #[error("Network error for currency pair {pair}: {source}")]
    Network {
        pair: String,
        #[source]
        source: BoxError,
    },

    /// The rate provider answered but refused or failed the request.
    #[error("Rate provider error for currency pair {pair}: {reason}")]
    Upstream { pair: String, reason: String },
}

impl ConversionError {
    pub fn network(pair: &str, source: impl Into<BoxError>) -> Self {
        ConversionError::Network {
            pair: pair.to_string(),
            source: source.into(),
        }
    }

    pub fn upstream(pair: &str, reason: impl Into<String>) -> Self {
        ConversionError::Upstream {
            pair: pair.to_string(),
            reason: reason.into(),
        }
    }
}
