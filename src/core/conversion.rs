//! Conversion of an amount at the provider's current rate

use crate::core::currency::{Credential, RateProvider};
use crate::core::error::ConversionError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source_code: String,
    pub target_code: String,
    pub amount: f64,
    pub credential: Credential,
}

/// Snapshot of one completed conversion.
///
/// Fields are private so a record cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    timestamp: String,
    #[serde(rename = "base_currency")]
    source_code: String,
    #[serde(rename = "target_currency")]
    target_code: String,
    amount: f64,
    rate: f64,
    result: f64,
}

impl ConversionRecord {
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn target_code(&self) -> &str {
        &self.target_code
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn result(&self) -> f64 {
        self.result
    }
}

/// Converts `request.amount` using the rate reported by `provider`.
///
/// A non-positive amount is rejected before the provider is contacted.
/// Provider errors are returned as they are.
#[instrument(
    name = "Convert",
    skip(provider, request),
    fields(from = %request.source_code, to = %request.target_code)
)]
pub async fn convert(
    provider: &dyn RateProvider,
    request: &ConversionRequest,
) -> Result<ConversionRecord, ConversionError> {
    let amount = request.amount;
    if !(amount > 0.0 && amount.is_finite()) {
        debug!(amount, "Rejecting conversion amount");
        return Err(ConversionError::InvalidAmount(amount));
    }

    let rate = provider
        .get_rate(&request.source_code, &request.target_code, &request.credential)
        .await?;

    let record = ConversionRecord {
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        source_code: request.source_code.clone(),
        target_code: request.target_code.clone(),
        amount,
        rate,
        result: amount * rate,
    };
    debug!(?record, "Conversion complete");
    Ok(record)
}

#[cfg(test)]
pub(crate) fn record_for_test(
    timestamp: &str,
    source_code: &str,
    target_code: &str,
    amount: f64,
    rate: f64,
) -> ConversionRecord {
    ConversionRecord {
        timestamp: timestamp.to_string(),
        source_code: source_code.to_string(),
        target_code: target_code.to_string(),
        amount,
        rate,
        result: amount * rate,
    }
}
