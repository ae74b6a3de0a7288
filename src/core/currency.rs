//! Currency rate abstractions

use crate::core::error::ConversionError;
use async_trait::async_trait;
use std::fmt;

/// Opaque key the rate provider needs to authorize a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Credential(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Looks up the rate converting one unit of `from` into `to`.
///
/// Implementations make a single attempt per call and report failures as
/// [`ConversionError::Network`] or [`ConversionError::Upstream`].
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn get_rate(
        &self,
        from: &str,
        to: &str,
        credential: &Credential,
    ) -> Result<f64, ConversionError>;
}

pub fn pair_label(from: &str, to: &str) -> String {
    format!("{from}/{to}")
}
