//! Conversion session: credential, provider and the running history

use crate::core::conversion::{self, ConversionRecord, ConversionRequest};
use crate::core::currency::{Credential, RateProvider};
use crate::core::error::ConversionError;
use crate::core::history;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct Session {
    provider: Arc<dyn RateProvider>,
    credential: Credential,
    history: Vec<ConversionRecord>,
}

impl Session {
    pub fn new(provider: Arc<dyn RateProvider>, credential: Credential) -> Self {
        Self {
            provider,
            credential,
            history: Vec::new(),
        }
    }

    /// Converts and appends the record to the history. On error the history
    /// is left as it was.
    pub async fn convert(
        &mut self,
        source_code: &str,
        target_code: &str,
        amount: f64,
    ) -> Result<ConversionRecord, ConversionError> {
        let request = ConversionRequest {
            source_code: source_code.to_string(),
            target_code: target_code.to_string(),
            amount,
            credential: self.credential.clone(),
        };
        let record = conversion::convert(self.provider.as_ref(), &request).await?;
        self.history.push(record.clone());
        debug!(len = self.history.len(), "Appended conversion to history");
        Ok(record)
    }

    pub fn history(&self) -> &[ConversionRecord] {
        &self.history
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        history::save_history(&self.history, path)
    }
}
