use crate::core::config::ProviderConfig;
use crate::core::currency::{Credential, RateProvider, pair_label};
use crate::core::error::ConversionError;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const SUCCESS: &str = "success";

// ExchangeRateApiProvider implementation for RateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
    version: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, version: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .timeout(timeout)
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.to_string(),
            client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.version,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn pair_url(&self, from: &str, to: &str, credential: &Credential) -> String {
        format!(
            "{}/{}/{}/pair/{}/{}",
            self.base_url,
            self.version,
            credential.expose(),
            from,
            to
        )
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,
    conversion_rate: Option<f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

impl PairResponse {
    fn failure_reason(&self) -> String {
        self.error_type
            .clone()
            .unwrap_or_else(|| format!("result was '{}'", self.result))
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self, credential),
        fields(from = %from, to = %to)
    )]
    async fn get_rate(
        &self,
        from: &str,
        to: &str,
        credential: &Credential,
    ) -> Result<f64, ConversionError> {
        let pair = pair_label(from, to);
        debug!("Requesting pair rate from {}/{}", self.base_url, self.version);

        let response = self
            .client
            .get(self.pair_url(from, to, credential))
            .send()
            .await
            // The url carries the key; keep it out of the message
            .map_err(|e| ConversionError::network(&pair, e.without_url()))?;

        let status = response.status();
        debug!(%status, "Received rate provider response");

        if !status.is_success() {
            // The body only adds detail; failing to read it is still a refusal
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<PairResponse>(&text).ok())
                .and_then(|body| body.error_type);
            let reason = match detail {
                Some(error_type) => format!("HTTP error: {status} ({error_type})"),
                None => format!("HTTP error: {status}"),
            };
            return Err(ConversionError::upstream(&pair, reason));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConversionError::network(&pair, e.without_url()))?;

        let data: PairResponse = serde_json::from_str(&text).map_err(|e| {
            ConversionError::upstream(&pair, format!("Failed to parse JSON response: {e}"))
        })?;

        if data.result != SUCCESS {
            return Err(ConversionError::upstream(&pair, data.failure_reason()));
        }

        match data.conversion_rate {
            Some(rate) if rate > 0.0 && rate.is_finite() => Ok(rate),
            Some(rate) => Err(ConversionError::upstream(
                &pair,
                format!("Invalid conversion rate: {rate}"),
            )),
            None => Err(ConversionError::upstream(
                &pair,
                "Response has no conversion rate",
            )),
        }
    }
}
