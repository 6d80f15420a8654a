use crate::models::metals::{LatestResponse, MetalsQuote};
use reqwest::header::ACCEPT;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.metals.dev";

/// Failures shown verbatim in the metals status line.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MetalsError {
    #[error("请先填写 Metals.Dev API Key。")]
    MissingApiKey,
    /// `error_message` from metals.dev, or the HTTP status when absent.
    #[error("{0}")]
    Api(String),
    #[error("请求出错，请检查网络或 API Key。")]
    Network(String),
}

impl From<reqwest::Error> for MetalsError {
    fn from(err: reqwest::Error) -> Self {
        MetalsError::Network(err.to_string())
    }
}

#[derive(Clone)]
pub struct MetalsClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetalsClient {
    /// Client for `base_url`, normally [`DEFAULT_BASE_URL`].
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Latest spot prices per troy ounce in `currency`.
    pub async fn fetch_latest(&self, api_key: &str, currency: &str) -> Result<MetalsQuote, MetalsError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(MetalsError::MissingApiKey);
        }

        let resp = self
            .client
            .get(format!("{}/v1/latest", self.base_url))
            .query(&[("api_key", api_key), ("currency", currency), ("unit", "toz")])
            .header(ACCEPT, "application/json")
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        // error bodies carry `error_message`, so parse before checking status
        let status = resp.status();
        let body: LatestResponse = resp.json().await?;

        if !status.is_success() || body.status.as_deref() != Some("success") {
            let message = body
                .error_message
                .unwrap_or_else(|| format!("请求失败，HTTP {}", status.as_u16()));
            return Err(MetalsError::Api(message));
        }

        Ok(MetalsQuote {
            metals: body.metals,
            currency: body.currency,
            unit: body.unit,
            timestamp: body.timestamp,
        })
    }
}
