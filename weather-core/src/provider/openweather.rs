use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{config::DEFAULT_BASE_URL, error::MonitorError, model::RawEnvelope};

use super::WeatherProvider;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, MonitorError> {
        Self::with_options(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, MonitorError> {
        if api_key.trim().is_empty() {
            return Err(MonitorError::Configuration(
                "OpenWeatherMap API key must not be empty".into(),
            ));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &str) -> Result<RawEnvelope, MonitorError> {
        debug!("requesting current weather for {location}");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        parse_body(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Split a response into an envelope or a typed failure.
fn parse_body(status: StatusCode, body: &str) -> Result<RawEnvelope, MonitorError> {
    if !status.is_success() {
        let message = serde_json::from_str::<OwErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Unknown error".to_string());

        return Err(MonitorError::Provider { status: status.as_u16(), message });
    }

    serde_json::from_str(body).map(RawEnvelope).map_err(|e| {
        MonitorError::MalformedResponse(format!("body is not JSON ({e}): {}", truncate_body(body)))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
