use crate::{Config, error::MonitorError, model::RawEnvelope};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of raw current-weather envelopes, one location at a time.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &str) -> Result<RawEnvelope, MonitorError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails with [`MonitorError::Configuration`] when no API key can be found.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, MonitorError> {
    let api_key = config.api_key()?;
    OpenWeatherProvider::with_options(api_key, config.base_url.clone(), config.request_timeout())
}
