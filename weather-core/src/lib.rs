//! Core library for the `weather-monitor` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the [`WeatherProvider`] trait
//! - Normalization of raw envelopes into [`Reading`]s
//! - Consecutive-breach alerting and daily [`Summary`] rollups
//! - The [`Monitor`] loop tying it all together
//!
//! It is used by `weather-monitor-cli`, but can also be embedded in other
//! binaries or services.

pub mod alert;
pub mod config;
pub mod error;
pub mod model;
pub mod monitor;
pub mod normalize;
pub mod provider;
pub mod summary;
pub mod units;

pub use alert::{Alert, AlertTracker};
pub use config::Config;
pub use error::MonitorError;
pub use model::{RawEnvelope, Reading, Summary};
pub use monitor::{CycleReport, LocationFailure, Monitor, MonitorSettings};
pub use normalize::normalize;
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use summary::{summarize, summarize_on};
pub use units::kelvin_to_celsius;
