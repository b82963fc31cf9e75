//! Turns the provider's current-weather envelope into a [`Reading`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::MonitorError,
    model::{RawEnvelope, Reading},
    units::{kelvin_to_celsius, round2},
};

/// Format used for [`Reading::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Normalize a raw envelope for `location`.
///
/// Temperatures arrive in Kelvin and leave in Celsius rounded to two
/// decimals. `dt` is rendered as a UTC timestamp.
pub fn normalize(raw: &RawEnvelope, location: &str) -> Result<Reading, MonitorError> {
    let parsed = OwCurrentResponse::deserialize(&raw.0)
        .map_err(|e| MonitorError::MalformedResponse(format!("{location}: {e}")))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| {
            MonitorError::MalformedResponse(format!("{location}: `weather` array is empty"))
        })?;

    let observed = unix_to_utc(parsed.dt).ok_or_else(|| {
        MonitorError::MalformedResponse(format!("{location}: `dt` {} is out of range", parsed.dt))
    })?;

    Ok(Reading {
        location: location.to_string(),
        temperature: round2(kelvin_to_celsius(parsed.main.temp)),
        feels_like: round2(kelvin_to_celsius(parsed.main.feels_like)),
        condition,
        timestamp: observed.format(TIMESTAMP_FORMAT).to_string(),
    })
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
