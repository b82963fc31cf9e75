use std::fmt;

use serde::{Deserialize, Serialize};

/// The provider's JSON body exactly as it arrived.
///
/// Nothing about its shape is checked here; see [`crate::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope(pub serde_json::Value);

/// One normalized observation for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub location: String,
    /// Degrees Celsius, rounded to two decimals.
    pub temperature: f64,
    /// Degrees Celsius, rounded to two decimals.
    pub feels_like: f64,
    pub condition: String,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}°C (feels like {:.2}°C), {} at {} UTC",
            self.location, self.temperature, self.feels_like, self.condition, self.timestamp
        )
    }
}

/// Rollup of the readings buffered during one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub average_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub dominant_condition: String,
    /// Local date, `YYYY-MM-DD`.
    pub date: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: avg {:.2}°C, min {:.2}°C, max {:.2}°C, mostly {}",
            self.date, self.average_temp, self.min_temp, self.max_temp, self.dominant_condition
        )
    }
}
