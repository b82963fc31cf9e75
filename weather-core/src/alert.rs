//! Consecutive-breach tracking.
//!
//! A location alerts once it has exceeded the temperature threshold for
//! `consecutive` readings in a row. The counter is not reset when an alert
//! fires, so a sustained breach alerts again on every following reading.
//! Any reading at or below the threshold resets the counter to zero.

use std::{collections::HashMap, fmt};

use serde::Serialize;

/// Raised when a location has breached the threshold often enough in a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub location: String,
    pub temperature: f64,
    /// Consecutive breaching readings so far, including this one.
    pub consecutive: u32,
    pub threshold: f64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature in {} has exceeded {:.2}°C for {} consecutive readings (now {:.2}°C)",
            self.location, self.threshold, self.consecutive, self.temperature
        )
    }
}

#[derive(Debug, Clone)]
pub struct AlertTracker {
    threshold: f64,
    consecutive: u32,
    counts: HashMap<String, u32>,
}

impl AlertTracker {
    /// Every location starts at zero and stays present for the tracker's
    /// lifetime.
    pub fn new<I, S>(locations: I, threshold: f64, consecutive: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            threshold,
            consecutive,
            counts: locations.into_iter().map(|l| (l.into(), 0)).collect(),
        }
    }

    /// Feed one reading's temperature for `location`.
    ///
    /// Locations the tracker wasn't built with are ignored.
    pub fn record(&mut self, location: &str, temperature: f64) -> Option<Alert> {
        let threshold = self.threshold;
        let count = self.counts.get_mut(location)?;

        if temperature <= threshold {
            *count = 0;
            return None;
        }

        *count = count.saturating_add(1);
        (*count >= self.consecutive).then(|| Alert {
            location: location.to_string(),
            temperature,
            consecutive: *count,
            threshold,
        })
    }

    /// Current consecutive-breach count, `None` for unknown locations.
    pub fn count(&self, location: &str) -> Option<u32> {
        self.counts.get(location).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> AlertTracker {
        AlertTracker::new(["Delhi", "Mumbai"], 35.0, 2)
    }

    #[test]
    fn starts_at_zero_for_every_location() {
        let t = tracker();
        assert_eq!(t.count("Delhi"), Some(0));
        assert_eq!(t.count("Mumbai"), Some(0));
        assert_eq!(t.count("Chennai"), None);
    }

    #[test]
    fn alerts_after_consecutive_breaches() {
        let mut t = tracker();

        assert_eq!(t.record("Delhi", 36.0), None);
        assert_eq!(t.count("Delhi"), Some(1));

        let alert = t.record("Delhi", 37.5).expect("second breach alerts");
        assert_eq!(alert.location, "Delhi");
        assert_eq!(alert.consecutive, 2);
        assert_eq!(alert.temperature, 37.5);
        assert_eq!(alert.threshold, 35.0);
    }

    #[test]
    fn keeps_alerting_while_breach_continues() {
        let mut t = tracker();
        t.record("Delhi", 36.0);
        t.record("Delhi", 36.0);

        let alert = t.record("Delhi", 36.0).expect("third breach still alerts");
        assert_eq!(alert.consecutive, 3);
        assert_eq!(t.count("Delhi"), Some(3));
    }

    #[test]
    fn reading_at_threshold_resets() {
        let mut t = tracker();
        t.record("Delhi", 36.0);

        assert_eq!(t.record("Delhi", 35.0), None);
        assert_eq!(t.count("Delhi"), Some(0));

        // The streak has to start over.
        assert_eq!(t.record("Delhi", 36.0), None);
        assert!(t.record("Delhi", 36.0).is_some());
    }

    #[test]
    fn locations_are_tracked_independently() {
        let mut t = tracker();
        t.record("Delhi", 40.0);
        t.record("Mumbai", 30.0);

        assert!(t.record("Delhi", 40.0).is_some());
        assert_eq!(t.record("Mumbai", 40.0), None);
        assert_eq!(t.count("Mumbai"), Some(1));
    }

    #[test]
    fn unknown_locations_are_not_tracked() {
        let mut t = tracker();
        assert_eq!(t.record("Atlantis", 50.0), None);
        assert_eq!(t.record("Atlantis", 50.0), None);
        assert_eq!(t.count("Atlantis"), None);
        assert_eq!(t.count("Delhi"), Some(0));
        assert_eq!(t.count("Mumbai"), Some(0));
    }

    #[test]
    fn single_breach_alerts_when_consecutive_is_one() {
        let mut t = AlertTracker::new(["Delhi"], 35.0, 1);
        assert!(t.record("Delhi", 35.01).is_some());
    }

    #[test]
    fn alert_display_names_location_and_threshold() {
        let alert = Alert {
            location: "Delhi".into(),
            temperature: 41.2,
            consecutive: 2,
            threshold: 35.0,
        };
        let msg = alert.to_string();
        assert!(msg.contains("Delhi"));
        assert!(msg.contains("35.00°C"));
        assert!(msg.contains("2 consecutive"));
    }
}
