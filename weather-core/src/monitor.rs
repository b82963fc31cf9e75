//! The polling loop.
//!
//! Each cycle visits every configured location in order: fetch, normalize,
//! buffer, check alerts. A failing location is logged and skipped; it never
//! stops the rest of the cycle. Once all locations are done the buffer is
//! rolled up into a [`Summary`] and cleared, then the loop sleeps until the
//! next cycle or until shutdown is signalled.

use std::{collections::HashSet, time::Duration};

use log::{debug, error, info, warn};
use tokio::sync::watch;

use crate::{
    alert::{Alert, AlertTracker},
    error::MonitorError,
    model::{Reading, Summary},
    normalize::normalize,
    provider::WeatherProvider,
    summary::summarize,
};

/// Everything the loop needs to know, fixed for its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    pub locations: Vec<String>,
    pub interval: Duration,
    pub temp_threshold: f64,
    pub consecutive_alerts: u32,
}

impl MonitorSettings {
    /// Reject settings the loop can't run with: no locations, blank or
    /// repeated names, a zero interval or streak length, a non-finite
    /// threshold.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.locations.is_empty() {
            return Err(MonitorError::Configuration(
                "at least one location must be configured".into(),
            ));
        }

        let mut seen = HashSet::new();
        for location in &self.locations {
            if location.trim().is_empty() {
                return Err(MonitorError::Configuration("location names must not be blank".into()));
            }
            if !seen.insert(location.as_str()) {
                return Err(MonitorError::Configuration(format!(
                    "location '{location}' is listed more than once"
                )));
            }
        }

        if self.interval.is_zero() {
            return Err(MonitorError::Configuration("interval must be greater than 0".into()));
        }
        if self.consecutive_alerts == 0 {
            return Err(MonitorError::Configuration(
                "consecutive_alerts must be greater than 0".into(),
            ));
        }
        if !self.temp_threshold.is_finite() {
            return Err(MonitorError::Configuration("temp_threshold must be a finite number".into()));
        }

        Ok(())
    }
}

/// A location that produced no reading this cycle.
#[derive(Debug)]
pub struct LocationFailure {
    pub location: String,
    pub error: MonitorError,
}

/// What happened during one cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Successful readings, in configured location order.
    pub readings: Vec<Reading>,
    pub alerts: Vec<Alert>,
    pub failures: Vec<LocationFailure>,
    /// Present whenever at least one reading was buffered.
    pub summary: Option<Summary>,
}

#[derive(Debug)]
pub struct Monitor<P> {
    provider: P,
    settings: MonitorSettings,
    alerts: AlertTracker,
    buffer: Vec<Reading>,
    cycles: u64,
}

impl<P: WeatherProvider> Monitor<P> {
    /// Fails with [`MonitorError::Configuration`] when `settings` don't
    /// pass [`MonitorSettings::validate`].
    pub fn new(provider: P, settings: MonitorSettings) -> Result<Self, MonitorError> {
        settings.validate()?;

        let alerts = AlertTracker::new(
            settings.locations.iter().cloned(),
            settings.temp_threshold,
            settings.consecutive_alerts,
        );

        Ok(Self {
            provider,
            settings,
            alerts,
            buffer: Vec::new(),
            cycles: 0,
        })
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Consecutive-breach count for `location`, `None` if it isn't monitored.
    pub fn alert_count(&self, location: &str) -> Option<u32> {
        self.alerts.count(location)
    }

    /// Readings waiting to be summarized. Always empty between cycles.
    pub fn buffered(&self) -> &[Reading] {
        &self.buffer
    }

    /// Number of cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Poll every location once, then roll up and clear the buffer.
    pub async fn run_cycle(&mut self) -> CycleReport {
        info!(
            "cycle {}: polling {} locations",
            self.cycles + 1,
            self.settings.locations.len()
        );

        let mut report = CycleReport::default();

        for location in &self.settings.locations {
            match poll(&self.provider, location).await {
                Ok(reading) => {
                    debug!("processed {reading}");
                    self.buffer.push(reading.clone());

                    if let Some(alert) = self.alerts.record(&reading.location, reading.temperature) {
                        warn!("ALERT: {alert}");
                        report.alerts.push(alert);
                    }

                    report.readings.push(reading);
                }
                Err(error) => {
                    warn!("error fetching weather for {location}: {error}");
                    report.failures.push(LocationFailure {
                        location: location.clone(),
                        error,
                    });
                }
            }
        }

        if !self.buffer.is_empty() {
            match summarize(&self.buffer) {
                Ok(summary) => {
                    info!("daily summary: {summary}");
                    report.summary = Some(summary);
                }
                Err(e) => error!("failed to summarize {} readings: {e}", self.buffer.len()),
            }
            self.buffer.clear();
        }

        self.cycles += 1;
        report
    }

    /// Run cycles until `shutdown` becomes `true` or its sender is dropped.
    ///
    /// `on_cycle` sees every report as soon as its cycle completes. A
    /// shutdown that arrives mid-cycle takes effect once that cycle is done;
    /// one that arrives during the sleep ends it immediately.
    pub async fn run<F>(&mut self, mut shutdown: watch::Receiver<bool>, mut on_cycle: F)
    where
        F: FnMut(&CycleReport),
    {
        info!(
            "monitoring {} locations every {:?}",
            self.settings.locations.len(),
            self.settings.interval
        );

        while !*shutdown.borrow() {
            let report = self.run_cycle().await;
            on_cycle(&report);

            debug!("waiting {:?} before the next cycle", self.settings.interval);
            tokio::select! {
                _ = shutdown.wait_for(|stop| *stop) => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        info!("monitor stopped after {} cycles", self.cycles);
    }
}

async fn poll<P: WeatherProvider>(provider: &P, location: &str) -> Result<Reading, MonitorError> {
    let raw = provider.fetch(location).await?;
    normalize(&raw, location)
}
