//! Daily rollup of buffered readings.
//!
//! # Clock injection
//! [`summarize`] stamps the summary with today's local date. Tests use
//! [`summarize_on`] with a fixed date instead.

use chrono::{Local, NaiveDate};

use crate::{
    error::MonitorError,
    model::{Reading, Summary},
    units::round2,
};

/// Format used for [`Summary::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Summarize `readings`, dated with the current local calendar day.
pub fn summarize(readings: &[Reading]) -> Result<Summary, MonitorError> {
    summarize_on(readings, Local::now().date_naive())
}

/// Summarize `readings`, dated `date`.
///
/// Fails with [`MonitorError::EmptyInput`] when there is nothing to summarize.
pub fn summarize_on(readings: &[Reading], date: NaiveDate) -> Result<Summary, MonitorError> {
    let first = readings.first().ok_or(MonitorError::EmptyInput)?;

    let mut min = first.temperature;
    let mut max = first.temperature;
    let mut sum = 0.0;
    for r in readings {
        min = min.min(r.temperature);
        max = max.max(r.temperature);
        sum += r.temperature;
    }
    let average = sum / readings.len() as f64;

    Ok(Summary {
        // Mean of rounded inputs can drift a hair outside [min, max].
        average_temp: round2(average.clamp(min, max)),
        min_temp: round2(min),
        max_temp: round2(max),
        dominant_condition: dominant_condition(readings).to_string(),
        date: date.format(DATE_FORMAT).to_string(),
    })
}

/// Most frequent condition; ties go to the one seen first.
///
/// `readings` must be non-empty.
fn dominant_condition(readings: &[Reading]) -> &str {
    // First-seen order is kept so that the strict `>` below breaks ties
    // in favour of the earliest condition.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for r in readings {
        match counts.iter_mut().find(|(c, _)| *c == r.condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.condition.as_str(), 1)),
        }
    }

    let mut best = ("", 0);
    for (condition, n) in counts {
        if n > best.1 {
            best = (condition, n);
        }
    }
    best.0
}
