use serde_json::json;
use weather_monitor_core::CycleReport;

/// Print one cycle's readings, alerts and summary.
///
/// Failures are already reported through the logger.
pub fn print_report(report: &CycleReport, as_json: bool) {
    for line in render(report, as_json) {
        println!("{line}");
    }
}

fn render(report: &CycleReport, as_json: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if as_json {
        for reading in &report.readings {
            lines.push(json!({ "event": "reading", "reading": reading }).to_string());
        }
        for alert in &report.alerts {
            lines.push(json!({ "event": "alert", "alert": alert }).to_string());
        }
        if let Some(summary) = &report.summary {
            lines.push(json!({ "event": "summary", "summary": summary }).to_string());
        }
        return lines;
    }

    for reading in &report.readings {
        lines.push(format!("Processed weather data for {reading}"));
    }
    for alert in &report.alerts {
        lines.push(format!("ALERT: {alert}"));
    }
    if let Some(summary) = &report.summary {
        lines.push(format!("\nDaily summary for {summary}"));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_monitor_core::{Alert, Reading, Summary};

    fn report() -> CycleReport {
        CycleReport {
            readings: vec![Reading {
                location: "Delhi".into(),
                temperature: 36.5,
                feels_like: 39.1,
                condition: "Haze".into(),
                timestamp: "2024-05-01 09:30:00".into(),
            }],
            alerts: vec![Alert {
                location: "Delhi".into(),
                temperature: 36.5,
                consecutive: 2,
                threshold: 35.0,
            }],
            failures: vec![],
            summary: Some(Summary {
                average_temp: 36.5,
                min_temp: 36.5,
                max_temp: 36.5,
                dominant_condition: "Haze".into(),
                date: "2024-05-01".into(),
            }),
        }
    }

    #[test]
    fn text_output_has_reading_alert_and_summary() {
        let lines = render(&report(), false);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Processed weather data for Delhi"));
        assert!(lines[1].starts_with("ALERT: temperature in Delhi"));
        assert!(lines[2].contains("Daily summary for 2024-05-01"));
    }

    #[test]
    fn json_output_is_one_object_per_event() {
        let lines = render(&report(), true);
        assert_eq!(lines.len(), 3);

        let events: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| serde_json::from_str(l).expect("each line is JSON"))
            .collect();

        assert_eq!(events[0]["event"], "reading");
        assert_eq!(events[0]["reading"]["location"], "Delhi");
        assert_eq!(events[1]["event"], "alert");
        assert_eq!(events[1]["alert"]["consecutive"], 2);
        assert_eq!(events[2]["event"], "summary");
        assert_eq!(events[2]["summary"]["dominant_condition"], "Haze");
    }

    #[test]
    fn empty_report_prints_nothing() {
        assert!(render(&CycleReport::default(), false).is_empty());
        assert!(render(&CycleReport::default(), true).is_empty());
    }
}
