//! View projection: store contents → chart series
//!
//! ## Overview
//!
//! Derives, purely as a function of (store contents, selected time
//! window, selected environment, current time), the exact series to
//! chart:
//!
//! 1. Time filter: keep readings at or after the window cutoff
//! 2. Group by sensor, preserving relative order within each group
//! 3. Retain only the selected environment's group
//! 4. Shape labels (local time of day) and values (°C) for rendering
//!
//! The projection never fails: an empty store, a cutoff excluding
//! everything, or an environment with no matching group all yield an
//! empty series.

use chrono::{Local, TimeZone};

use crate::environment::display_name;
use crate::reading::{Reading, SensorId};
use crate::time::Timestamp;
use crate::window::TimeWindow;

/// Chart-ready series for a single environment.
///
/// `labels[i]` and `values[i]` describe the same reading; both
/// sequences preserve store insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Display name of the charted environment.
    pub environment: String,
    /// Human-readable time-of-day label per reading.
    pub labels: Vec<String>,
    /// Temperature in °C per reading.
    pub values: Vec<f32>,
}

impl ChartSeries {
    /// Series with no rows for `sensor_id`.
    pub fn empty(sensor_id: SensorId) -> Self {
        Self {
            environment: display_name(sensor_id),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of charted readings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compute the series to chart for one environment.
pub fn project(
    readings: &[Reading],
    window: TimeWindow,
    environment: SensorId,
    now: Timestamp,
) -> ChartSeries {
    let cutoff = window.cutoff(now);

    let recent = readings
        .iter()
        .filter(|r| cutoff.map_or(true, |c| r.timestamp >= c));

    // Partition by sensor, first-seen order between groups and store
    // order within each
    let mut groups: Vec<(SensorId, Vec<&Reading>)> = Vec::new();
    for reading in recent {
        match groups.iter_mut().find(|(id, _)| *id == reading.sensor_id) {
            Some((_, group)) => group.push(reading),
            None => groups.push((reading.sensor_id, vec![reading])),
        }
    }

    let selected = groups
        .into_iter()
        .find(|(id, _)| *id == environment)
        .map(|(_, group)| group)
        .unwrap_or_default();

    ChartSeries {
        environment: display_name(environment),
        labels: selected.iter().map(|r| time_of_day(r.timestamp)).collect(),
        values: selected.iter().map(|r| r.temperature).collect(),
    }
}

/// Format a timestamp as a local time-of-day string.
fn time_of_day(timestamp: Timestamp) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: u64 = 3_600_000;
    const DAY_MS: u64 = 24 * HOUR_MS;

    fn reading(sensor_id: u8, timestamp: Timestamp, temperature: f32) -> Reading {
        Reading {
            sensor_id,
            timestamp,
            temperature,
        }
    }

    #[test]
    fn time_filter_keeps_only_recent() {
        let now = 10 * DAY_MS;
        let readings = [
            reading(1, now - 30_000, 20.0),    // 30s ago
            reading(1, now - 2 * HOUR_MS, 21.0), // 2h ago
            reading(1, now - 8 * DAY_MS, 22.0),  // 8d ago
        ];

        let series = project(&readings, TimeWindow::LastHour, 1, now);
        assert_eq!(series.values, vec![20.0]);
    }

    #[test]
    fn reading_on_cutoff_is_kept() {
        let now = 10 * DAY_MS;
        let readings = [reading(1, now - HOUR_MS, 19.5)];

        let series = project(&readings, TimeWindow::LastHour, 1, now);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn environment_filter_keeps_one_group_in_order() {
        let now = 1000;
        let readings = [
            reading(1, 100, 20.0),
            reading(2, 200, 25.0),
            reading(1, 300, 20.5),
            reading(2, 400, 25.5),
        ];

        let series = project(&readings, TimeWindow::All, 2, now);
        assert_eq!(series.environment, "Living Room");
        assert_eq!(series.values, vec![25.0, 25.5]);
    }

    #[test]
    fn no_matching_group_yields_empty_series() {
        let readings = [reading(1, 100, 20.0)];

        let series = project(&readings, TimeWindow::All, 3, 1000);
        assert!(series.is_empty());
        assert!(series.labels.is_empty());
        assert_eq!(series, ChartSeries::empty(3));
        assert_eq!(series.environment, "Bedroom");
    }

    #[test]
    fn empty_store_yields_empty_series() {
        let series = project(&[], TimeWindow::LastHour, 1, 1000);
        assert!(series.is_empty());
    }

    #[test]
    fn cutoff_excluding_everything_yields_empty_series() {
        let now = 10 * DAY_MS;
        let readings = [reading(1, now - DAY_MS, 20.0)];

        let series = project(&readings, TimeWindow::Last60Seconds, 1, now);
        assert!(series.is_empty());
    }

    #[test]
    fn unknown_environment_uses_raw_id_name() {
        let readings = [reading(42, 100, 16.0)];

        let series = project(&readings, TimeWindow::All, 42, 1000);
        assert_eq!(series.environment, "42");
        assert_eq!(series.values, vec![16.0]);
    }

    #[test]
    fn labels_align_with_values() {
        let readings = [reading(1, 100, 20.0), reading(1, 200, 21.0)];

        let series = project(&readings, TimeWindow::All, 1, 1000);
        assert_eq!(series.labels.len(), series.values.len());
    }
}
