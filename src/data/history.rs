//! Reading history for the dashboard sparklines.

use std::collections::VecDeque;

use caninewatch_types::SensorReading;

/// Maximum number of readings to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks recent readings for trend display.
///
/// Readings are keyed by their server timestamp so that polling the same
/// latest reading twice does not add a duplicate point.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Recent temperatures, oldest first.
    pub temperatures: VecDeque<f64>,
    /// Recent activity levels, oldest first.
    pub activity: VecDeque<i32>,
    last_timestamp: Option<String>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading. Returns `false` if it was already the latest point.
    pub fn record(&mut self, reading: &SensorReading) -> bool {
        if !reading.timestamp.is_empty()
            && self.last_timestamp.as_deref() == Some(reading.timestamp.as_str())
        {
            return false;
        }
        self.last_timestamp = Some(reading.timestamp.clone());

        self.temperatures.push_back(reading.temperature);
        if self.temperatures.len() > MAX_HISTORY_SIZE {
            self.temperatures.pop_front();
        }

        self.activity.push_back(reading.activity_percent);
        if self.activity.len() > MAX_HISTORY_SIZE {
            self.activity.pop_front();
        }

        true
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Temperature sparkline (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn temperature_sparkline(&self) -> Vec<u8> {
        normalize_sparkline(self.temperatures.iter().copied())
    }

    /// Activity sparkline (normalized to 0-7 for 8 bar levels).
    pub fn activity_sparkline(&self) -> Vec<u8> {
        normalize_sparkline(self.activity.iter().map(|&a| a as f64))
    }

    /// Change between the two most recent temperatures.
    pub fn temperature_trend(&self) -> Option<f64> {
        let n = self.temperatures.len();
        if n < 2 {
            return None;
        }
        Some(self.temperatures[n - 1] - self.temperatures[n - 2])
    }
}

/// Normalize values to the 0-7 range for sparkline display.
fn normalize_sparkline(values: impl Iterator<Item = f64>) -> Vec<u8> {
    let values: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if values.len() < 2 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| {
            if range <= f64::EPSILON {
                // Flat line sits in the middle
                return 3;
            }
            let normalized = ((v - min) / range * 7.0).round() as u8;
            normalized.min(7)
        })
        .collect()
}
