//! Home dashboard and location views.

use caninewatch_client::FeedError;
use caninewatch_types::{GeoFix, SensorReading};

use super::{failure_text, Tone};
use crate::data::thresholds::{classify, LocalTier, TemperatureBand};

/// What the home dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub dog_name: Option<String>,
    pub temperature: String,
    /// Colour cue for the temperature; `None` without a reading.
    pub temperature_band: Option<TemperatureBand>,
    pub activity: String,
    pub location: String,
    pub status: String,
    pub tone: Tone,
    /// Local classification of the shown reading.
    pub tier: Option<LocalTier>,
    /// Server health status of the shown reading.
    pub health_status: Option<String>,
    pub updated: Option<String>,
}

impl DashboardView {
    /// Before the first fetch completes.
    pub fn loading() -> Self {
        Self {
            status: "Loading...".to_string(),
            ..Self::no_data()
        }
    }

    /// The feed answered but had no readings.
    pub fn no_data() -> Self {
        Self {
            dog_name: None,
            temperature: "--°C".to_string(),
            temperature_band: None,
            activity: "--%".to_string(),
            location: "No data".to_string(),
            status: "No sensor data available".to_string(),
            tone: Tone::Warning,
            tier: None,
            health_status: None,
            updated: None,
        }
    }

    /// Render a reading.
    pub fn from_reading(reading: &SensorReading) -> Self {
        let tier = classify(reading.temperature, reading.activity_percent);
        Self {
            dog_name: Some(reading.dog_name.clone()).filter(|n| !n.is_empty()),
            temperature: format!("{:.1}°C", reading.temperature),
            temperature_band: Some(tier.temperature),
            activity: format!("{}%", reading.activity_percent),
            location: match reading.location() {
                Some(GeoFix {
                    latitude,
                    longitude,
                }) => format!("GPS: {:.4}, {:.4}", latitude, longitude),
                None => "GPS: Waiting for signal...".to_string(),
            },
            status: "Status: Monitoring...".to_string(),
            tone: Tone::Normal,
            tier: Some(tier),
            health_status: reading.health_status.clone(),
            updated: Some(reading.timestamp.clone()).filter(|t| !t.is_empty()),
        }
    }

    /// Produce the next view from a fetch of the latest readings.
    ///
    /// A failure keeps the previously shown values and only replaces the
    /// status line.
    pub fn next(previous: &Self, result: &Result<Vec<SensorReading>, FeedError>) -> Self {
        match result {
            Ok(readings) => match readings.first() {
                Some(reading) => Self::from_reading(reading),
                None => Self::no_data(),
            },
            Err(err) => Self {
                status: failure_text(err),
                tone: Tone::Danger,
                ..previous.clone()
            },
        }
    }
}

/// What the location screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub latitude: String,
    pub longitude: String,
    pub status: String,
    pub tone: Tone,
    pub fix: Option<GeoFix>,
}

impl LocationView {
    pub fn loading() -> Self {
        Self {
            status: "Loading...".to_string(),
            ..Self::no_data()
        }
    }

    pub fn no_data() -> Self {
        Self {
            latitude: "Latitude: --".to_string(),
            longitude: "Longitude: --".to_string(),
            status: "No GPS data available".to_string(),
            tone: Tone::Warning,
            fix: None,
        }
    }

    pub fn from_reading(reading: &SensorReading) -> Self {
        match reading.location() {
            Some(fix) => Self {
                latitude: format!("Latitude: {:.6}", fix.latitude),
                longitude: format!("Longitude: {:.6}", fix.longitude),
                status: "✅ GPS Active - Within Safe Zone".to_string(),
                tone: Tone::Normal,
                fix: Some(fix),
            },
            None => Self {
                latitude: "Latitude: Waiting for GPS...".to_string(),
                longitude: "Longitude: Waiting for GPS...".to_string(),
                status: "⚠️ GPS signal not available".to_string(),
                tone: Tone::Warning,
                fix: None,
            },
        }
    }

    /// Produce the next view; a failure keeps the previous coordinates.
    pub fn next(previous: &Self, result: &Result<Vec<SensorReading>, FeedError>) -> Self {
        match result {
            Ok(readings) => match readings.first() {
                Some(reading) => Self::from_reading(reading),
                None => Self::no_data(),
            },
            Err(err) => Self {
                status: failure_text(err),
                tone: Tone::Danger,
                ..previous.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::thresholds::TierFlag;

    fn reading() -> SensorReading {
        SensorReading {
            dog_name: "Max".to_string(),
            temperature: 39.74,
            activity_percent: 12,
            health_status: Some("Fever Detected".to_string()),
            timestamp: "2025-10-21T18:30:15.123456".to_string(),
            latitude: 6.927079,
            longitude: 79.861244,
        }
    }

    #[test]
    fn test_dashboard_from_reading() {
        let view = DashboardView::from_reading(&reading());
        assert_eq!(view.temperature, "39.7°C");
        assert_eq!(view.temperature_band, Some(TemperatureBand::Fever));
        assert_eq!(view.activity, "12%");
        assert_eq!(view.location, "GPS: 6.9271, 79.8612");
        assert_eq!(view.status, "Status: Monitoring...");
        assert_eq!(
            view.tier.unwrap().flags(),
            vec![TierFlag::Fever, TierFlag::LowActivity]
        );
    }

    #[test]
    fn test_dashboard_without_fix() {
        let mut r = reading();
        r.latitude = 0.0;
        assert_eq!(
            DashboardView::from_reading(&r).location,
            "GPS: Waiting for signal..."
        );
    }

    #[test]
    fn test_dashboard_no_data_is_not_error() {
        let view = DashboardView::next(&DashboardView::loading(), &Ok(vec![]));
        assert_eq!(view.temperature, "--°C");
        assert_eq!(view.activity, "--%");
        assert_eq!(view.location, "No data");
        assert_eq!(view.status, "No sensor data available");
        assert_eq!(view.tone, Tone::Warning);
    }

    #[test]
    fn test_dashboard_failure_keeps_last_values() {
        let shown = DashboardView::from_reading(&reading());
        let err = FeedError::NetworkUnreachable("connection refused".to_string());
        let view = DashboardView::next(&shown, &Err(err));
        assert_eq!(view.temperature, "39.7°C");
        assert_eq!(view.status, "Error: Connection error: connection refused");
        assert_eq!(view.tone, Tone::Danger);
    }

    #[test]
    fn test_location_views() {
        let view = LocationView::from_reading(&reading());
        assert_eq!(view.latitude, "Latitude: 6.927079");
        assert_eq!(view.longitude, "Longitude: 79.861244");
        assert_eq!(view.status, "✅ GPS Active - Within Safe Zone");

        let mut r = reading();
        r.longitude = 0.0;
        let view = LocationView::from_reading(&r);
        assert_eq!(view.latitude, "Latitude: Waiting for GPS...");
        assert_eq!(view.status, "⚠️ GPS signal not available");
        assert!(view.fix.is_none());

        let view = LocationView::next(&view, &Ok(vec![]));
        assert_eq!(view.latitude, "Latitude: --");
        assert_eq!(view.status, "No GPS data available");
    }
}
