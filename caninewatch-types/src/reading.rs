//! Sensor readings reported by the collar.

/// A single biometric/location snapshot for one dog.
///
/// Readings are immutable: each fetch produces new values that supersede
/// the previous ones.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorReading {
    /// Name of the monitored dog.
    pub dog_name: String,

    /// Body temperature in degrees Celsius.
    pub temperature: f64,

    /// Activity level, 0-100.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::whole_percent")
    )]
    pub activity_percent: i32,

    /// Server-computed health status, e.g. "Fever Detected".
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub health_status: Option<String>,

    /// ISO-8601 timestamp as sent by the server.
    pub timestamp: String,

    /// Latitude in degrees; `0.0` means "no fix".
    pub latitude: f64,

    /// Longitude in degrees; `0.0` means "no fix".
    pub longitude: f64,
}

impl SensorReading {
    /// The GPS position, if the collar had a fix.
    ///
    /// The backend reports a missing fix as zero coordinates, so a reading
    /// only has a position when both latitude and longitude are non-zero.
    pub fn location(&self) -> Option<GeoFix> {
        if self.latitude != 0.0 && self.longitude != 0.0 {
            Some(GeoFix {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        } else {
            None
        }
    }
}

/// A GPS position with an actual fix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}
