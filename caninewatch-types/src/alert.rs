//! Alert records as delivered by the feed, and their resolved form.

use crate::Severity;

/// An alert record exactly as the backend stores it.
///
/// Alerts come from two server paths: health checks (which carry a
/// `severity` and plain messages) and emergency checks (which carry an
/// `emergency_level` and structured emergencies). Every field is optional
/// here; resolution into an [`Alert`] happens in the aggregation layer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawAlert {
    pub dog_name: Option<String>,
    pub health_status: Option<String>,
    pub severity: Option<String>,
    pub emergency_level: Option<String>,
    pub emergencies: Option<Vec<RawEmergency>>,
    /// Plain-text alert messages.
    #[cfg_attr(feature = "serde", serde(rename = "alerts"))]
    pub messages: Option<Vec<String>>,
    pub temperature: Option<f64>,
    pub activity_percent: Option<f64>,
    /// Seconds without movement.
    #[cfg_attr(feature = "serde", serde(rename = "immobile_duration"))]
    pub immobile_duration_seconds: Option<i64>,
    pub timestamp: Option<String>,
}

/// An emergency sub-record as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawEmergency {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub action: Option<String>,
}

impl RawEmergency {
    /// Validate into an [`Emergency`]; all three fields must be present and non-empty.
    pub fn validate(&self) -> Option<Emergency> {
        fn filled(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        Some(Emergency {
            kind: filled(&self.kind)?,
            message: filled(&self.message)?,
            action: filled(&self.action)?,
        })
    }
}

/// A structured, high-priority finding attached to an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emergency {
    /// What happened, e.g. "Critical Fever".
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub message: String,
    /// Recommended action for the owner.
    pub action: String,
}

/// A display-ready alert with a single resolved severity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    /// The server's health status, or "Alert" when absent.
    pub title: String,
    pub severity: Severity,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub dog_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub temperature: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub activity_percent: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub immobile_duration_seconds: Option<i64>,
    /// Emergencies in feed order.
    pub emergencies: Vec<Emergency>,
    /// Plain messages in feed order.
    pub messages: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub timestamp: Option<String>,
}

impl Alert {
    /// Create an alert with the given title and severity and nothing else.
    pub fn new(title: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            severity,
            dog_name: None,
            temperature: None,
            activity_percent: None,
            immobile_duration_seconds: None,
            emergencies: Vec::new(),
            messages: Vec::new(),
            timestamp: None,
        }
    }
}
