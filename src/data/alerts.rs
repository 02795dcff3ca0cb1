//! Alert aggregation.
//!
//! Turns the raw alert records of one feed page into display-ready
//! [`Alert`]s, each with exactly one resolved [`Severity`].

use caninewatch_types::{Alert, RawAlert, Severity};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Title used when a record carries no health status.
pub const DEFAULT_TITLE: &str = "Alert";

/// Why a record was left out of a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedAlert {
    #[error("record is null")]
    Null,

    #[error("record is not an object")]
    NotAnObject,

    #[error("record could not be decoded: {0}")]
    Undecodable(String),

    #[error("emergency #{0} is missing its type, message or action")]
    IncompleteEmergency(usize),
}

/// Result of aggregating one page of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertSet {
    /// Alerts in feed order.
    pub alerts: Vec<Alert>,
    /// Number of records that were skipped as malformed.
    pub skipped: usize,
}

impl AlertSet {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }
}

/// Resolve a single severity from the two server fields.
///
/// The first field that is present and non-blank wins, `emergency_level`
/// before `severity`. The chosen value is matched case-insensitively; a
/// value that is not a known tier resolves to [`Severity::Low`] without
/// consulting the other field.
pub fn resolve_severity(emergency_level: Option<&str>, severity: Option<&str>) -> Severity {
    [emergency_level, severity]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .and_then(Severity::parse_lenient)
        .unwrap_or_default()
}

/// Resolve one decoded record.
pub fn resolve(raw: RawAlert) -> Result<Alert, MalformedAlert> {
    let severity = resolve_severity(raw.emergency_level.as_deref(), raw.severity.as_deref());

    let emergencies = raw
        .emergencies
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, e)| e.validate().ok_or(MalformedAlert::IncompleteEmergency(i + 1)))
        .collect::<Result<Vec<_>, _>>()?;

    let title = raw
        .health_status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    Ok(Alert {
        title,
        severity,
        dog_name: raw.dog_name,
        temperature: raw.temperature,
        activity_percent: raw.activity_percent,
        immobile_duration_seconds: raw.immobile_duration_seconds,
        emergencies,
        messages: raw.messages.unwrap_or_default(),
        timestamp: raw.timestamp,
    })
}

/// Decode and resolve one JSON record.
pub fn resolve_value(record: &Value) -> Result<Alert, MalformedAlert> {
    match record {
        Value::Null => return Err(MalformedAlert::Null),
        Value::Object(_) => {}
        _ => return Err(MalformedAlert::NotAnObject),
    }
    let raw: RawAlert = serde_json::from_value(record.clone())
        .map_err(|e| MalformedAlert::Undecodable(e.to_string()))?;
    resolve(raw)
}

/// Aggregate a page of records.
///
/// Malformed records are skipped and logged; they never fail the page.
/// Order is preserved and nothing is re-sorted.
pub fn aggregate(records: &[Value]) -> AlertSet {
    let mut set = AlertSet::default();

    for (index, record) in records.iter().enumerate() {
        match resolve_value(record) {
            Ok(alert) => set.alerts.push(alert),
            Err(reason) => {
                warn!(index, %reason, "skipping malformed alert record");
                set.skipped += 1;
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emergency_level_takes_precedence() {
        assert_eq!(resolve_severity(Some("Critical"), Some("low")), Severity::Critical);
        assert_eq!(resolve_severity(Some("MEDIUM"), Some("critical")), Severity::Medium);
    }

    #[test]
    fn test_blank_emergency_level_falls_through() {
        assert_eq!(resolve_severity(Some(""), Some("High")), Severity::High);
        assert_eq!(resolve_severity(Some("   "), Some("high")), Severity::High);
        assert_eq!(resolve_severity(None, Some("medium")), Severity::Medium);
    }

    #[test]
    fn test_unrecognized_resolves_low() {
        // "none" is present and non-blank, so it is chosen and then not recognized.
        assert_eq!(resolve_severity(Some("none"), Some("high")), Severity::Low);
        assert_eq!(resolve_severity(None, Some("urgent")), Severity::Low);
        assert_eq!(resolve_severity(None, None), Severity::Low);
    }

    #[test]
    fn test_resolve_title_and_fields() {
        let alert = resolve_value(&json!({
            "health_status": "Fever Detected",
            "severity": "high",
            "temperature": 39.8,
            "activity_percent": 45.0,
            "alerts": ["High temperature: 39.8°C (Normal: 38-39.2°C)"],
            "timestamp": "2025-10-21T18:30:15.123456"
        }))
        .unwrap();

        assert_eq!(alert.title, "Fever Detected");
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.temperature, Some(39.8));
        assert_eq!(alert.messages.len(), 1);

        let untitled = resolve_value(&json!({"emergency_level": "critical"})).unwrap();
        assert_eq!(untitled.title, DEFAULT_TITLE);
        assert_eq!(untitled.severity, Severity::Critical);
    }

    #[test]
    fn test_emergencies_keep_feed_order() {
        let alert = resolve_value(&json!({
            "emergency_level": "critical",
            "emergencies": [
                {"type": "Critical Fever", "message": "Temperature critically high", "action": "Call vet"},
                {"type": "Prolonged Immobility", "message": "No movement for 30 minutes", "action": "Check on dog"}
            ]
        }))
        .unwrap();

        let kinds: Vec<_> = alert.emergencies.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Critical Fever", "Prolonged Immobility"]);
    }

    #[test]
    fn test_incomplete_emergency_is_malformed() {
        let result = resolve_value(&json!({
            "emergency_level": "high",
            "emergencies": [{"type": "Critical Fever", "message": "Too hot"}]
        }));
        assert_eq!(result, Err(MalformedAlert::IncompleteEmergency(1)));
    }

    #[test]
    fn test_null_among_valid_records_is_skipped() {
        let records = vec![
            json!({"health_status": "First", "severity": "low"}),
            Value::Null,
            json!({"health_status": "Second", "severity": "medium"}),
            json!({"health_status": "Third", "emergency_level": "critical"}),
        ];

        let set = aggregate(&records);
        assert_eq!(set.len(), 3);
        assert_eq!(set.skipped, 1);

        let titles: Vec<_> = set.alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_non_object_and_undecodable_records_are_skipped() {
        let records = vec![
            json!("just a string"),
            json!({"temperature": "hot"}),
            json!({"severity": "high"}),
        ];

        let set = aggregate(&records);
        assert_eq!(set.len(), 1);
        assert_eq!(set.skipped, 2);
        assert_eq!(set.alerts[0].severity, Severity::High);
    }

    #[test]
    fn test_empty_page() {
        let set = aggregate(&[]);
        assert!(set.is_empty());
        assert_eq!(set.skipped, 0);
    }
}
