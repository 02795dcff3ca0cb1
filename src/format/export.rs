//! JSON export of the current monitoring state.

use caninewatch_types::{Alert, SensorReading};
use serde_json::{json, Value};

use crate::data::thresholds::classify;

/// Build the export document: the latest reading, its local tier and the
/// resolved alerts.
pub fn export_document(reading: Option<&SensorReading>, alerts: &[Alert]) -> Value {
    let local_tier = reading.map(|r| {
        let tier = classify(r.temperature, r.activity_percent);
        json!({
            "temperature": tier.temperature.label(),
            "flags": tier.flags().iter().map(|f| f.label()).collect::<Vec<_>>(),
            "urgency": tier.urgency().as_str(),
        })
    });

    let worst = alerts.iter().map(|a| a.severity).max();

    json!({
        "reading": reading,
        "local_tier": local_tier,
        "summary": {
            "alerts": alerts.len(),
            "worst_severity": worst.map(|s| s.as_str()),
        },
        "alerts": alerts,
    })
}
