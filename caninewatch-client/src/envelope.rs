//! Response wrappers used by the backend's list endpoints.

use caninewatch_types::SensorReading;
use serde::Deserialize;

/// `{ "data": [...], "count": N }`. The key is required; a null list means
/// no data.
#[derive(Debug, Deserialize)]
pub(crate) struct ReadingsEnvelope {
    #[serde(deserialize_with = "Option::deserialize")]
    pub data: Option<Vec<SensorReading>>,
}

/// `{ "alerts": [...], "count": N }`. Entries stay raw until aggregation.
#[derive(Debug, Deserialize)]
pub(crate) struct AlertsEnvelope {
    #[serde(deserialize_with = "Option::deserialize")]
    pub alerts: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// `{ "breeds": [...] }`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BreedsEnvelope {
    pub breeds: Vec<String>,
}

/// `{ "error": "..." }`, returned alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
