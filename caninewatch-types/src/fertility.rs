//! Fertility prediction requests, results and heat-cycle history.

/// Body of a `predict-fertility` request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FertilityRequest {
    pub dog_name: String,
    pub breed: String,
    pub age_months: u32,
    pub weight_kg: f64,
    /// Days since the last observed heat, if known.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub last_heat_days: Option<u32>,
}

/// Result of one fertility prediction request.
///
/// Each prediction is independent; the client keeps no session state.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FertilityPrediction {
    pub dog_name: String,
    pub breed: String,
    pub age_months: u32,
    pub weight_kg: f64,
    /// "First Heat" or "Next Heat".
    pub prediction_type: String,
    pub prediction_value: f64,
    pub prediction_unit: String,
    pub estimated_date: String,
    pub fertility_status: String,
    pub alert_level: String,
}

/// A stored prediction in a dog's heat-cycle history.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeatCycle {
    pub id: Option<String>,
    pub dog_name: String,
    pub prediction_type: String,
    pub prediction_value: f64,
    pub prediction_unit: String,
    pub estimated_date: Option<String>,
    pub fertility_status: String,
    pub alert_level: Option<String>,
    pub created_at: Option<String>,
}

/// Heat-cycle history for one dog.
///
/// The server may answer successfully but still report a storage problem
/// in `error` alongside an empty list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeatCycleHistory {
    pub cycles: Vec<HeatCycle>,
    pub count: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}
