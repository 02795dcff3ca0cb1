//! The feed contract consumed by the monitoring pipeline.

use async_trait::async_trait;
use caninewatch_types::{
    ApiHealth, DogProfile, FertilityPrediction, FertilityRequest, HealthAssessment,
    HealthCheckRequest, HeatCycleHistory, SensorReading,
};

use crate::FeedError;

/// One page of alert records, still unresolved.
///
/// Records are kept as raw JSON so that a single malformed entry can be
/// skipped by the aggregator without failing the whole page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBatch {
    /// Records in the order the server sent them (typically newest first).
    pub records: Vec<serde_json::Value>,
    /// The server's own count.
    pub count: u32,
}

impl AlertBatch {
    /// Whether the server had nothing to report.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A source of sensor readings, alerts and predictions.
///
/// Every call either returns a complete result or a [`FeedError`]. An empty
/// sequence is a valid "no data yet" answer and is never reported as an
/// error.
#[async_trait]
pub trait SensorFeed: Send + Sync + std::fmt::Debug {
    /// Human-readable description of where data comes from.
    fn description(&self) -> String;

    /// Latest readings, newest first.
    async fn fetch_latest_readings(&self, limit: u32) -> Result<Vec<SensorReading>, FeedError>;

    /// Latest alert records, newest first.
    async fn fetch_alerts(&self, limit: u32) -> Result<AlertBatch, FeedError>;

    /// Ask the server to classify one temperature/activity sample.
    async fn submit_health_check(
        &self,
        request: &HealthCheckRequest,
    ) -> Result<HealthAssessment, FeedError>;

    /// Ask the server for a fertility prediction.
    async fn submit_fertility_prediction(
        &self,
        request: &FertilityRequest,
    ) -> Result<FertilityPrediction, FeedError>;

    /// Stored predictions for one dog.
    async fn fetch_heat_cycles(
        &self,
        dog_name: &str,
        limit: u32,
    ) -> Result<HeatCycleHistory, FeedError>;

    /// Load a dog profile by name.
    async fn fetch_profile(&self, name: &str) -> Result<DogProfile, FeedError>;

    /// Create or update a profile, returning the stored version.
    async fn save_profile(&self, profile: &DogProfile) -> Result<DogProfile, FeedError>;

    /// Breed names known to the prediction model.
    async fn fetch_breeds(&self) -> Result<Vec<String>, FeedError>;

    /// Backend liveness.
    async fn api_health(&self) -> Result<ApiHealth, FeedError>;
}
