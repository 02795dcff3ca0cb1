//! File-backed feed.
//!
//! Serves readings, alerts and history from a JSON fixture instead of the
//! backend. The file is re-read on every call so it can be edited while the
//! monitor runs.
//!
//! ```json
//! {
//!   "readings": [{"dog_name": "Max", "temperature": 38.6, "activity_percent": 40}],
//!   "alerts": [{"health_status": "Normal", "severity": "low"}],
//!   "heat_cycles": [{"dog_name": "Max", "prediction_type": "Next Heat", "prediction_value": 45}],
//!   "profiles": [{"name": "Max", "breed": "Beagle", "age_months": 24, "weight_kg": 12.0}],
//!   "breeds": ["Beagle", "Poodle"]
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use caninewatch_client::{AlertBatch, FeedError, SensorFeed};
use caninewatch_types::{
    ApiHealth, DogProfile, FertilityPrediction, FertilityRequest, HealthAssessment,
    HealthCheckRequest, HeatCycle, HeatCycleHistory, SensorReading,
};

/// Contents of a fixture file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    readings: Vec<SensorReading>,
    /// Kept raw so malformed entries reach the aggregator as-is.
    alerts: Vec<serde_json::Value>,
    heat_cycles: Vec<HeatCycle>,
    profiles: Vec<DogProfile>,
    breeds: Vec<String>,
    health: Option<ApiHealth>,
}

/// A [`SensorFeed`] that reads a JSON fixture file.
///
/// Read operations are served from the file. Submissions and profile
/// writes need the backend and fail with [`FeedError::Unsupported`].
#[derive(Debug, Clone)]
pub struct FixtureFeed {
    path: PathBuf,
}

impl FixtureFeed {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path being served.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Fixture, FeedError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            FeedError::NetworkUnreachable(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "fixture loaded");
        Ok(serde_json::from_str(&content)?)
    }

    fn unsupported(what: &str) -> FeedError {
        FeedError::Unsupported(format!("{} needs a live backend", what))
    }
}

#[async_trait]
impl SensorFeed for FixtureFeed {
    fn description(&self) -> String {
        format!("file: {}", self.path.display())
    }

    async fn fetch_latest_readings(&self, limit: u32) -> Result<Vec<SensorReading>, FeedError> {
        let mut readings = self.load().await?.readings;
        readings.truncate(limit as usize);
        Ok(readings)
    }

    async fn fetch_alerts(&self, limit: u32) -> Result<AlertBatch, FeedError> {
        let mut records = self.load().await?.alerts;
        records.truncate(limit as usize);
        let count = records.len() as u32;
        Ok(AlertBatch { records, count })
    }

    async fn submit_health_check(
        &self,
        _request: &HealthCheckRequest,
    ) -> Result<HealthAssessment, FeedError> {
        Err(Self::unsupported("health analysis"))
    }

    async fn submit_fertility_prediction(
        &self,
        _request: &FertilityRequest,
    ) -> Result<FertilityPrediction, FeedError> {
        Err(Self::unsupported("fertility prediction"))
    }

    async fn fetch_heat_cycles(
        &self,
        dog_name: &str,
        limit: u32,
    ) -> Result<HeatCycleHistory, FeedError> {
        let dog_name = caninewatch_client::validate::dog_name(dog_name)?;
        let cycles: Vec<HeatCycle> = self
            .load()
            .await?
            .heat_cycles
            .into_iter()
            .filter(|c| c.dog_name == dog_name)
            .take(limit as usize)
            .collect();
        Ok(HeatCycleHistory {
            count: cycles.len() as u32,
            cycles,
            error: None,
        })
    }

    async fn fetch_profile(&self, name: &str) -> Result<DogProfile, FeedError> {
        let name = caninewatch_client::validate::dog_name(name)?;
        self.load()
            .await?
            .profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| FeedError::Server {
                status: 404,
                message: Some("Dog profile not found".to_string()),
            })
    }

    async fn save_profile(&self, _profile: &DogProfile) -> Result<DogProfile, FeedError> {
        Err(Self::unsupported("saving a profile"))
    }

    async fn fetch_breeds(&self) -> Result<Vec<String>, FeedError> {
        Ok(self.load().await?.breeds)
    }

    async fn api_health(&self) -> Result<ApiHealth, FeedError> {
        Ok(self.load().await?.health.unwrap_or(ApiHealth {
            status: "fixture".to_string(),
            models_loaded: false,
        }))
    }
}
