//! HTTP feed backed by the monitoring backend's JSON API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use caninewatch_client::{HttpFeed, SensorFeed};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = HttpFeed::builder()
//!         .base_url("http://127.0.0.1:5000/api/")
//!         .connect_timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     for reading in feed.fetch_latest_readings(1).await? {
//!         println!("{}: {:.1}°C", reading.dog_name, reading.temperature);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use caninewatch_types::{
    ApiHealth, DogProfile, FertilityPrediction, FertilityRequest, HealthAssessment,
    HealthCheckRequest, HeatCycleHistory, ProfileWriteResponse, SensorReading,
};

use crate::envelope::{AlertsEnvelope, BreedsEnvelope, ErrorBody, ReadingsEnvelope};
use crate::{validate, AlertBatch, FeedError, SensorFeed};

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/";

/// Default bound for each of connect, read and write.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Feed that talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    base_url: Url,
}

impl HttpFeed {
    /// Create a new builder for configuring the feed.
    pub fn builder() -> HttpFeedBuilder {
        HttpFeedBuilder::default()
    }

    /// The normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FeedError> {
        self.base_url
            .join(path)
            .map_err(|e| FeedError::invalid(format!("bad endpoint path '{}': {}", path, e)))
    }

    /// `{base}{collection}/{name}`, with the name percent-encoded as one segment.
    fn named_endpoint(&self, collection: &str, name: &str) -> Result<Url, FeedError> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|_| FeedError::invalid("base URL cannot have path segments"))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FeedError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, FeedError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        decode(response).await
    }
}

fn with_limit(mut url: Url, limit: u32) -> Url {
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string());
    url
}

/// Turn a response into `T`, mapping non-2xx statuses to [`FeedError::Server`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FeedError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        return Err(FeedError::Server {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl SensorFeed for HttpFeed {
    fn description(&self) -> String {
        self.base_url.to_string()
    }

    async fn fetch_latest_readings(&self, limit: u32) -> Result<Vec<SensorReading>, FeedError> {
        let url = with_limit(self.endpoint("sensor-data")?, limit);
        let envelope: ReadingsEnvelope = self.get_json(url).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn fetch_alerts(&self, limit: u32) -> Result<AlertBatch, FeedError> {
        let url = with_limit(self.endpoint("alerts")?, limit);
        let envelope: AlertsEnvelope = self.get_json(url).await?;
        let records = envelope.alerts.unwrap_or_default();
        let count = envelope.count.unwrap_or(records.len() as u32);
        Ok(AlertBatch { records, count })
    }

    async fn submit_health_check(
        &self,
        request: &HealthCheckRequest,
    ) -> Result<HealthAssessment, FeedError> {
        validate::health_check(request)?;
        let url = self.endpoint("health-check")?;
        self.post_json(url, request).await
    }

    async fn submit_fertility_prediction(
        &self,
        request: &FertilityRequest,
    ) -> Result<FertilityPrediction, FeedError> {
        validate::fertility(request)?;
        let url = self.endpoint("predict-fertility")?;
        self.post_json(url, request).await
    }

    async fn fetch_heat_cycles(
        &self,
        dog_name: &str,
        limit: u32,
    ) -> Result<HeatCycleHistory, FeedError> {
        let dog_name = validate::dog_name(dog_name)?;
        let url = with_limit(self.named_endpoint("heat-cycles", dog_name)?, limit);
        self.get_json(url).await
    }

    async fn fetch_profile(&self, name: &str) -> Result<DogProfile, FeedError> {
        let name = validate::dog_name(name)?;
        let url = self.named_endpoint("dog-profile", name)?;
        self.get_json(url).await
    }

    async fn save_profile(&self, profile: &DogProfile) -> Result<DogProfile, FeedError> {
        validate::profile(profile)?;
        let url = self.endpoint("dog-profile")?;
        let response: ProfileWriteResponse = self.post_json(url, profile).await?;

        if !response.success {
            return Err(FeedError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "profile was not saved".to_string()),
            ));
        }

        Ok(response.profile.unwrap_or_else(|| profile.clone()))
    }

    async fn fetch_breeds(&self) -> Result<Vec<String>, FeedError> {
        let envelope: BreedsEnvelope = self.get_json(self.endpoint("breeds")?).await?;
        Ok(envelope.breeds)
    }

    async fn api_health(&self) -> Result<ApiHealth, FeedError> {
        self.get_json(self.endpoint("health")?).await
    }
}

/// Builder for HttpFeed.
#[derive(Debug, Default)]
pub struct HttpFeedBuilder {
    base_url: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl HttpFeedBuilder {
    /// Set the API root (default: `http://127.0.0.1:5000/api/`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the connect timeout (default: 30 seconds).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout (default: 30 seconds).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the write timeout (default: 30 seconds).
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Build the feed.
    ///
    /// Fails with [`FeedError::InputInvalid`] if the base URL does not parse.
    pub fn build(self) -> Result<HttpFeed, FeedError> {
        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let connect = self.connect_timeout.unwrap_or(DEFAULT_TIMEOUT);
        // reqwest bounds the whole exchange after connect; sending and
        // receiving share that budget.
        let exchange = self.read_timeout.unwrap_or(DEFAULT_TIMEOUT)
            + self.write_timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = Client::builder()
            .connect_timeout(connect)
            .timeout(connect + exchange)
            .build()
            .map_err(|e| FeedError::invalid(format!("HTTP client setup failed: {}", e)))?;

        Ok(HttpFeed { client, base_url })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, FeedError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash)
        .map_err(|e| FeedError::invalid(format!("invalid base URL '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let feed = HttpFeed::builder().build().unwrap();
        assert_eq!(feed.base_url().as_str(), "http://127.0.0.1:5000/api/");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let feed = HttpFeed::builder()
            .base_url("http://collar.local:8080/api")
            .build()
            .unwrap();
        assert_eq!(feed.base_url().as_str(), "http://collar.local:8080/api/");
        assert_eq!(
            feed.endpoint("sensor-data").unwrap().as_str(),
            "http://collar.local:8080/api/sensor-data"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpFeed::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, FeedError::InputInvalid(_)));
    }

    #[test]
    fn test_limit_query() {
        let feed = HttpFeed::builder().build().unwrap();
        let url = with_limit(feed.endpoint("alerts").unwrap(), 10);
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/alerts?limit=10");
    }

    #[test]
    fn test_named_endpoint_encodes_name() {
        let feed = HttpFeed::builder().build().unwrap();
        let url = feed.named_endpoint("dog-profile", "Max Jr").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/dog-profile/Max%20Jr");

        let url = feed.named_endpoint("heat-cycles", "a/b").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/heat-cycles/a%2Fb");
    }

    #[tokio::test]
    async fn test_invalid_input_never_sent() {
        // Port 9 (discard) would fail with a connection error if anything were sent.
        let feed = HttpFeed::builder()
            .base_url("http://127.0.0.1:9/api/")
            .build()
            .unwrap();

        let err = feed
            .submit_health_check(&HealthCheckRequest {
                dog_name: "  ".to_string(),
                temperature: 38.5,
                activity_percent: 50,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::InputInvalid(_)));

        let err = feed
            .save_profile(&DogProfile::new("Max", "Beagle", 0, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::InputInvalid(_)));

        let err = feed.fetch_profile("").await.unwrap_err();
        assert!(matches!(err, FeedError::InputInvalid(_)));
    }
}
