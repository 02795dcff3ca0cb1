//! End-to-end tests of the monitoring pipeline against an in-memory feed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use caninewatch::data::{classify, TierFlag};
use caninewatch::format::{
    breeds_or_default, failure_text, format_alerts, AlertsView, DashboardView, DEFAULT_BREEDS,
    NO_ALERTS,
};
use caninewatch::poll::{spawn_poller, Cadence};
use caninewatch::source::PollSource;
use caninewatch_client::{AlertBatch, FeedError, SensorFeed};
use caninewatch_types::{
    ApiHealth, DogProfile, FertilityPrediction, FertilityRequest, HealthAssessment,
    HealthCheckRequest, HeatCycleHistory, SensorReading, Severity,
};

/// A feed that answers from memory after a fixed latency.
#[derive(Debug)]
struct MemoryFeed {
    readings: Vec<SensorReading>,
    alerts: Vec<Value>,
    failure: Option<FeedError>,
    latency: Duration,
    calls: AtomicUsize,
}

impl MemoryFeed {
    fn new() -> Self {
        Self {
            readings: vec![reading(38.6, 55, "2025-10-21T18:30:15.123456")],
            alerts: Vec::new(),
            failure: None,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    fn with_alerts(mut self, alerts: Vec<Value>) -> Self {
        self.alerts = alerts;
        self
    }

    fn failing(mut self, err: FeedError) -> Self {
        self.failure = Some(err);
        self
    }

    fn slow(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer<T>(&self, value: T) -> Result<T, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl SensorFeed for MemoryFeed {
    fn description(&self) -> String {
        "memory".to_string()
    }

    async fn fetch_latest_readings(&self, limit: u32) -> Result<Vec<SensorReading>, FeedError> {
        let readings = self.readings.iter().take(limit as usize).cloned().collect();
        self.answer(readings).await
    }

    async fn fetch_alerts(&self, limit: u32) -> Result<AlertBatch, FeedError> {
        let records: Vec<Value> = self.alerts.iter().take(limit as usize).cloned().collect();
        let count = records.len() as u32;
        self.answer(AlertBatch { records, count }).await
    }

    async fn submit_health_check(
        &self,
        request: &HealthCheckRequest,
    ) -> Result<HealthAssessment, FeedError> {
        self.answer(HealthAssessment {
            dog_name: request.dog_name.clone(),
            temperature: request.temperature,
            activity_percent: request.activity_percent,
            health_status: "Normal".to_string(),
            severity: "low".into(),
            ..Default::default()
        })
        .await
    }

    async fn submit_fertility_prediction(
        &self,
        _request: &FertilityRequest,
    ) -> Result<FertilityPrediction, FeedError> {
        Err(FeedError::Unsupported("predictions".to_string()))
    }

    async fn fetch_heat_cycles(
        &self,
        _dog_name: &str,
        _limit: u32,
    ) -> Result<HeatCycleHistory, FeedError> {
        self.answer(HeatCycleHistory::default()).await
    }

    async fn fetch_profile(&self, _name: &str) -> Result<DogProfile, FeedError> {
        Err(FeedError::Server {
            status: 404,
            message: Some("Dog profile not found".to_string()),
        })
    }

    async fn save_profile(&self, profile: &DogProfile) -> Result<DogProfile, FeedError> {
        self.answer(profile.clone()).await
    }

    async fn fetch_breeds(&self) -> Result<Vec<String>, FeedError> {
        self.answer(vec!["Beagle".to_string(), "Poodle".to_string()])
            .await
    }

    async fn api_health(&self) -> Result<ApiHealth, FeedError> {
        self.answer(ApiHealth {
            status: "ok".to_string(),
            models_loaded: true,
        })
        .await
    }
}

fn reading(temperature: f64, activity_percent: i32, timestamp: &str) -> SensorReading {
    SensorReading {
        dog_name: "Max".to_string(),
        temperature,
        activity_percent,
        health_status: Some("Normal".to_string()),
        timestamp: timestamp.to_string(),
        latitude: 6.927079,
        longitude: 79.861244,
    }
}

fn alerts_poller(feed: Arc<MemoryFeed>) -> PollSource<AlertBatch> {
    let (handle, rx) = spawn_poller("alerts", Cadence::OnDemand, move || {
        let feed = Arc::clone(&feed);
        async move { feed.fetch_alerts(10).await }
    });
    PollSource::new(handle, rx)
}

#[tokio::test]
async fn test_null_record_is_skipped_and_order_kept() {
    let feed = MemoryFeed::new().with_alerts(vec![
        json!({"health_status": "Fever Detected", "severity": "high"}),
        Value::Null,
        json!({"health_status": "Low Activity", "severity": "medium"}),
        json!({"emergency_level": "critical", "emergencies": [
            {"type": "Critical Fever", "message": "Temperature critically high: 40.3°C", "action": "IMMEDIATE VETERINARY CARE REQUIRED"}
        ]}),
    ]);

    let result = feed.fetch_alerts(10).await;
    let view = AlertsView::from_result(&result);
    let AlertsView::Loaded {
        alerts, skipped, ..
    } = &view
    else {
        panic!("expected alerts, got {:?}", view);
    };

    assert_eq!(*skipped, 1);
    let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Fever Detected", "Low Activity", "Alert"]);

    let text = view.text();
    assert!(text.starts_with("⚠️ 1. Fever Detected\n"));
    assert!(text.contains("⚡ 2. Low Activity\n"));
    assert!(text.contains("🚨 3. Alert\n   Level: CRITICAL\n"));
}

#[tokio::test]
async fn test_emergency_level_wins_over_severity() {
    let feed = MemoryFeed::new().with_alerts(vec![json!({
        "health_status": "Critical Fever",
        "emergency_level": "Critical",
        "severity": "low",
        "temperature": 40.3,
        "timestamp": "2025-10-21T18:30:15.123456"
    })]);

    let view = AlertsView::from_result(&feed.fetch_alerts(10).await);
    assert_eq!(view.worst(), Some(Severity::Critical));
    assert_eq!(
        view.text(),
        "🚨 1. Critical Fever\n   Level: CRITICAL\n   Temperature: 40.3°C\n   Time: 21 Oct 2025, 18:30\n\n"
    );
}

#[tokio::test]
async fn test_empty_alerts_render_no_data() {
    let feed = MemoryFeed::new();
    let result = feed.fetch_alerts(10).await;
    assert!(result.as_ref().unwrap().is_empty());

    let view = AlertsView::from_result(&result);
    assert_eq!(view, AlertsView::NoData);
    assert_eq!(view.text(), NO_ALERTS);
    assert_eq!(view.summary(), None);
}

#[tokio::test]
async fn test_formatting_is_idempotent() {
    let feed = MemoryFeed::new().with_alerts(vec![json!({
        "health_status": "Fever Detected",
        "severity": "high",
        "alerts": ["High temperature: 39.8°C (Normal: 38-39.2°C)"],
        "activity_percent": 35.0,
        "immobile_duration": 600
    })]);

    let view = AlertsView::from_result(&feed.fetch_alerts(10).await);
    let AlertsView::Loaded { alerts, .. } = &view else {
        panic!("expected alerts");
    };
    assert_eq!(format_alerts(alerts), format_alerts(alerts));
    assert!(view.text().contains("   Immobile: 10 minutes\n"));
}

#[tokio::test(start_paused = true)]
async fn test_alerts_poller_delivers_through_source() {
    let feed = Arc::new(
        MemoryFeed::new()
            .with_alerts(vec![json!({"severity": "low"})])
            .slow(Duration::from_secs(2)),
    );
    let mut source = alerts_poller(feed.clone());

    assert!(source.poll().is_none());
    assert!(source.is_loading());

    tokio::time::sleep(Duration::from_secs(3)).await;
    let result = source.poll().expect("result after latency");
    assert_eq!(
        AlertsView::from_result(&result).summary().as_deref(),
        Some("1 alerts loaded")
    );
    assert!(!source.is_loading());
    assert_eq!(feed.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_screen_discards_late_response() {
    let feed = Arc::new(
        MemoryFeed::new()
            .with_alerts(vec![json!({"severity": "high"})])
            .slow(Duration::from_secs(5)),
    );
    let source = alerts_poller(feed.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(feed.calls(), 1);
    drop(source);

    // The response would have arrived by now; it reached no one and
    // nothing was scheduled after it.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(feed.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_cadence_and_failure() {
    let feed = Arc::new(MemoryFeed::new());
    let fetch_feed = feed.clone();
    let (handle, rx) = spawn_poller(
        "dashboard",
        Cadence::Every(Duration::from_secs(10)),
        move || {
            let feed = Arc::clone(&fetch_feed);
            async move { feed.fetch_latest_readings(1).await }
        },
    );
    let mut source = PollSource::new(handle, rx);

    tokio::time::sleep(Duration::from_millis(10)).await;
    let first = source.poll().expect("first reading");
    let view = DashboardView::next(&DashboardView::loading(), &first);
    assert_eq!(view.temperature, "38.6°C");
    assert_eq!(view.status, "Status: Monitoring...");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(source.poll().is_some());
    assert_eq!(feed.calls(), 2);

    // A failed refresh keeps what was shown and only changes the status.
    let failed = DashboardView::next(&view, &Err(FeedError::Timeout));
    assert_eq!(failed.temperature, "38.6°C");
    assert_eq!(failed.status, "Error: Connection error: request timed out");
}

#[test]
fn test_timeout_reads_like_unreachable() {
    let timeout = failure_text(&FeedError::Timeout);
    let unreachable = failure_text(&FeedError::NetworkUnreachable("refused".to_string()));
    assert!(timeout.starts_with("Error: Connection error: "));
    assert!(unreachable.starts_with("Error: Connection error: "));
}

#[test]
fn test_critical_and_low_activity_flags_coexist() {
    let tier = classify(40.1, 5);
    assert_eq!(
        tier.flags(),
        vec![
            TierFlag::CriticalHigh,
            TierFlag::Fever,
            TierFlag::LowActivity
        ]
    );
    assert_eq!(tier.urgency(), Severity::Critical);
}

#[tokio::test]
async fn test_breeds_fall_back_on_failure() {
    let healthy = MemoryFeed::new();
    assert_eq!(breeds_or_default(&healthy).await, vec!["Beagle", "Poodle"]);

    let broken = MemoryFeed::new().failing(FeedError::Server {
        status: 500,
        message: None,
    });
    let breeds = breeds_or_default(&broken).await;
    assert_eq!(breeds.len(), 7);
    assert_eq!(breeds, DEFAULT_BREEDS.to_vec());
}
