//! Application state and navigation logic.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use caninewatch_client::{AlertBatch, SensorFeed};
use caninewatch_types::{HealthAssessment, HeatCycleHistory, SensorReading};

use crate::data::History;
use crate::format::{
    export_document, AlertsView, AssessmentView, CurrentSample, DashboardView, HistoryView,
    LocationView,
};
use crate::poll::{spawn_poller, Cadence};
use crate::settings::Settings;
use crate::source::PollSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Latest reading with auto-refresh.
    Dashboard,
    Alerts,
    Location,
    /// Current sample and on-demand analysis.
    Health,
    /// Heat-cycle prediction history.
    History,
}

impl View {
    /// All views in tab order.
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Alerts,
        View::Location,
        View::Health,
        View::History,
    ];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Position in the tab bar.
    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Alerts => 1,
            View::Location => 2,
            View::Health => 3,
            View::History => 4,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Alerts => "Alerts",
            View::Location => "Location",
            View::Health => "Health",
            View::History => "History",
        }
    }
}

/// Runtime options for the TUI.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub home_refresh: Duration,
    pub alerts_limit: u32,
    pub heat_history_limit: u32,
    pub dog_name: String,
}

impl AppOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            home_refresh: settings.home_refresh_interval()?,
            alerts_limit: settings.alerts_limit,
            heat_history_limit: settings.heat_history_limit,
            dog_name: settings.dog_name.clone(),
        })
    }
}

/// Pollers owned by the active detail screen.
///
/// Each variant lives exactly as long as its tab is shown. Dropping it
/// stops the pollers, so a late response can no longer reach the screen.
#[derive(Debug)]
enum Screen {
    Alerts(PollSource<AlertBatch>),
    Location(PollSource<Vec<SensorReading>>),
    Health {
        readings: PollSource<Vec<SensorReading>>,
        analysis: Option<PollSource<HealthAssessment>>,
    },
    History(PollSource<HeatCycleHistory>),
}

/// Main application state.
///
/// Every poller delivers results through a [`PollSource`]; [`App::update`]
/// drains them each frame and swaps in freshly built view snapshots. The
/// UI only ever reads those snapshots.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    feed: Arc<dyn SensorFeed>,
    options: AppOptions,

    // Home dashboard, polled for the whole session
    home: PollSource<Vec<SensorReading>>,
    pub dashboard: DashboardView,
    pub history: History,
    pub latest: Option<SensorReading>,
    pub last_updated: Option<Instant>,

    // Active detail screen
    screen: Option<Screen>,
    pub alerts: AlertsView,
    pub location: LocationView,
    pub sample: Option<CurrentSample>,
    pub assessment: AssessmentView,
    pub heat_history: HistoryView,

    /// Scroll offset of the active text body.
    pub scroll: u16,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and start polling the home dashboard.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(feed: Arc<dyn SensorFeed>, options: AppOptions) -> Self {
        Self::with_theme(feed, options, Theme::auto_detect())
    }

    /// Like [`App::new`] with an explicit theme.
    pub fn with_theme(feed: Arc<dyn SensorFeed>, options: AppOptions, theme: Theme) -> Self {
        let home = Self::readings_source(&feed, "dashboard", Cadence::Every(options.home_refresh));
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            feed,
            options,
            home,
            dashboard: DashboardView::loading(),
            history: History::new(),
            latest: None,
            last_updated: None,
            screen: None,
            alerts: AlertsView::Loading,
            location: LocationView::loading(),
            sample: None,
            assessment: AssessmentView::Pending,
            heat_history: HistoryView::Loading,
            scroll: 0,
            theme,
            status_message: None,
        }
    }

    fn readings_source(
        feed: &Arc<dyn SensorFeed>,
        label: &str,
        cadence: Cadence,
    ) -> PollSource<Vec<SensorReading>> {
        let feed = Arc::clone(feed);
        let (handle, rx) = spawn_poller(label, cadence, move || {
            let feed = Arc::clone(&feed);
            async move { feed.fetch_latest_readings(1).await }
        });
        PollSource::new(handle, rx)
    }

    fn open_screen(&self, view: View) -> Option<Screen> {
        let feed = Arc::clone(&self.feed);
        match view {
            View::Dashboard => None,
            View::Alerts => {
                let limit = self.options.alerts_limit;
                let (handle, rx) = spawn_poller("alerts", Cadence::OnDemand, move || {
                    let feed = Arc::clone(&feed);
                    async move { feed.fetch_alerts(limit).await }
                });
                Some(Screen::Alerts(PollSource::new(handle, rx)))
            }
            View::Location => Some(Screen::Location(Self::readings_source(
                &feed,
                "location",
                Cadence::OnDemand,
            ))),
            View::Health => Some(Screen::Health {
                readings: Self::readings_source(&feed, "health", Cadence::OnDemand),
                analysis: None,
            }),
            View::History => {
                let limit = self.options.heat_history_limit;
                let dog_name = self.options.dog_name.clone();
                let (handle, rx) = spawn_poller("history", Cadence::OnDemand, move || {
                    let feed = Arc::clone(&feed);
                    let dog_name = dog_name.clone();
                    async move { feed.fetch_heat_cycles(&dog_name, limit).await }
                });
                Some(Screen::History(PollSource::new(handle, rx)))
            }
        }
    }

    /// Returns a description of the feed.
    pub fn source_description(&self) -> String {
        self.feed.description()
    }

    /// The dog whose data is shown.
    pub fn dog_name(&self) -> &str {
        &self.options.dog_name
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain every poller and apply what arrived.
    ///
    /// Returns true if any view changed.
    pub fn update(&mut self) -> bool {
        let mut changed = false;

        if let Some(result) = self.home.poll() {
            self.dashboard = DashboardView::next(&self.dashboard, &result);
            if let Ok(readings) = &result {
                self.latest = readings.first().cloned();
                if let Some(reading) = readings.first() {
                    self.history.record(reading);
                }
            }
            self.last_updated = Some(Instant::now());
            changed = true;
        }

        let dog_name = self.options.dog_name.clone();
        match self.screen.as_mut() {
            Some(Screen::Alerts(source)) => {
                if let Some(result) = source.poll() {
                    self.alerts = AlertsView::from_result(&result);
                    changed = true;
                }
            }
            Some(Screen::Location(source)) => {
                if let Some(result) = source.poll() {
                    self.location = LocationView::next(&self.location, &result);
                    changed = true;
                }
            }
            Some(Screen::Health { readings, analysis }) => {
                if let Some(result) = readings.poll() {
                    if let Ok(latest) = result {
                        self.sample = latest
                            .first()
                            .map(|r| CurrentSample::from_reading(&dog_name, r));
                    }
                    changed = true;
                }
                if let Some(source) = analysis.as_mut() {
                    if let Some(result) = source.poll() {
                        self.assessment = AssessmentView::from_result(&result);
                        changed = true;
                    }
                }
            }
            Some(Screen::History(source)) => {
                if let Some(result) = source.poll() {
                    self.heat_history = HistoryView::from_result(&result);
                    changed = true;
                }
            }
            None => {}
        }

        changed
    }

    /// Whether the active view is waiting for a fetch.
    pub fn is_loading(&self) -> bool {
        match &self.screen {
            None => self.home.is_loading(),
            Some(Screen::Alerts(source)) => source.is_loading(),
            Some(Screen::Location(source)) => source.is_loading(),
            Some(Screen::Health { readings, analysis }) => {
                readings.is_loading() || analysis.as_ref().is_some_and(PollSource::is_loading)
            }
            Some(Screen::History(source)) => source.is_loading(),
        }
    }

    /// Whether a health analysis is in flight.
    pub fn is_analyzing(&self) -> bool {
        matches!(
            &self.screen,
            Some(Screen::Health { analysis: Some(source), .. }) if source.is_loading()
        )
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    ///
    /// Leaving a detail view tears down its pollers; entering one starts a
    /// fresh fetch with a blank snapshot.
    pub fn set_view(&mut self, view: View) {
        if view == self.current_view {
            return;
        }
        self.screen = None;
        self.current_view = view;
        self.scroll = 0;

        match view {
            View::Dashboard => {}
            View::Alerts => self.alerts = AlertsView::Loading,
            View::Location => self.location = LocationView::loading(),
            View::Health => {
                self.sample = None;
                self.assessment = AssessmentView::Pending;
            }
            View::History => self.heat_history = HistoryView::Loading,
        }
        self.screen = self.open_screen(view);
    }

    /// Manual refresh of the active view.
    ///
    /// A refresh while a fetch is in flight is absorbed by that fetch.
    pub fn refresh(&mut self) {
        match self.screen.as_mut() {
            None => self.home.refresh(),
            Some(Screen::Alerts(source)) => source.refresh(),
            Some(Screen::Location(source)) => source.refresh(),
            Some(Screen::Health { readings, .. }) => readings.refresh(),
            Some(Screen::History(source)) => source.refresh(),
        }
    }

    /// Submit the current sample for analysis.
    ///
    /// A new analysis supersedes any one still in flight.
    pub fn analyze(&mut self) {
        let Some(Screen::Health { analysis, .. }) = self.screen.as_mut() else {
            return;
        };
        let Some(sample) = self.sample.as_ref() else {
            self.set_status_message("No current reading to analyze".to_string());
            return;
        };

        let request = sample.request();
        let feed = Arc::clone(&self.feed);
        let (handle, rx) = spawn_poller("health-check", Cadence::OnDemand, move || {
            let feed = Arc::clone(&feed);
            let request = request.clone();
            async move { feed.submit_health_check(&request).await }
        });
        *analysis = Some(PollSource::new(handle, rx));
    }

    /// Scroll the active text body down.
    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n);
    }

    /// Scroll the active text body up.
    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the latest reading and the alerts on screen to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.latest.is_none() {
            anyhow::bail!("No data to export");
        }
        let alerts = match &self.alerts {
            AlertsView::Loaded { alerts, .. } => alerts.as_slice(),
            _ => &[],
        };
        let doc = export_document(self.latest.as_ref(), alerts);
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use caninewatch_client::FeedError;
    use caninewatch_types::{
        ApiHealth, DogProfile, FertilityPrediction, FertilityRequest, HealthCheckRequest,
    };
    use serde_json::json;

    #[derive(Debug)]
    struct StubFeed;

    #[async_trait]
    impl SensorFeed for StubFeed {
        fn description(&self) -> String {
            "stub".to_string()
        }

        async fn fetch_latest_readings(&self, _limit: u32) -> Result<Vec<SensorReading>, FeedError> {
            Ok(vec![SensorReading {
                dog_name: "Max".to_string(),
                temperature: 39.8,
                activity_percent: 15,
                timestamp: "2025-10-21T18:30:15".to_string(),
                ..Default::default()
            }])
        }

        async fn fetch_alerts(&self, _limit: u32) -> Result<AlertBatch, FeedError> {
            Ok(AlertBatch {
                records: vec![
                    json!({"health_status": "Fever Detected", "severity": "high"}),
                    serde_json::Value::Null,
                ],
                count: 2,
            })
        }

        async fn submit_health_check(
            &self,
            request: &HealthCheckRequest,
        ) -> Result<HealthAssessment, FeedError> {
            Ok(HealthAssessment {
                dog_name: request.dog_name.clone(),
                temperature: request.temperature,
                activity_percent: request.activity_percent,
                health_status: "Fever Detected".to_string(),
                severity: "high".into(),
                ..Default::default()
            })
        }

        async fn submit_fertility_prediction(
            &self,
            _request: &FertilityRequest,
        ) -> Result<FertilityPrediction, FeedError> {
            Err(FeedError::Unsupported("stub".to_string()))
        }

        async fn fetch_heat_cycles(
            &self,
            _dog_name: &str,
            _limit: u32,
        ) -> Result<HeatCycleHistory, FeedError> {
            Ok(HeatCycleHistory::default())
        }

        async fn fetch_profile(&self, _name: &str) -> Result<DogProfile, FeedError> {
            Err(FeedError::Unsupported("stub".to_string()))
        }

        async fn save_profile(&self, _profile: &DogProfile) -> Result<DogProfile, FeedError> {
            Err(FeedError::Unsupported("stub".to_string()))
        }

        async fn fetch_breeds(&self) -> Result<Vec<String>, FeedError> {
            Ok(Vec::new())
        }

        async fn api_health(&self) -> Result<ApiHealth, FeedError> {
            Ok(ApiHealth::default())
        }
    }

    fn options() -> AppOptions {
        AppOptions {
            home_refresh: Duration::from_secs(10),
            alerts_limit: 10,
            heat_history_limit: 20,
            dog_name: "Max".to_string(),
        }
    }

    fn app() -> App {
        App::with_theme(Arc::new(StubFeed), options(), Theme::dark())
    }

    async fn settle(app: &mut App) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(1)).await;
            app.update();
        }
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Alerts);
        assert_eq!(View::History.next(), View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::History);
        for view in View::ALL {
            assert_eq!(View::ALL[view.index()], view);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard_receives_reading() {
        let mut app = app();
        settle(&mut app).await;

        assert_eq!(app.dashboard.temperature, "39.8°C");
        assert_eq!(app.history.len(), 1);
        assert!(app.latest.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_alerts_tab_skips_malformed() {
        let mut app = app();
        app.set_view(View::Alerts);
        assert_eq!(app.alerts, AlertsView::Loading);
        settle(&mut app).await;

        assert_eq!(
            app.alerts.summary().as_deref(),
            Some("2 alerts loaded (1 unreadable skipped)")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_analysis() {
        let mut app = app();
        app.set_view(View::Health);
        settle(&mut app).await;
        assert_eq!(app.sample.as_ref().map(|s| s.activity_percent), Some(15));

        app.analyze();
        assert!(app.is_analyzing());
        settle(&mut app).await;
        assert!(!app.is_analyzing());
        assert!(matches!(app.assessment, AssessmentView::Ready { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_history_is_no_data() {
        let mut app = app();
        app.set_view(View::History);
        settle(&mut app).await;
        assert_eq!(app.heat_history, HistoryView::NoData { note: None });
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_tab_resets_scroll() {
        let mut app = app();
        app.set_view(View::Alerts);
        app.scroll_down(5);
        app.set_view(View::Location);
        assert_eq!(app.scroll, 0);
        assert_eq!(app.location, LocationView::loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_state() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        assert!(app.export_state(&path).is_err());

        settle(&mut app).await;
        app.export_state(&path).unwrap();
        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["reading"]["dog_name"], "Max");
    }
}
