//! # caninewatch
//!
//! A terminal monitor and library for collar-based canine health telemetry.
//!
//! The crate polls a monitoring backend for sensor readings and alerts,
//! classifies readings against fixed temperature and activity thresholds,
//! resolves alert records into a single severity each, and renders the
//! results as stable text for an interactive terminal UI or one-shot
//! commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │  app    │───▶│  format  │───▶│    ui    │───▶│ Terminal│  │
//! │  │ (state) │    │ (views)  │    │(rendering)    │         │  │
//! │  └────┬────┘    └────┬─────┘    └──────────┘    └─────────┘  │
//! │       │              │                                       │
//! │       ▼              ▼                                       │
//! │  ┌─────────┐    ┌──────────┐                                 │
//! │  │ source  │    │   data   │  thresholds, alerts, history    │
//! │  │ + poll  │    └──────────┘                                 │
//! │  └────┬────┘                                                 │
//! │       ▼                                                      │
//! │  SensorFeed ◀── HttpFeed | FixtureFeed                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: Threshold classification, alert resolution and severity
//!   precedence, reading history, fertility request preparation
//! - **[`poll`]**: The refresh state machine and the tokio task that drives it
//! - **[`source`]**: Non-blocking screen-side pollers and the JSON fixture feed
//! - **[`format`]**: View models and the text each screen shows
//! - **[`app`]**, **[`events`]**, **[`ui`]**: The terminal front end
//! - **[`settings`]**, **[`logging`]**: Configuration and tracing setup
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard against a local backend
//! caninewatch --url http://127.0.0.1:5000/api/ --dog Max
//!
//! # Print the latest alerts
//! caninewatch alerts --limit 5
//!
//! # Work offline from a fixture file
//! caninewatch --file fixture.json status
//! ```
//!
//! ### As a library
//!
//! ```
//! use caninewatch::data::{aggregate, classify, TierFlag};
//! use caninewatch::format::{format_alerts, format_timestamp};
//! use serde_json::json;
//!
//! let tier = classify(40.1, 5);
//! assert_eq!(
//!     tier.flags(),
//!     vec![TierFlag::CriticalHigh, TierFlag::Fever, TierFlag::LowActivity]
//! );
//!
//! let set = aggregate(&[
//!     json!({"health_status": "Fever Detected", "emergency_level": "Critical", "severity": "low"}),
//!     json!(null),
//! ]);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.skipped, 1);
//! assert!(format_alerts(&set.alerts).starts_with("🚨 1. Fever Detected"));
//!
//! assert_eq!(format_timestamp("2025-10-21T18:30:15.123456"), "21 Oct 2025, 18:30");
//! ```
//!
//! ### Polling a feed
//!
//! ```no_run
//! use caninewatch::poll::{spawn_poller, Cadence};
//! use caninewatch::source::PollSource;
//! use caninewatch_client::{HttpFeed, SensorFeed};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let feed = Arc::new(HttpFeed::builder().build().unwrap());
//! let (handle, rx) = spawn_poller("dashboard", Cadence::Every(Duration::from_secs(10)), move || {
//!     let feed = Arc::clone(&feed);
//!     async move { feed.fetch_latest_readings(1).await }
//! });
//! let mut source = PollSource::new(handle, rx);
//!
//! // Called once per frame; never waits on the network
//! if let Some(Ok(readings)) = source.poll() {
//!     println!("{} readings", readings.len());
//! }
//! # });
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod format;
pub mod logging;
pub mod poll;
pub mod settings;
pub mod source;
pub mod ui;

pub use app::{App, AppOptions, View};
pub use data::{aggregate, classify, effective_severity, AlertSet, History, LocalTier};
pub use settings::Settings;
pub use source::{FixtureFeed, PollSource};
