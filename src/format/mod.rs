//! Presentation formatting.
//!
//! Pure functions from fetched data to the text a screen shows. Every
//! function here is deterministic: the same input always renders the same
//! bytes, which is what the tests in this module pin down.
//!
//! Each fetch-backed view distinguishes "nothing to show" from a failure.
//! An empty answer renders its own message (e.g. [`alerts::NO_ALERTS`]) and
//! failures render as `Error: ...`.

pub mod alerts;
pub mod dashboard;
pub mod export;
pub mod fertility;
pub mod health;
pub mod profile;
pub mod timestamp;

pub use alerts::{format_alert, format_alerts, severity_marker, AlertsView, NO_ALERTS};
pub use dashboard::{DashboardView, LocationView};
pub use export::export_document;
pub use fertility::{prediction_text, HeatCycleRow, HistoryView, NO_HISTORY};
pub use health::{AssessmentView, CurrentSample};
pub use profile::{breeds_or_default, default_breeds, DEFAULT_BREEDS};
pub use timestamp::{format_date, format_timestamp};

use caninewatch_client::FeedError;

/// Overall tone of a status line, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Warning,
    Danger,
}

/// How a failure is shown. Timeouts read the same as unreachable hosts.
pub fn failure_text(err: &FeedError) -> String {
    format!("Error: {}", err)
}
