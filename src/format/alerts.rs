//! Alert list rendering.

use std::fmt::Write;

use caninewatch_client::{AlertBatch, FeedError};
use caninewatch_types::{Alert, Severity};

use super::timestamp::format_timestamp;
use crate::data::alerts::{aggregate, AlertSet};

/// Shown when the feed has no alerts.
pub const NO_ALERTS: &str = "No alerts available";

/// Urgency marker for a severity.
pub fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🚨",
        Severity::High => "⚠️",
        Severity::Medium => "⚡",
        Severity::Low => "ℹ️",
    }
}

/// Render one alert as a text block. `position` is 1-based.
///
/// Optional lines appear only when they carry information: measurements
/// only when positive, emergencies and messages only when non-empty, and
/// the time only when the record had one. Emergencies always come before
/// plain messages.
pub fn format_alert(position: usize, alert: &Alert) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} {}. {}",
        severity_marker(alert.severity),
        position,
        alert.title
    );
    let _ = writeln!(out, "   Level: {}", alert.severity.label());

    if let Some(temperature) = alert.temperature.filter(|t| *t > 0.0) {
        let _ = writeln!(out, "   Temperature: {:.1}°C", temperature);
    }
    if let Some(activity) = alert.activity_percent.filter(|a| *a > 0.0) {
        let _ = writeln!(out, "   Activity: {:.0}%", activity.round());
    }
    if let Some(seconds) = alert.immobile_duration_seconds.filter(|s| *s > 0) {
        let _ = writeln!(out, "   Immobile: {} minutes", seconds / 60);
    }

    if !alert.emergencies.is_empty() {
        out.push_str("   \n   🚨 EMERGENCIES:\n");
        for emergency in &alert.emergencies {
            out.push_str("   ━━━━━━━━━━━━━━━━\n");
            let _ = writeln!(out, "   Type: {}", emergency.kind);
            let _ = writeln!(out, "   ⚠️ {}", emergency.message);
            let _ = writeln!(out, "   ➤ {}", emergency.action);
        }
    }

    if !alert.messages.is_empty() {
        out.push_str("   \n   Details:\n");
        for message in &alert.messages {
            let _ = writeln!(out, "   • {}", message);
        }
    }

    if let Some(timestamp) = &alert.timestamp {
        let _ = writeln!(out, "   Time: {}", format_timestamp(timestamp));
    }

    out.push('\n');
    out
}

/// Render a list of alerts, numbered from 1 in the given order.
pub fn format_alerts(alerts: &[Alert]) -> String {
    alerts
        .iter()
        .enumerate()
        .map(|(i, alert)| format_alert(i + 1, alert))
        .collect()
}

/// What the alerts screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertsView {
    Loading,
    /// A well-formed but empty answer. Not an error.
    NoData,
    Loaded {
        alerts: Vec<Alert>,
        /// The server's count.
        count: u32,
        /// Records left out as malformed.
        skipped: usize,
    },
    Failed(FeedError),
}

impl AlertsView {
    /// Build the view from one fetch.
    pub fn from_result(result: &Result<AlertBatch, FeedError>) -> Self {
        match result {
            Ok(batch) => {
                let AlertSet { alerts, skipped } = aggregate(&batch.records);
                if alerts.is_empty() {
                    AlertsView::NoData
                } else {
                    AlertsView::Loaded {
                        alerts,
                        count: batch.count,
                        skipped,
                    }
                }
            }
            Err(err) => AlertsView::Failed(err.clone()),
        }
    }

    /// The full text body.
    pub fn text(&self) -> String {
        match self {
            AlertsView::Loading => "Loading alerts...".to_string(),
            AlertsView::NoData => NO_ALERTS.to_string(),
            AlertsView::Loaded { alerts, .. } => format_alerts(alerts),
            AlertsView::Failed(err) => super::failure_text(err),
        }
    }

    /// One-line status, e.g. "3 alerts loaded".
    pub fn summary(&self) -> Option<String> {
        match self {
            AlertsView::Loaded { count, skipped, .. } if *skipped > 0 => Some(format!(
                "{} alerts loaded ({} unreadable skipped)",
                count, skipped
            )),
            AlertsView::Loaded { count, .. } => Some(format!("{} alerts loaded", count)),
            _ => None,
        }
    }

    /// The most urgent severity on screen.
    pub fn worst(&self) -> Option<Severity> {
        match self {
            AlertsView::Loaded { alerts, .. } => alerts.iter().map(|a| a.severity).max(),
            _ => None,
        }
    }
}
