//! Fertility prediction and heat-cycle history views.

use caninewatch_client::FeedError;
use caninewatch_types::{FertilityPrediction, HeatCycle, HeatCycleHistory};

use super::failure_text;
use super::timestamp::format_date;

/// Shown when a dog has no stored predictions.
pub const NO_HISTORY: &str = "No heat cycle history found.\nMake predictions to build history.";

/// Render a number with at least one decimal place (`45.0`, `12.5`).
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// The prediction result block.
pub fn prediction_text(prediction: &FertilityPrediction) -> String {
    format!(
        "🔬 Prediction Results\n\n\
         Prediction Type: {}\n\n\
         Predicted: {} {}\n\n\
         Estimated Date: {}\n\n\
         Fertility Status: {}\n\n\
         Alert Level: {}",
        prediction.prediction_type,
        decimal(prediction.prediction_value),
        prediction.prediction_unit,
        prediction.estimated_date,
        prediction.fertility_status,
        prediction.alert_level.to_uppercase(),
    )
}

/// Render a prediction result or its failure.
pub fn prediction_result_text(result: &Result<FertilityPrediction, FeedError>) -> String {
    match result {
        Ok(prediction) => prediction_text(prediction),
        Err(err) => failure_text(err),
    }
}

/// Colour cue for a stored prediction's alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevelCue {
    High,
    Medium,
    Low,
    /// No alert level recorded.
    Unknown,
}

impl AlertLevelCue {
    pub fn from_level(level: Option<&str>) -> Self {
        match level.map(|l| l.trim().to_lowercase()) {
            None => AlertLevelCue::Unknown,
            Some(l) if l == "high" => AlertLevelCue::High,
            Some(l) if l == "medium" => AlertLevelCue::Medium,
            Some(_) => AlertLevelCue::Low,
        }
    }
}

/// One row of the heat-cycle history.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCycleRow {
    pub prediction_type: String,
    pub value: String,
    pub estimated_date: String,
    pub fertility_status: String,
    pub recorded: String,
    pub cue: AlertLevelCue,
}

impl HeatCycleRow {
    pub fn from_cycle(cycle: &HeatCycle) -> Self {
        Self {
            prediction_type: cycle.prediction_type.clone(),
            value: format!("{:.1} {}", cycle.prediction_value, cycle.prediction_unit),
            estimated_date: format!("Est. Date: {}", format_date(cycle.estimated_date.as_deref())),
            fertility_status: cycle.fertility_status.clone(),
            recorded: format!("Recorded: {}", format_date(cycle.created_at.as_deref())),
            cue: AlertLevelCue::from_level(cycle.alert_level.as_deref()),
        }
    }
}

/// What the history screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Loading,
    /// Nothing stored. `note` carries a storage problem the server reported.
    NoData { note: Option<String> },
    Rows(Vec<HeatCycleRow>),
    Failed(String),
}

impl HistoryView {
    pub fn from_result(result: &Result<HeatCycleHistory, FeedError>) -> Self {
        match result {
            Ok(history) if history.cycles.is_empty() => HistoryView::NoData {
                note: history.error.clone(),
            },
            Ok(history) => HistoryView::Rows(
                history.cycles.iter().map(HeatCycleRow::from_cycle).collect(),
            ),
            Err(err) => HistoryView::Failed(failure_text(err)),
        }
    }

    /// Text for the non-row states.
    pub fn message(&self) -> Option<String> {
        match self {
            HistoryView::Loading => Some("Loading history...".to_string()),
            HistoryView::NoData { .. } => Some(NO_HISTORY.to_string()),
            HistoryView::Failed(text) => Some(text.clone()),
            HistoryView::Rows(_) => None,
        }
    }
}
