//! Health check views.

use std::fmt::Write;

use caninewatch_client::FeedError;
use caninewatch_types::{HealthAssessment, HealthCheckRequest, SensorReading, Severity};

use super::failure_text;
use crate::data::thresholds::{classify, effective_severity, SeverityBasis};

/// The sample the health screen would submit for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSample {
    pub dog_name: String,
    pub temperature: f64,
    pub activity_percent: i32,
}

impl CurrentSample {
    pub fn from_reading(dog_name: &str, reading: &SensorReading) -> Self {
        Self {
            dog_name: dog_name.to_string(),
            temperature: reading.temperature,
            activity_percent: reading.activity_percent,
        }
    }

    pub fn temperature_text(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    pub fn activity_text(&self) -> String {
        format!("{}%", self.activity_percent)
    }

    pub fn request(&self) -> HealthCheckRequest {
        HealthCheckRequest {
            dog_name: self.dog_name.clone(),
            temperature: self.temperature,
            activity_percent: self.activity_percent,
        }
    }
}

/// Rendered result of a health check.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentView {
    /// No analysis requested yet.
    Pending,
    Ready {
        status: String,
        severity: String,
        basis: SeverityBasis,
        findings: Vec<String>,
        recommendations: String,
    },
    Failed(String),
}

impl AssessmentView {
    pub fn from_result(result: &Result<HealthAssessment, FeedError>) -> Self {
        match result {
            Ok(assessment) => Self::from_assessment(assessment),
            Err(err) => AssessmentView::Failed(failure_text(err)),
        }
    }

    pub fn from_assessment(assessment: &HealthAssessment) -> Self {
        let local = classify(assessment.temperature, assessment.activity_percent);
        let server = assessment.severity.tier();

        AssessmentView::Ready {
            status: format!("Status: {}", assessment.health_status),
            severity: format!("Severity: {}", assessment.severity.as_str().to_uppercase()),
            basis: effective_severity(server, &local),
            findings: assessment.findings.clone(),
            recommendations: recommendations_text(&assessment.recommendations),
        }
    }

    /// Severity used for colour, preferring the server's classification.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            AssessmentView::Ready { basis, .. } => Some(basis.severity()),
            _ => None,
        }
    }
}

/// `Recommendations:` header followed by one bullet per entry.
pub fn recommendations_text(recommendations: &[String]) -> String {
    let mut out = String::from("Recommendations:\n\n");
    for recommendation in recommendations {
        let _ = writeln!(out, "• {}", recommendation);
    }
    out
}
