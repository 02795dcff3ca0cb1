//! Health check requests and the server's assessment.

use crate::{ServerSeverity, Severity};

/// Body of a `health-check` request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthCheckRequest {
    pub dog_name: String,
    pub temperature: f64,
    pub activity_percent: i32,
}

/// Server-side classification of one temperature/activity sample.
///
/// `health_status` and `severity` must be present on the wire; the rest
/// default when missing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthAssessment {
    #[cfg_attr(feature = "serde", serde(default))]
    pub dog_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub temperature: f64,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::whole_percent")
    )]
    pub activity_percent: i32,
    pub health_status: String,
    pub severity: ServerSeverity,
    /// Findings behind the status, e.g. "Low activity: 12% (Possible lethargy)".
    #[cfg_attr(feature = "serde", serde(default, rename = "alerts"))]
    pub findings: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recommendations: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: String,
}

impl HealthAssessment {
    /// The parsed severity tier, falling back to `Low` when unrecognized.
    pub fn severity_tier(&self) -> Severity {
        self.severity.tier().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tier_falls_back_to_low() {
        let mut assessment = HealthAssessment {
            severity: "Critical".into(),
            ..Default::default()
        };
        assert_eq!(assessment.severity_tier(), Severity::Critical);

        assessment.severity = "unknown".into();
        assert_eq!(assessment.severity_tier(), Severity::Low);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_assessment() {
        let json = r#"{
            "dog_name": "Max",
            "temperature": 40.1,
            "activity_percent": 5.0,
            "health_status": "Critical: Fever + Lethargy",
            "alerts": ["CRITICAL: Temperature 40.1°C (Normal: 38-39.2°C)"],
            "severity": "critical",
            "recommendations": ["Keep dog hydrated and cool"],
            "timestamp": "2025-10-21T18:30:15.123456"
        }"#;

        let assessment: HealthAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.activity_percent, 5);
        assert_eq!(assessment.findings.len(), 1);
        assert_eq!(assessment.severity_tier(), Severity::Critical);
        assert_eq!(assessment.severity.as_str(), "critical");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_assessment_without_status_is_rejected() {
        assert!(serde_json::from_str::<HealthAssessment>("{}").is_err());
        assert!(serde_json::from_str::<HealthAssessment>(
            r#"{"health_status": "Normal", "temperature": 38.5}"#
        )
        .is_err());

        let minimal: HealthAssessment =
            serde_json::from_str(r#"{"health_status": "Normal", "severity": "low"}"#).unwrap();
        assert_eq!(minimal.severity.tier(), Some(Severity::Low));
        assert!(minimal.findings.is_empty());
    }
}
