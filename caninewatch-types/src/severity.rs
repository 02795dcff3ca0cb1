//! Severity tiers shared by alerts, health assessments and predictions.

use core::fmt;
use core::str::FromStr;

/// Urgency of a health or alert record.
///
/// Ordered from least to most urgent so that `max()` picks the worst tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All tiers, least urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Upper-case label used in rendered text ("LOW", "CRITICAL", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Parse a server-supplied value, folding case and ignoring surrounding
    /// whitespace. Anything outside the four known names yields `None`.
    pub fn parse_lenient(value: &str) -> Option<Severity> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the four severity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::parse_lenient(s).ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

/// A severity exactly as the server sent it, with its parsed tier.
///
/// The raw text is what gets shown; `tier` is `None` when the text is not
/// one of the four known names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerSeverity {
    raw: String,
    tier: Option<Severity>,
}

impl ServerSeverity {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tier = Severity::parse_lenient(&raw);
        Self { raw, tier }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tier(&self) -> Option<Severity> {
        self.tier
    }
}

impl From<&str> for ServerSeverity {
    fn from(raw: &str) -> Self {
        ServerSeverity::new(raw)
    }
}

impl From<String> for ServerSeverity {
    fn from(raw: String) -> Self {
        ServerSeverity::new(raw)
    }
}

impl fmt::Display for ServerSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ServerSeverity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ServerSeverity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <String as serde::Deserialize>::deserialize(deserializer).map(ServerSeverity::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folds_case() {
        assert_eq!(Severity::parse_lenient("Critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse_lenient("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse_lenient(" medium "), Some(Severity::Medium));
        assert_eq!(Severity::parse_lenient("low"), Some(Severity::Low));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Severity::parse_lenient("none"), None);
        assert_eq!(Severity::parse_lenient(""), None);
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn test_ordering_puts_critical_last() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn test_server_severity_keeps_raw_text() {
        let severity = ServerSeverity::from("Critical");
        assert_eq!(severity.as_str(), "Critical");
        assert_eq!(severity.tier(), Some(Severity::Critical));

        let unknown = ServerSeverity::from("moderate");
        assert_eq!(unknown.to_string(), "moderate");
        assert_eq!(unknown.tier(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::Critical.label(), "CRITICAL");
        assert_eq!(Severity::Low.to_string(), "LOW");
        assert_eq!(Severity::Medium.as_str(), "medium");
    }
}
