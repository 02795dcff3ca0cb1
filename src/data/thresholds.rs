//! Local threshold classification of temperature and activity.
//!
//! The classifier gives the presentation layer an immediate, offline
//! urgency cue. It never replaces a severity the server supplied; see
//! [`effective_severity`].

use caninewatch_types::Severity;

/// Lower bound of the normal canine temperature range, °C.
pub const TEMP_NORMAL_MIN: f64 = 38.0;
/// Upper bound of the normal canine temperature range, °C.
pub const TEMP_NORMAL_MAX: f64 = 39.2;
/// At or above this is a fever, °C.
pub const TEMP_FEVER: f64 = 39.5;
/// At or below this is hypothermia, °C.
pub const TEMP_HYPOTHERMIA: f64 = 37.5;
/// At or above this the fever is critical, °C.
pub const TEMP_CRITICAL_HIGH: f64 = 40.0;
/// At or below this the hypothermia is critical, °C.
pub const TEMP_CRITICAL_LOW: f64 = 37.0;
/// At or below this activity is low (possible lethargy), percent.
pub const ACTIVITY_LOW: i32 = 20;
/// At or above this activity is high (possible distress), percent.
pub const ACTIVITY_HIGH: i32 = 80;

/// Coarse temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Hypothermia,
    Normal,
    Fever,
}

impl TemperatureBand {
    /// Short label used for colour cues.
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBand::Hypothermia => "Hypothermia",
            TemperatureBand::Normal => "Normal",
            TemperatureBand::Fever => "Fever",
        }
    }
}

/// Critical temperature band, overlapping fever or hypothermia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalBand {
    Low,
    High,
}

/// Activity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBand {
    Low,
    Normal,
    High,
}

/// One condition a reading satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TierFlag {
    CriticalHigh,
    CriticalLow,
    Fever,
    Hypothermia,
    LowActivity,
    HighActivity,
}

impl TierFlag {
    pub fn label(&self) -> &'static str {
        match self {
            TierFlag::CriticalHigh => "CRITICAL_HIGH",
            TierFlag::CriticalLow => "CRITICAL_LOW",
            TierFlag::Fever => "FEVER",
            TierFlag::Hypothermia => "HYPOTHERMIA",
            TierFlag::LowActivity => "LOW_ACTIVITY",
            TierFlag::HighActivity => "HIGH_ACTIVITY",
        }
    }
}

/// Result of classifying one temperature/activity pair.
///
/// Temperature and activity are classified independently, so a single
/// reading can be feverish, critically hot and lethargic at once. All of
/// those conditions are kept; none overrides another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTier {
    pub temperature: TemperatureBand,
    pub critical: Option<CriticalBand>,
    /// Whether the temperature lies within 38.0..=39.2.
    pub in_reference_range: bool,
    pub activity: ActivityBand,
}

/// Classify a reading against the fixed thresholds.
///
/// Boundaries are inclusive and values are compared as given, without
/// rounding.
pub fn classify(temperature: f64, activity_percent: i32) -> LocalTier {
    let band = if temperature >= TEMP_FEVER {
        TemperatureBand::Fever
    } else if temperature <= TEMP_HYPOTHERMIA {
        TemperatureBand::Hypothermia
    } else {
        TemperatureBand::Normal
    };

    let critical = if temperature >= TEMP_CRITICAL_HIGH {
        Some(CriticalBand::High)
    } else if temperature <= TEMP_CRITICAL_LOW {
        Some(CriticalBand::Low)
    } else {
        None
    };

    let activity = if activity_percent <= ACTIVITY_LOW {
        ActivityBand::Low
    } else if activity_percent >= ACTIVITY_HIGH {
        ActivityBand::High
    } else {
        ActivityBand::Normal
    };

    LocalTier {
        temperature: band,
        critical,
        in_reference_range: (TEMP_NORMAL_MIN..=TEMP_NORMAL_MAX).contains(&temperature),
        activity,
    }
}

impl LocalTier {
    /// Every condition this reading satisfies, most urgent first.
    pub fn flags(&self) -> Vec<TierFlag> {
        let mut flags = Vec::new();
        match self.critical {
            Some(CriticalBand::High) => flags.push(TierFlag::CriticalHigh),
            Some(CriticalBand::Low) => flags.push(TierFlag::CriticalLow),
            None => {}
        }
        match self.temperature {
            TemperatureBand::Fever => flags.push(TierFlag::Fever),
            TemperatureBand::Hypothermia => flags.push(TierFlag::Hypothermia),
            TemperatureBand::Normal => {}
        }
        match self.activity {
            ActivityBand::Low => flags.push(TierFlag::LowActivity),
            ActivityBand::High => flags.push(TierFlag::HighActivity),
            ActivityBand::Normal => {}
        }
        flags
    }

    /// Whether nothing abnormal was found.
    pub fn is_normal(&self) -> bool {
        self.flags().is_empty()
    }

    /// Collapse the flags into a single urgency tier.
    pub fn urgency(&self) -> Severity {
        if self.critical.is_some() {
            Severity::Critical
        } else if self.temperature != TemperatureBand::Normal {
            Severity::High
        } else if self.activity != ActivityBand::Normal {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Where a displayed severity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBasis {
    /// Classified by the server.
    Server(Severity),
    /// Derived locally from thresholds because the server gave nothing.
    Local(Severity),
}

impl SeverityBasis {
    pub fn severity(&self) -> Severity {
        match self {
            SeverityBasis::Server(s) | SeverityBasis::Local(s) => *s,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, SeverityBasis::Local(_))
    }
}

/// Combine a server severity with a local tier.
///
/// The server's value always wins when present, even when the local tier
/// disagrees. The local urgency only fills the gap.
pub fn effective_severity(server: Option<Severity>, local: &LocalTier) -> SeverityBasis {
    match server {
        Some(severity) => SeverityBasis::Server(severity),
        None => SeverityBasis::Local(local.urgency()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fever_at_and_above_threshold() {
        for t in [39.5, 39.6, 39.99, 40.0, 41.5] {
            assert_eq!(classify(t, 50).temperature, TemperatureBand::Fever, "{}", t);
        }
        assert_eq!(classify(39.49, 50).temperature, TemperatureBand::Normal);
    }

    #[test]
    fn test_hypothermia_at_and_below_threshold() {
        for t in [37.5, 37.2, 37.0, 35.0] {
            assert_eq!(classify(t, 50).temperature, TemperatureBand::Hypothermia, "{}", t);
        }
        assert_eq!(classify(37.51, 50).temperature, TemperatureBand::Normal);
    }

    #[test]
    fn test_normal_between_bands() {
        let tier = classify(38.6, 50);
        assert_eq!(tier.temperature, TemperatureBand::Normal);
        assert!(tier.critical.is_none());
        assert!(tier.in_reference_range);
        assert!(tier.is_normal());
        assert_eq!(tier.urgency(), Severity::Low);

        // Above the reference range but below fever is still the normal band.
        let tier = classify(39.3, 50);
        assert_eq!(tier.temperature, TemperatureBand::Normal);
        assert!(!tier.in_reference_range);
    }

    #[test]
    fn test_critical_bands() {
        assert_eq!(classify(40.0, 50).critical, Some(CriticalBand::High));
        assert_eq!(classify(39.9, 50).critical, None);
        assert_eq!(classify(37.0, 50).critical, Some(CriticalBand::Low));
        assert_eq!(classify(37.1, 50).critical, None);
    }

    #[test]
    fn test_activity_bands() {
        assert_eq!(classify(38.5, 20).activity, ActivityBand::Low);
        assert_eq!(classify(38.5, 21).activity, ActivityBand::Normal);
        assert_eq!(classify(38.5, 79).activity, ActivityBand::Normal);
        assert_eq!(classify(38.5, 80).activity, ActivityBand::High);
    }

    #[test]
    fn test_critical_fever_with_lethargy_keeps_all_flags() {
        let tier = classify(40.1, 5);
        assert_eq!(
            tier.flags(),
            vec![TierFlag::CriticalHigh, TierFlag::Fever, TierFlag::LowActivity]
        );
        assert_eq!(tier.urgency(), Severity::Critical);
    }

    #[test]
    fn test_urgency_ordering() {
        assert_eq!(classify(39.6, 50).urgency(), Severity::High);
        assert_eq!(classify(37.4, 50).urgency(), Severity::High);
        assert_eq!(classify(38.5, 90).urgency(), Severity::Medium);
        assert_eq!(classify(36.5, 90).urgency(), Severity::Critical);
    }

    #[test]
    fn test_server_severity_wins() {
        let tier = classify(40.5, 5);
        assert_eq!(
            effective_severity(Some(Severity::Low), &tier),
            SeverityBasis::Server(Severity::Low)
        );

        let basis = effective_severity(None, &tier);
        assert_eq!(basis, SeverityBasis::Local(Severity::Critical));
        assert!(basis.is_local());
        assert_eq!(basis.severity(), Severity::Critical);
    }
}
