//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use caninewatch_types::Severity;

use crate::data::thresholds::TemperatureBand;
use crate::format::{fertility::AlertLevelCue, Tone};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for medium severity and warnings.
    pub warning: Color,
    /// Color for high severity.
    pub urgent: Color,
    /// Color for critical severity and failures.
    pub critical: Color,
    /// Color for normal readings.
    pub healthy: Color,
    /// Color for hypothermia cues.
    pub cold: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headers.
    pub header: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            urgent: Color::LightRed,
            critical: Color::Red,
            healthy: Color::Green,
            cold: Color::LightBlue,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            urgent: Color::Magenta,
            critical: Color::Red,
            healthy: Color::Green,
            cold: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a severity tier
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Low => Style::default().fg(self.healthy),
            Severity::Medium => Style::default().fg(self.warning),
            Severity::High => Style::default().fg(self.urgent),
            Severity::Critical => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for a status line tone
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Normal => Style::default().fg(self.healthy),
            Tone::Warning => Style::default().fg(self.warning),
            Tone::Danger => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for a temperature reading
    pub fn temperature_style(&self, band: Option<TemperatureBand>) -> Style {
        match band {
            Some(TemperatureBand::Fever) => Style::default().fg(self.critical),
            Some(TemperatureBand::Hypothermia) => Style::default().fg(self.cold),
            Some(TemperatureBand::Normal) => Style::default().fg(self.healthy),
            None => Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Get style for a stored prediction's alert level
    pub fn alert_level_style(&self, cue: AlertLevelCue) -> Style {
        match cue {
            AlertLevelCue::High => Style::default().fg(self.critical),
            AlertLevelCue::Medium => Style::default().fg(self.warning),
            AlertLevelCue::Low => Style::default().fg(self.healthy),
            AlertLevelCue::Unknown => Style::default().add_modifier(Modifier::DIM),
        }
    }
}
