//! Alerts view rendering.
//!
//! Each alert is drawn from its formatted text block with the header line
//! coloured by severity.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::format::{format_alert, AlertsView, Tone};
use crate::ui::common::panel;

/// Render the Alerts view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match &app.alerts {
        AlertsView::Loaded { alerts, .. } => alerts
            .iter()
            .enumerate()
            .flat_map(|(i, alert)| {
                let style = app.theme.severity_style(alert.severity);
                format_alert(i + 1, alert)
                    .lines()
                    .enumerate()
                    .map(|(n, line)| {
                        if n == 0 {
                            Line::from(Span::styled(
                                line.to_string(),
                                style.add_modifier(Modifier::BOLD),
                            ))
                        } else {
                            Line::from(line.to_string())
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
        AlertsView::Failed(_) => vec![Line::from(Span::styled(
            app.alerts.text(),
            app.theme.tone_style(Tone::Danger),
        ))],
        AlertsView::Loading | AlertsView::NoData => vec![Line::from(Span::styled(
            app.alerts.text(),
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };

    let title = match app.alerts.summary() {
        Some(summary) => format!(" Alerts: {} ", summary),
        None => " Alerts ".to_string(),
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(app, &title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}
