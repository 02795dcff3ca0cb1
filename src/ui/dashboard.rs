//! Home dashboard rendering.
//!
//! Shows the latest reading, the local classification flags and sparkline
//! trends of the readings seen this session.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::format::timestamp::format_timestamp;
use crate::ui::common::panel;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(5), // Vitals
        Constraint::Length(4), // Flags and location
        Constraint::Min(4),    // Trends
    ])
    .split(area);

    render_vitals(frame, app, rows[0]);
    render_findings(frame, app, rows[1]);
    render_trends(frame, app, rows[2]);
}

fn render_vitals(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.dashboard;
    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let band = view
        .temperature_band
        .map(|b| b.label())
        .unwrap_or("--");
    let temperature = Paragraph::new(vec![
        Line::from(Span::styled(
            view.temperature.clone(),
            app.theme
                .temperature_style(view.temperature_band)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            band,
            app.theme.temperature_style(view.temperature_band),
        )),
    ])
    .block(panel(app, " Temperature "));
    frame.render_widget(temperature, columns[0]);

    let activity = Paragraph::new(vec![
        Line::from(Span::styled(
            view.activity.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(view.health_status.clone().unwrap_or_default()),
    ])
    .block(panel(app, " Activity "));
    frame.render_widget(activity, columns[1]);
}

fn render_findings(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.dashboard;

    let flags = match view.tier {
        Some(tier) if tier.is_normal() => {
            Span::styled("Normal", Style::default().fg(app.theme.healthy))
        }
        Some(tier) => Span::styled(
            tier.flags()
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(" + "),
            app.theme.severity_style(tier.urgency()),
        ),
        None => Span::styled("--", Style::default().add_modifier(Modifier::DIM)),
    };

    let updated = view
        .updated
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "--".to_string());

    let lines = vec![
        Line::from(vec![Span::raw("Local tier: "), flags]),
        Line::from(format!("{} │ Updated: {}", view.location, updated)),
    ];
    let status = Line::from(Span::styled(
        format!(" {} ", view.status),
        app.theme.tone_style(view.tone),
    ));
    let paragraph = Paragraph::new(lines).block(panel(app, " Status ").title_bottom(status));
    frame.render_widget(paragraph, area);
}

fn render_trends(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(16) as usize;
    let lines = vec![
        Line::from(vec![
            Span::raw("Temperature  "),
            Span::styled(
                render_sparkline(&app.history.temperature_sparkline(), width),
                Style::default().fg(app.theme.highlight),
            ),
        ]),
        Line::from(vec![
            Span::raw("Activity     "),
            Span::styled(
                render_sparkline(&app.history.activity_sparkline(), width),
                Style::default().fg(app.theme.highlight),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} readings", app.history.len()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel(app, " Trends ")), area);
}

/// Render the last `width` levels as bar characters.
fn render_sparkline(data: &[u8], width: usize) -> String {
    let skip = data.len().saturating_sub(width);
    data[skip..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}
