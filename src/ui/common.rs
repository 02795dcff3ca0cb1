//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the dog's current state.
///
/// Displays: urgency indicator, dog name, temperature, activity, server status.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.dashboard;
    let name = dashboard.dog_name.as_deref().unwrap_or(app.dog_name());

    let Some(tier) = dashboard.tier else {
        let line = Line::from(vec![
            Span::styled(" CANINEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("│ {} │ {}", name, dashboard.status)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let urgency = tier.urgency();
    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.severity_style(urgency)),
        Span::styled(
            format!("{} ", name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            dashboard.temperature.clone(),
            app.theme.temperature_style(dashboard.temperature_band),
        ),
        Span::raw(" │ "),
        Span::raw(dashboard.activity.clone()),
        Span::raw(" │ "),
        Span::styled(urgency.label(), app.theme.severity_style(urgency)),
        Span::raw(match &dashboard.health_status {
            Some(status) => format!(" │ {}", status),
            None => String::new(),
        }),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|view| Line::from(format!(" {}:{} ", view.index() + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .padding("", "")
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: feed description, time since last update, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Health => "a:analyze r:refresh Tab:switch ?:help q:quit",
        View::Alerts | View::History => "↑↓:scroll r:refresh Tab:switch ?:help q:quit",
        View::Dashboard | View::Location => "r:refresh Tab:switch e:export ?:help q:quit",
    };

    let updated = match app.last_updated {
        Some(at) => format!("Updated {:.1}s ago", at.elapsed().as_secs_f64()),
        None => "Waiting for data".to_string(),
    };

    let loading = if app.is_loading() { " | Loading..." } else { "" };

    let status = format!(
        " {} | {}{} | {}",
        app.source_description(),
        updated,
        loading,
        controls
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab ←/→     Switch views"),
        Line::from("  1-5         Jump to view"),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Scroll 10 lines"),
        Line::from("  Esc         Back to dashboard"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Health",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  a         Analyze current reading"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// A bordered block in the theme's style.
pub fn panel<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
