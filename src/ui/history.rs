//! Heat-cycle history rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::format::{HistoryView, Tone};
use crate::ui::common::panel;

/// Render the History view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Heat Cycle History: {} ", app.dog_name());

    let HistoryView::Rows(rows) = &app.heat_history else {
        let style = match &app.heat_history {
            HistoryView::Failed(_) => app.theme.tone_style(Tone::Danger),
            _ => Style::default().add_modifier(Modifier::DIM),
        };
        let mut lines: Vec<Line> = app
            .heat_history
            .message()
            .unwrap_or_default()
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect();
        if let HistoryView::NoData { note: Some(note) } = &app.heat_history {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                note.clone(),
                app.theme.tone_style(Tone::Warning),
            )));
        }
        let paragraph = Paragraph::new(lines)
            .block(panel(app, &title))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Type"),
        Cell::from("Value"),
        Cell::from("Estimate"),
        Cell::from("Status"),
        Cell::from("Recorded"),
    ])
    .height(1)
    .style(app.theme.header);

    let table_rows: Vec<Row> = rows
        .iter()
        .skip(app.scroll as usize)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.prediction_type.clone()),
                Cell::from(row.value.clone()),
                Cell::from(row.estimated_date.clone()),
                Cell::from(Span::styled(
                    row.fertility_status.clone(),
                    app.theme.alert_level_style(row.cue),
                )),
                Cell::from(row.recorded.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(24),
        Constraint::Min(16),
        Constraint::Length(23),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(panel(app, &title));
    frame.render_widget(table, area);
}
