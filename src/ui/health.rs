//! Health view rendering.
//!
//! Top: the sample that would be submitted. Bottom: the last assessment.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::thresholds::classify;
use crate::format::{AssessmentView, Tone};
use crate::ui::common::panel;

/// Render the Health view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(5), Constraint::Min(6)]).split(area);

    let sample_lines = match &app.sample {
        Some(sample) => {
            let tier = classify(sample.temperature, sample.activity_percent);
            vec![
                Line::from(vec![
                    Span::raw("Temperature: "),
                    Span::styled(
                        sample.temperature_text(),
                        app.theme.temperature_style(Some(tier.temperature)),
                    ),
                ]),
                Line::from(format!("Activity: {}", sample.activity_text())),
                Line::from(Span::styled(
                    "Press a to analyze",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        }
        None if app.is_loading() => vec![Line::from("Loading...")],
        None => vec![Line::from("No sensor data available")],
    };
    let title = format!(" Current Reading: {} ", app.dog_name());
    frame.render_widget(
        Paragraph::new(sample_lines).block(panel(app, &title)),
        rows[0],
    );

    let lines = if app.is_analyzing() {
        vec![Line::from("Analyzing...")]
    } else {
        assessment_lines(app)
    };
    let paragraph = Paragraph::new(lines)
        .block(panel(app, " Assessment "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, rows[1]);
}

fn assessment_lines(app: &App) -> Vec<Line<'static>> {
    match &app.assessment {
        AssessmentView::Pending => vec![Line::from(Span::styled(
            "No analysis yet",
            Style::default().add_modifier(Modifier::DIM),
        ))],
        AssessmentView::Failed(text) => vec![Line::from(Span::styled(
            text.clone(),
            app.theme.tone_style(Tone::Danger),
        ))],
        AssessmentView::Ready {
            status,
            severity,
            basis,
            findings,
            recommendations,
        } => {
            let style = app.theme.severity_style(basis.severity());
            let mut lines = vec![
                Line::from(Span::styled(status.clone(), style.add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(severity.clone(), style)),
            ];
            if basis.is_local() {
                lines.push(Line::from(Span::styled(
                    format!("Local estimate: {}", basis.severity().label()),
                    Style::default().add_modifier(Modifier::DIM),
                )));
            }
            lines.push(Line::from(""));
            for finding in findings {
                lines.push(Line::from(format!("• {}", finding)));
            }
            if !findings.is_empty() {
                lines.push(Line::from(""));
            }
            lines.extend(
                recommendations
                    .lines()
                    .map(|line| Line::from(line.to_string())),
            );
            lines
        }
    }
}
