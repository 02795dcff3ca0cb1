//! Location view rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::common::panel;

/// Render the Location view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.location;
    let lines = vec![
        Line::from(view.latitude.clone()),
        Line::from(view.longitude.clone()),
        Line::from(""),
        Line::from(Span::styled(
            view.status.clone(),
            app.theme.tone_style(view.tone),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel(app, " Location ")), area);
}
