//! Signup: role cards.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use micare_core::Role;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let selected = app.flow.session().selected_role;
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("How will you use MI_CARE?", theme::accent_bold())),
        Line::from(""),
    ];

    for (i, role) in Role::ALL.into_iter().enumerate() {
        let is_cursor = i == app.role_cursor;
        let marker = if selected == Some(role) { "●" } else { "○" };
        let title_style = if is_cursor {
            theme::selected()
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), theme::accent()),
            Span::styled(format!(" {} ", role.label()), title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", role.description()),
            theme::muted(),
        )));
        lines.push(Line::from(""));
    }

    if let Some(role) = selected {
        lines.push(Line::from(Span::styled(
            format!("Setting up your {} account...", role.label()),
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
