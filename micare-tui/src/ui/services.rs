//! Services: checklist over the fixed catalog.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use micare_core::session::SERVICE_CATALOG;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let session = app.flow.session();
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Select the services you want to use",
            theme::accent_bold(),
        )),
        Line::from(""),
    ];

    for (i, service) in SERVICE_CATALOG.iter().enumerate() {
        let checked = session.is_service_selected(service.id);
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if i == app.service_cursor {
            theme::selected()
        } else if checked {
            theme::positive()
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {mark} "), theme::accent()),
            Span::styled(format!(" {} ", service.label), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Selected: ", theme::muted()),
        Span::styled(session.service_count_label(), theme::accent_bold()),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}
