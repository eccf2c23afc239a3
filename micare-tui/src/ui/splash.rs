//! Splash screen with a progress bar for the startup delay.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let [_, title_area, gauge_area, hint_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);

    let title = vec![
        Line::from(Span::styled("MI_CARE", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "Your health records, secured on the blockchain",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

    let total = app.flow.timings().splash_ms.max(1);
    let percent = (app.flow.now_ms().min(total) * 100 / total) as u16;
    let [_, bar, _] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(50),
        Constraint::Percentage(25),
    ])
    .areas(gauge_area);
    f.render_widget(
        Gauge::default()
            .gauge_style(theme::accent())
            .percent(percent)
            .label(""),
        bar,
    );

    f.render_widget(
        Paragraph::new(Span::styled("Press any key to continue", theme::neutral()))
            .alignment(Alignment::Center),
        hint_area,
    );
}
