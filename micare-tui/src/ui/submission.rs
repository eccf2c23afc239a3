//! Submission: summary, terms checkbox and the signature pad.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::theme;
use crate::ui::screen_inner;

fn layout(inner: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(inner)
}

/// Drawing surface of the signature pad for a given main area.
pub fn signature_inner(main: Rect) -> Rect {
    layout(screen_inner(main))[2].inner(Margin::new(1, 1))
}

/// Map a terminal cell inside `pad` to canvas coordinates (origin bottom-left).
pub fn pad_point(pad: Rect, column: u16, row: u16) -> (f64, f64) {
    let x = column.saturating_sub(pad.x);
    let bottom = pad.y + pad.height.saturating_sub(1);
    let y = bottom.saturating_sub(row);
    (f64::from(x), f64::from(y))
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let [summary_area, terms_area, pad_area, submit_area] = layout(area);
    let summary = app.flow.submission_summary();

    let lines = vec![
        Line::from(Span::styled("Application summary", theme::accent_bold())),
        summary_line("Personal data fields", summary.fields),
        summary_line("Documents uploaded", summary.documents),
        summary_line("Services selected", summary.services),
    ];
    f.render_widget(Paragraph::new(lines), summary_area);

    let accepted = app.flow.session().terms_accepted;
    let terms = Line::from(vec![
        Span::styled(if accepted { "[x] " } else { "[ ] " }, theme::accent()),
        Span::styled(
            "I accept the terms and conditions and consent to blockchain registration",
            theme::text(),
        ),
    ]);
    f.render_widget(Paragraph::new(terms), terms_area);

    render_pad(f, pad_area, app);

    let submit = if app.flow.can_submit() {
        Span::styled("[Enter] Submit application", theme::accent_bold())
    } else {
        Span::styled("Submit (accept the terms first)", theme::muted())
    };
    f.render_widget(Paragraph::new(submit), submit_area);
}

fn summary_line(label: &str, count: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:>22}: "), theme::muted()),
        Span::styled(count.to_string(), theme::text()),
    ])
}

fn render_pad(f: &mut Frame, area: Rect, app: &AppState) {
    let signature = app.flow.signature();
    let inner = area.inner(Margin::new(1, 1));
    let title = if signature.is_signed() {
        " Signature [c]clear "
    } else {
        " Signature (draw with the mouse) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(title)
        .title_style(theme::muted());

    let color = theme::theme().text_primary;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, f64::from(inner.width.saturating_sub(1).max(1))])
        .y_bounds([0.0, f64::from(inner.height.saturating_sub(1).max(1))])
        .paint(move |ctx| {
            for (a, b) in signature.segments() {
                ctx.draw(&CanvasLine::new(a.x, a.y, b.x, b.y, color));
            }
            for stroke in signature.strokes().iter().filter(|s| s.len() == 1) {
                let coords = [(stroke[0].x, stroke[0].y)];
                ctx.draw(&Points {
                    coords: &coords,
                    color,
                });
            }
        });
    f.render_widget(canvas, area);
}
