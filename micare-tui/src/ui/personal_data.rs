//! Personal data form: three steps, the last one a read-only review.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use micare_core::personal::{PersonalStep, FORM_FIELDS};
use micare_core::wizard::WizardStep;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let step = app.flow.personal_step();
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);

    f.render_widget(Paragraph::new(step_header(step)), header_area);

    let data = &app.flow.session().personal_data;
    let mut lines: Vec<Line> = Vec::new();

    if step == PersonalStep::Review {
        for field in FORM_FIELDS.iter() {
            let value = data.get(field.name).filter(|v| !v.trim().is_empty());
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>20}: ", field.label), theme::muted()),
                match value {
                    Some(v) => Span::styled(v.to_string(), theme::text()),
                    None => Span::styled("not provided", theme::muted()),
                },
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Saved. Continuing to certification...",
            theme::positive(),
        )));
    } else {
        for (i, field) in app.visible_fields().into_iter().enumerate() {
            let focused = i == app.field_cursor;
            let value = data.get(field.name).unwrap_or_default();
            let label_style = if focused {
                theme::accent_bold()
            } else {
                theme::muted()
            };
            let mut spans = vec![
                Span::styled(format!("  {:>20}: ", field.label), label_style),
                Span::styled(value.to_string(), theme::text()),
            ];
            if focused {
                spans.push(Span::styled("_", theme::accent()));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
    }

    f.render_widget(Paragraph::new(lines), body_area);
}

fn step_header(active: PersonalStep) -> Vec<Line<'static>> {
    let mut dots: Vec<Span> = Vec::new();
    for step in PersonalStep::SEQUENCE {
        let style = if *step == active {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        dots.push(Span::styled(format!(" {} {} ", step.key(), step.title()), style));
        dots.push(Span::styled("›", theme::muted()));
    }
    dots.pop();

    vec![
        Line::from(Span::styled(
            format!("Step {} of {}", active.key(), PersonalStep::SEQUENCE.len()),
            theme::accent_bold(),
        )),
        Line::from(dots),
    ]
}
