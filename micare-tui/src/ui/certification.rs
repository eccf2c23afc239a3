//! Certification wizard: step list on the left, the active step on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use micare_core::certification::{BiometricModality, CaptureState, CertStep};
use micare_core::wizard::WizardStep;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let [steps_area, body_area] =
        Layout::horizontal([Constraint::Length(28), Constraint::Min(20)]).areas(area);

    let active = app.flow.cert_step();
    let record = &app.flow.session().certification;

    let steps: Vec<Line> = CertStep::SEQUENCE
        .iter()
        .map(|step| {
            let (icon, style) = if *step == active {
                ("▶", theme::accent_bold())
            } else if *step < active {
                ("✓", theme::positive())
            } else {
                (" ", theme::muted())
            };
            Line::from(Span::styled(
                format!(" {icon} {}. {}", step.key(), step.title()),
                style,
            ))
        })
        .collect();
    f.render_widget(
        Paragraph::new(steps).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(theme::muted()),
        ),
        steps_area,
    );

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(format!(" {}", active.title()), theme::accent_bold())),
        Line::from(""),
    ];

    match active {
        CertStep::Biometric => {
            for modality in BiometricModality::ALL {
                let state = record.capture_state(modality);
                let key = match modality {
                    BiometricModality::Fingerprint => "f",
                    BiometricModality::Face => "v",
                };
                let status = match state {
                    CaptureState::Idle => "Capture",
                    CaptureState::Processing => "Processing...",
                    CaptureState::Captured => "Captured ✓",
                };
                lines.push(Line::from(vec![
                    Span::styled(format!(" [{key}] {:<14}", modality.label()), theme::text()),
                    Span::styled(
                        status,
                        Style::default().fg(theme::theme().capture_color(state)),
                    ),
                ]));
            }
        }
        CertStep::Done => {
            lines.push(Line::from(Span::styled(
                format!(" {} documents submitted for review.", record.document_count()),
                theme::positive(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " [Enter] Continue to services",
                theme::accent(),
            )));
        }
        upload => match record.documents.get(&upload) {
            Some(doc) => {
                lines.push(Line::from(vec![
                    Span::styled(" ✓ ", theme::positive()),
                    Span::styled(doc.name.clone(), theme::text()),
                    Span::styled(format!("  ({})", doc.size_label()), theme::muted()),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " No file selected.",
                    theme::muted(),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    " [Enter] Choose file",
                    theme::accent(),
                )));
            }
        },
    }

    f.render_widget(Paragraph::new(lines), body_area);
}
