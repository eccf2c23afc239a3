//! Validation: progress bar over the simulated registration stages.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use micare_core::validation::{ValidationOutcome, VALIDATION_STAGES};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let run = app.flow.validation();
    let [status_area, gauge_area, stages_area, actions_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(VALIDATION_STAGES.len() as u16 + 1),
        Constraint::Length(2),
    ])
    .areas(area);

    let (title, message) = match run.current_stage() {
        Some(stage) => (stage.title, stage.message),
        None => ("Preparing", "Submitting your application..."),
    };
    let icon = match run.outcome() {
        ValidationOutcome::Success => Span::styled("✓ ", theme::positive()),
        ValidationOutcome::Pending => Span::styled("⟳ ", theme::warning()),
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![icon, Span::styled(title, theme::accent_bold())]),
            Line::from(Span::styled(message, theme::muted())),
        ]),
        status_area,
    );

    let gauge_style = match run.outcome() {
        ValidationOutcome::Success => theme::positive(),
        ValidationOutcome::Pending => theme::accent(),
    };
    f.render_widget(
        Gauge::default()
            .gauge_style(gauge_style)
            .percent(run.progress_pct())
            .label(format!("{}%", run.progress_pct())),
        gauge_area,
    );

    let stages: Vec<Line> = VALIDATION_STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let style = if run.visited().contains(&i) {
                theme::positive()
            } else {
                theme::muted()
            };
            Line::from(Span::styled(
                format!("  {:>3}%  {}", stage.progress_pct, stage.title),
                style,
            ))
        })
        .collect();
    f.render_widget(Paragraph::new(stages), stages_area);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[r] Retry  ", theme::accent()),
            Span::styled("[Enter] Go to login", theme::accent()),
        ])),
        actions_area,
    );
}
