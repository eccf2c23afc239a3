//! Login screen: username, PIN and the alternative sign-in options.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use micare_core::flow::LoginBiometric;

use crate::app::{AppState, LoginField};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let [_, form_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(50),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, username_area, pin_area, options_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(6),
    ])
    .areas(form_area);

    let form = &app.login_form;
    input(
        f,
        username_area,
        "Username",
        &form.username,
        form.focus == LoginField::Username,
    );
    let masked = "•".repeat(form.pin.chars().count());
    input(f, pin_area, "6-digit PIN", &masked, form.focus == LoginField::Pin);

    let login = app.flow.login();
    let mut lines: Vec<Line> = Vec::new();
    if login.loading {
        lines.push(Line::from(Span::styled("Signing in...", theme::warning())));
    } else {
        lines.push(Line::from(Span::styled("[Enter] Login", theme::accent_bold())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Or sign in with", theme::muted())));
    let biometric = match login.biometric {
        LoginBiometric::Idle => Span::styled("  [^B] Biometric", theme::accent()),
        LoginBiometric::Scanning => Span::styled("  Scanning...", theme::warning()),
        LoginBiometric::Verified => Span::styled("  Verified ✓", theme::positive()),
    };
    lines.push(Line::from(biometric));
    lines.push(Line::from(Span::styled("  [^R] QR code", theme::accent())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("No account? ", theme::muted()),
        Span::styled("[^S] Sign up", theme::accent_bold()),
    ]));
    f.render_widget(Paragraph::new(lines), options_area);
}

fn input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {label} "))
        .title_style(theme::panel_title(focused));
    let mut spans = vec![Span::styled(value.to_string(), theme::text())];
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
