//! Help overlay: keyboard shortcuts per screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(80, 90, area);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "F1 / ?", "Show this help");
    key(&mut lines, "q / Ctrl+C", "Quit (q only outside text input)");
    lines.push(Line::from(""));

    section(&mut lines, "Login");
    key(&mut lines, "Tab", "Switch between username and PIN");
    key(&mut lines, "Enter", "Log in");
    key(&mut lines, "Ctrl+B", "Biometric sign-in");
    key(&mut lines, "Ctrl+R / Esc", "Open / close the QR scanner");
    key(&mut lines, "Ctrl+S", "Create an account");
    lines.push(Line::from(""));

    section(&mut lines, "Onboarding");
    key(&mut lines, "j / k", "Move through roles and services");
    key(&mut lines, "PgDn / PgUp", "Next / previous form step");
    key(&mut lines, "Enter", "Choose file, continue or submit");
    key(&mut lines, "f / v", "Capture fingerprint / face");
    key(&mut lines, "Space", "Toggle service or terms");
    key(&mut lines, "Mouse", "Sign on the signature pad (c clears)");
    key(&mut lines, "Esc", "Back");
    lines.push(Line::from(""));

    section(&mut lines, "Dashboard");
    key(&mut lines, "1-5", "Home, map, analytics, wallet, engagement");
    key(&mut lines, "Tab", "Cycle bottom navigation");
    key(&mut lines, "m", "Toggle side menu");
    key(&mut lines, "n / /", "Notifications / search");
    key(&mut lines, "+ / - / a", "Map zoom and area analytics");
    key(&mut lines, "d / f", "Chart date range and disease filter");
    key(&mut lines, "L", "Log out");

    let para = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::accent())
            .title(" Help [any key]close ")
            .title_style(theme::accent_bold()),
    );
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
