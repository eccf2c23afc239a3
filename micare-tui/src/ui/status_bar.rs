//! Bottom status bar: key hints for the current screen, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use micare_core::certification::CertStep;
use micare_core::dashboard::DashboardView;
use micare_core::Screen;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" {}", hints(app)), theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints(app: &AppState) -> &'static str {
    let flow = &app.flow;
    match flow.current_screen() {
        Screen::Splash => "any key:continue q:quit",
        Screen::Login => "Tab:field Enter:login ^B:biometric ^R:QR ^S:sign up F1:help",
        Screen::Signup => "j/k:move Enter:choose role Esc:back",
        Screen::PersonalData => "↑/↓:field PgDn:next PgUp:back F1:help",
        Screen::Certification => match flow.cert_step() {
            CertStep::Biometric => "f:fingerprint v:face ←/→:step Esc:back",
            CertStep::Done => "Enter:services Esc:back",
            _ => "Enter:choose file ←/→:step Esc:back",
        },
        Screen::Services => "j/k:move Space:toggle Enter:continue Esc:back",
        Screen::Submission => "t:terms mouse:sign c:clear Enter:submit Esc:back",
        Screen::Validation => "r:retry Enter:login",
        Screen::Dashboard => match flow.dashboard().view {
            DashboardView::Map => "1-5:view +/-:zoom a:analytics m:menu n:alerts L:logout",
            DashboardView::Analytics => "1-5:view d:range f:disease m:menu n:alerts L:logout",
            DashboardView::Engagement => "1-5:view j/k:chat Enter:open m:menu L:logout",
            _ => "1-5:view Tab:bottom nav m:menu n:alerts /:search L:logout",
        },
        Screen::Chat => "Enter:send Esc:back",
    }
}
