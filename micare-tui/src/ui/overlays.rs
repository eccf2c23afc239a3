//! Overlay widgets: alert, logout confirmation, file prompt, notifications,
//! search and the QR scanner.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use micare_core::certification::CertStep;
use micare_core::wizard::WizardStep;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Blocking alert.
pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Alert ")
        .title_style(theme::negative());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::text())),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss", theme::muted())),
    ];
    let para = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

pub fn render_confirm_logout(f: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(" Logout ")
        .title_style(theme::warning());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Are you sure you want to logout?", theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes  ", theme::accent_bold()),
            Span::styled("[n] No", theme::muted()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        popup,
    );
}

/// Path prompt for a document upload.
pub fn render_file_picker(f: &mut Frame, area: Rect, step: CertStep, input: &str) {
    let popup = centered_rect(60, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" Upload {} [Enter]upload [Esc]cancel ", step.title()))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Path to file:", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text), inner);
}

pub fn render_notifications(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Notifications [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    for n in app.flow.session().notifications.items() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", n.category.label()), theme::warning()),
            Span::styled(n.message.to_string(), theme::text()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("      {}", n.time),
            theme::muted(),
        )));
    }
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_search(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Search [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Search doctors, facilities, records:",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text), inner);
}

pub fn render_qr_scanner(f: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" QR Login [Esc]cancel ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("┌──────────┐", theme::accent())),
        Line::from(Span::styled("│          │", theme::accent())),
        Line::from(Span::styled("│  ▒▒  ▒▒  │", theme::accent())),
        Line::from(Span::styled("│          │", theme::accent())),
        Line::from(Span::styled("└──────────┘", theme::accent())),
        Line::from(""),
        Line::from(Span::styled(
            "Scan the code with the MI_CARE mobile app",
            theme::muted(),
        )),
    ];
    f.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        popup,
    );
}
