//! Chat: transcript of the open conversation and the compose line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use micare_core::chat::Sender;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chat = &app.flow.session().chat;
    let [header_area, transcript_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(chat.header(), theme::accent_bold())),
        header_area,
    );

    let messages = chat
        .active()
        .map(|conv| chat.transcript(conv))
        .unwrap_or(&[]);
    let lines: Vec<Line> = messages
        .iter()
        .map(|msg| {
            let (who, style) = match msg.sender {
                Sender::Local => ("You", theme::accent()),
                Sender::Remote => (chat.header(), theme::positive()),
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", msg.time), theme::muted()),
                Span::styled(format!("{who}: "), style),
                Span::styled(msg.text.as_str(), theme::text()),
            ])
        })
        .collect();

    // Keep the newest messages in view.
    let visible = transcript_area.height as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        transcript_area,
    );

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", theme::accent()),
        Span::styled(app.chat_input.as_str(), theme::text()),
        Span::styled("_", theme::accent()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::accent())
            .title(" Message [Enter]send [Esc]back ")
            .title_style(theme::muted()),
    );
    f.render_widget(input, input_area);
}
