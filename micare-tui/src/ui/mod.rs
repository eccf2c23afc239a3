//! Top-level UI layout: one screen at a time with a status bar.

pub mod certification;
pub mod chat;
pub mod dashboard;
pub mod help;
pub mod login;
pub mod overlays;
pub mod personal_data;
pub mod services;
pub mod signup;
pub mod splash;
pub mod status_bar;
pub mod submission;
pub mod validation;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::widgets::{Block, Borders};

use micare_core::Screen;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let main_area = main_area(f.area());
    let status_area = status_area(f.area());

    // Draw the active screen.
    draw_screen(f, main_area, app);

    // Draw status bar.
    status_bar::render(f, status_area, app);

    // Modals owned by the flow.
    let flow = &app.flow;
    if flow.login().qr_scanner_open && flow.current_screen() == Screen::Login {
        overlays::render_qr_scanner(f, main_area);
    }
    if flow.session().notifications.is_open() {
        overlays::render_notifications(f, main_area, app);
    }
    if flow.dashboard().search_open {
        overlays::render_search(f, main_area, &app.search_input);
    }

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Alert(msg) => overlays::render_alert(f, main_area, msg),
        Overlay::ConfirmLogout => overlays::render_confirm_logout(f, main_area),
        Overlay::Help => help::render(f, main_area),
        Overlay::FilePicker { step, input } => {
            overlays::render_file_picker(f, main_area, *step, input)
        }
        Overlay::None => {}
    }
}

/// Everything above the status line.
pub fn main_area(area: Rect) -> Rect {
    split(area)[0]
}

fn status_area(area: Rect) -> Rect {
    split(area)[1]
}

fn split(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area)
}

/// Inside of the bordered screen frame.
pub fn screen_inner(main: Rect) -> Rect {
    main.inner(Margin::new(1, 1))
}

/// Draw the current screen with its border.
fn draw_screen(f: &mut Frame, area: Rect, app: &AppState) {
    let screen = app.flow.current_screen();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", screen.label()))
        .title_style(theme::panel_title(true));

    let inner = screen_inner(area);
    f.render_widget(block, area);

    match screen {
        Screen::Splash => splash::render(f, inner, app),
        Screen::Login => login::render(f, inner, app),
        Screen::Signup => signup::render(f, inner, app),
        Screen::PersonalData => personal_data::render(f, inner, app),
        Screen::Certification => certification::render(f, inner, app),
        Screen::Services => services::render(f, inner, app),
        Screen::Submission => submission::render(f, inner, app),
        Screen::Validation => validation::render(f, inner, app),
        Screen::Dashboard => dashboard::render(f, inner, app),
        Screen::Chat => chat::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
