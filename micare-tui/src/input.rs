//! Input dispatch: overlays first, then modals, global keys and per-screen handlers.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use micare_core::certification::{BiometricModality, CertStep};
use micare_core::chat::ConversationId;
use micare_core::dashboard::{BottomNav, DashboardView};
use micare_core::personal::PersonalStep;
use micare_core::session::{Role, SERVICE_CATALOG};
use micare_core::wizard::WizardStep;
use micare_core::{FlowError, Screen};

use crate::app::{takes_text, AppState, Overlay};
use crate::ui;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    let before = app.flow.current_screen();
    dispatch_key(app, key);
    let after = app.flow.current_screen();
    if before != after {
        app.on_screen_changed(after);
    }
}

fn dispatch_key(app: &mut AppState, key: KeyEvent) {
    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Alert(_) | Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ConfirmLogout => {
            handle_confirm_logout(app, key);
            return;
        }
        Overlay::FilePicker { .. } => {
            handle_file_picker(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Modals owned by the flow.
    if app.flow.session().notifications.is_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('n')) {
            app.flow.close_notifications();
        }
        return;
    }
    if app.flow.dashboard().search_open {
        handle_search_modal(app, key);
        return;
    }
    if app.flow.login().qr_scanner_open {
        if key.code == KeyCode::Esc {
            app.flow.cancel_qr_scanner();
        }
        return;
    }

    // 3. Global keys.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let screen = app.flow.current_screen();
    let typing = takes_text(screen, app.flow.personal_step());
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.running = false;
            return;
        }
        KeyCode::Char('q') if !typing => {
            app.running = false;
            return;
        }
        KeyCode::F(1) => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('?') if !typing => {
            app.overlay = Overlay::Help;
            return;
        }
        _ => {}
    }

    // 4. Screen-specific keys.
    match screen {
        Screen::Splash => app.flow.skip_splash(),
        Screen::Login => handle_login_key(app, key),
        Screen::Signup => handle_signup_key(app, key),
        Screen::PersonalData => handle_personal_key(app, key),
        Screen::Certification => handle_certification_key(app, key),
        Screen::Services => handle_services_key(app, key),
        Screen::Submission => handle_submission_key(app, key),
        Screen::Validation => handle_validation_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
        Screen::Chat => handle_chat_key(app, key),
    }
}

/// Report the error of a flow action, if any.
fn run(app: &mut AppState, result: Result<(), FlowError>) {
    if let Err(err) = result {
        app.report(err);
    }
}

fn handle_confirm_logout(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.overlay = Overlay::None;
            app.flow.logout();
            app.set_status("Logged out");
        }
        KeyCode::Char('n') | KeyCode::Esc => app.overlay = Overlay::None,
        _ => {}
    }
}

fn handle_file_picker(app: &mut AppState, key: KeyEvent) {
    let Overlay::FilePicker { step, input } = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => {
            let step = *step;
            let path = std::mem::take(input);
            app.overlay = Overlay::None;
            if !path.trim().is_empty() {
                app.pick_file(step, &path);
            }
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => input.push(c),
        _ => {}
    }
}

fn handle_search_modal(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.search_input.clear();
            app.flow.close_search();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

fn handle_login_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('b') if ctrl => {
            let result = app.flow.login_biometric();
            run(app, result);
        }
        KeyCode::Char('r') if ctrl => app.flow.open_qr_scanner(),
        KeyCode::Char('s') if ctrl => {
            let result = app.flow.go_to_signup();
            run(app, result);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.toggle_focus();
        }
        KeyCode::Enter => {
            let form = &app.login_form;
            match app.flow.submit_login(&form.username, &form.pin) {
                Ok(()) => app.set_status("Signing in..."),
                Err(err) => app.report(err),
            }
        }
        KeyCode::Backspace => app.login_form.pop(),
        KeyCode::Char(c) if !ctrl => app.login_form.push(c),
        _ => {}
    }
}

fn handle_signup_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.role_cursor + 1 < Role::ALL.len() {
                app.role_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.role_cursor = app.role_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let role = Role::ALL[app.role_cursor];
            let result = app.flow.select_role(role);
            run(app, result);
        }
        KeyCode::Esc => {
            let result = app.flow.back_to_login();
            run(app, result);
        }
        _ => {}
    }
}

fn handle_personal_key(app: &mut AppState, key: KeyEvent) {
    let step = app.flow.personal_step();
    let field_count = app.visible_fields().len();
    match key.code {
        KeyCode::Down | KeyCode::Tab => {
            if app.field_cursor + 1 < field_count {
                app.field_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.field_cursor = app.field_cursor.saturating_sub(1);
        }
        KeyCode::PageDown | KeyCode::Enter => {
            if let Ok(next) = app.flow.personal_next(step, step.key() + 1) {
                app.field_cursor = 0;
                if next == PersonalStep::Review {
                    app.set_status("Personal data saved");
                }
            }
        }
        KeyCode::PageUp | KeyCode::Esc => {
            if step.key() > 1 && app.flow.personal_prev(step, step.key() - 1).is_ok() {
                app.field_cursor = 0;
            }
        }
        KeyCode::Backspace => app.edit_field(|v| {
            v.pop();
        }),
        KeyCode::Char(c) => app.edit_field(|v| v.push(c)),
        _ => {}
    }
}

fn handle_certification_key(app: &mut AppState, key: KeyEvent) {
    let step = app.flow.cert_step();
    match key.code {
        KeyCode::Enter if step.is_upload() => {
            app.overlay = Overlay::FilePicker {
                step,
                input: String::new(),
            };
        }
        KeyCode::Enter if step == CertStep::Done => {
            let result = app.flow.continue_to_services();
            run(app, result);
        }
        KeyCode::Char('f') if step == CertStep::Biometric => {
            let result = app.flow.capture_biometric(BiometricModality::Fingerprint);
            run(app, result);
        }
        KeyCode::Char('v') if step == CertStep::Biometric => {
            let result = app.flow.capture_biometric(BiometricModality::Face);
            run(app, result);
        }
        KeyCode::Right | KeyCode::PageDown => {
            let result = app.flow.cert_next(step, step.key() + 1).map(|_| ());
            run(app, result);
        }
        KeyCode::Left | KeyCode::PageUp => {
            if step.key() > 1 {
                let result = app.flow.cert_prev(step, step.key() - 1).map(|_| ());
                run(app, result);
            }
        }
        KeyCode::Esc => {
            let result = app.flow.back_to_personal();
            run(app, result);
        }
        _ => {}
    }
}

fn handle_services_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.service_cursor + 1 < SERVICE_CATALOG.len() {
                app.service_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.service_cursor = app.service_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            let id = SERVICE_CATALOG[app.service_cursor].id;
            let result = app.flow.toggle_service(id).map(|_| ());
            run(app, result);
        }
        KeyCode::Enter => {
            let result = app.flow.continue_to_submission();
            run(app, result);
        }
        KeyCode::Esc => {
            let result = app.flow.back_to_certification();
            run(app, result);
        }
        _ => {}
    }
}

fn handle_submission_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('t') => {
            let accepted = !app.flow.session().terms_accepted;
            app.flow.set_terms_accepted(accepted);
        }
        KeyCode::Char('c') => app.flow.signature_mut().clear(),
        KeyCode::Enter => {
            let result = app.flow.submit_application();
            run(app, result);
        }
        KeyCode::Esc => {
            let result = app.flow.back_to_services();
            run(app, result);
        }
        _ => {}
    }
}

fn handle_validation_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => {
            let result = app.flow.retry_validation();
            run(app, result);
        }
        KeyCode::Char('l') | KeyCode::Enter => {
            let result = app.flow.go_to_login();
            run(app, result);
        }
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) {
    let view = app.flow.dashboard().view;
    match key.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            let result = app.flow.select_view(DashboardView::ALL[idx]);
            run(app, result);
        }
        KeyCode::Tab => {
            let current = app.flow.dashboard().bottom_nav;
            let pos = BottomNav::ALL.iter().position(|n| *n == current).unwrap_or(0);
            let next = BottomNav::ALL[(pos + 1) % BottomNav::ALL.len()];
            let result = app.flow.select_bottom_nav(next);
            run(app, result);
        }
        KeyCode::Char('m') => app.flow.toggle_side_menu(),
        KeyCode::Char('n') => app.flow.open_notifications(),
        KeyCode::Char('/') => app.flow.open_search(),
        KeyCode::Char('L') => app.overlay = Overlay::ConfirmLogout,
        KeyCode::Esc => app.flow.click_outside(),
        _ => match view {
            DashboardView::Map => handle_map_key(app, key),
            DashboardView::Analytics => handle_chart_key(app, key),
            DashboardView::Engagement => handle_engagement_key(app, key),
            DashboardView::Home | DashboardView::Wallet => {}
        },
    }
}

fn handle_map_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => app.flow.zoom_in(),
        KeyCode::Char('-') => app.flow.zoom_out(),
        KeyCode::Char('a') => {
            let open = app
                .flow
                .dashboard()
                .map
                .as_ref()
                .is_some_and(|m| m.analytics_open);
            app.flow.set_analytics_panel(!open);
        }
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    let Some(chart) = app.flow.dashboard().chart.as_ref() else {
        return;
    };
    let (range, filter) = (chart.range, chart.filter);
    match key.code {
        KeyCode::Char('d') => app.flow.set_chart_range(range.next()),
        KeyCode::Char('f') => app.flow.set_chart_filter(filter.next()),
        _ => {}
    }
}

fn handle_engagement_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.conversation_cursor + 1 < ConversationId::ALL.len() {
                app.conversation_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.conversation_cursor = app.conversation_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            let conversation = ConversationId::ALL[app.conversation_cursor];
            let result = app.flow.open_chat(conversation);
            run(app, result);
        }
        _ => {}
    }
}

fn handle_chat_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let result = app.flow.back_to_engagement();
            run(app, result);
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.chat_input);
            if let Err(err) = app.flow.send_message(&text) {
                app.report(err);
            }
        }
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => app.chat_input.push(c),
        _ => {}
    }
}

/// Handle a mouse event. Only the signature pad listens.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.flow.current_screen() != Screen::Submission || app.overlay != Overlay::None {
        return;
    }
    let pad = ui::submission::signature_inner(ui::main_area(app.frame_area));
    let inside = mouse.column >= pad.x
        && mouse.column < pad.x + pad.width
        && mouse.row >= pad.y
        && mouse.row < pad.y + pad.height;
    let (x, y) = ui::submission::pad_point(pad, mouse.column, mouse.row);
    let signature = app.flow.signature_mut();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => signature.begin(x, y),
        MouseEventKind::Drag(MouseButton::Left) if inside => signature.extend(x, y),
        MouseEventKind::Up(MouseButton::Left) => signature.end(),
        MouseEventKind::Drag(MouseButton::Left) => signature.end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micare_core::AppConfig;
    use ratatui::layout::Rect;

    fn app() -> AppState {
        AppState::new(&AppConfig::default())
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn any_key_skips_splash() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.flow.current_screen(), Screen::Login);
    }

    #[test]
    fn short_pin_raises_alert_then_dismisses() {
        let mut app = app();
        app.flow.skip_splash();
        type_str(&mut app, "jdoe");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "123");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Overlay::Alert(_)));

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.login_form.pin, "123");
    }

    #[test]
    fn q_types_on_login_but_quits_elsewhere() {
        let mut app = app();
        app.flow.skip_splash();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.login_form.username, "q");

        app.flow.show(Screen::Services);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn services_toggle_and_continue() {
        let mut app = app();
        app.flow.show(Screen::Services);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.overlay,
            Overlay::Alert("Please select at least one service".into())
        );
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.flow.session().is_service_selected("telemedicine"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.current_screen(), Screen::Submission);
    }

    #[test]
    fn personal_form_typing_and_paging() {
        let mut app = app();
        app.flow.show(Screen::PersonalData);
        type_str(&mut app, "Amina");
        press(&mut app, KeyCode::Down);
        type_str(&mut app, "1990-01-01");
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.flow.personal_step(), PersonalStep::Contact);
        assert_eq!(app.field_cursor, 0);
        assert_eq!(
            app.flow.session().personal_data.get("date_of_birth"),
            Some("1990-01-01")
        );
    }

    #[test]
    fn upload_prompt_opens_on_enter() {
        let mut app = app();
        app.flow.show(Screen::Certification);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.overlay,
            Overlay::FilePicker {
                step: CertStep::IdentityDocument,
                ..
            }
        ));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn logout_needs_confirmation() {
        let mut app = app();
        app.flow.show(Screen::Dashboard);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.overlay, Overlay::ConfirmLogout);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.flow.current_screen(), Screen::Dashboard);

        press(&mut app, KeyCode::Char('L'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.flow.current_screen(), Screen::Login);
    }

    #[test]
    fn dashboard_digits_switch_views() {
        let mut app = app();
        app.flow.show(Screen::Dashboard);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.flow.dashboard().view, DashboardView::Map);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.flow.dashboard().map.as_ref().map(|m| m.zoom), Some(14));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.flow.dashboard().chart.as_ref().map(|c| c.range.id()),
            Some("7d")
        );
    }

    #[test]
    fn chat_enter_sends_buffer() {
        let mut app = app();
        app.flow.show(Screen::Dashboard);
        app.flow.open_chat(ConversationId::DrSmith).unwrap();
        type_str(&mut app, "hi there");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat_input.is_empty());
        assert_eq!(
            app.flow.session().chat.transcript(ConversationId::DrSmith).len(),
            1
        );
    }

    #[test]
    fn mouse_draws_on_signature_pad() {
        let mut app = app();
        app.flow.show(Screen::Submission);
        app.frame_area = Rect::new(0, 0, 100, 40);
        let pad = ui::submission::signature_inner(ui::main_area(app.frame_area));
        let mouse = |kind, column, row| MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), pad.x + 1, pad.y + 1),
        );
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Drag(MouseButton::Left), pad.x + 4, pad.y + 2),
        );
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Up(MouseButton::Left), pad.x + 4, pad.y + 2),
        );

        assert!(app.flow.signature().is_signed());
        assert_eq!(app.flow.signature().segments().count(), 1);
        assert!(!app.flow.signature().is_drawing());
    }
}
