//! Application state: single-owner, main-thread only.
//!
//! The flow controller owns every piece of session state. This struct only
//! adds what the terminal needs on top: cursors, text buffers, overlays and
//! the status line.

use std::path::Path;

use ratatui::layout::Rect;
use tracing::warn;

use micare_core::certification::CertStep;
use micare_core::personal::{fields_for, FormField, PersonalStep};
use micare_core::{AppConfig, Flow, FlowError, Screen};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Blocking message, dismissed with any key.
    Alert(String),
    ConfirmLogout,
    Help,
    /// Path prompt standing in for the browser file chooser.
    FilePicker { step: CertStep, input: String },
}

/// Focused input on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Pin,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub pin: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Pin,
            LoginField::Pin => LoginField::Username,
        };
    }

    pub fn push(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Pin => {
                if self.pin.chars().count() < 6 {
                    self.pin.push(c);
                }
            }
        }
    }

    pub fn pop(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Pin => self.pin.pop(),
        };
    }
}

/// Top-level application state.
pub struct AppState {
    pub flow: Flow,
    pub running: bool,

    // Per-screen cursors and buffers
    pub login_form: LoginForm,
    pub role_cursor: usize,
    pub field_cursor: usize,
    pub service_cursor: usize,
    pub conversation_cursor: usize,
    pub chat_input: String,
    pub search_input: String,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,
    /// Area of the last drawn frame, used to map mouse positions.
    pub frame_area: Rect,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            flow: Flow::new(config),
            running: true,
            login_form: LoginForm::default(),
            role_cursor: 0,
            field_cursor: 0,
            service_cursor: 0,
            conversation_cursor: 0,
            chat_input: String::new(),
            search_input: String::new(),
            status_message: None,
            overlay: Overlay::None,
            frame_area: Rect::default(),
        }
    }

    /// Advance the flow clock. Clears screen-local buffers when the screen
    /// changed underneath us.
    pub fn tick(&mut self, now_ms: u64) {
        let before = self.flow.current_screen();
        if self.flow.tick(now_ms) > 0 {
            let after = self.flow.current_screen();
            if before != after {
                self.on_screen_changed(after);
            }
        }
    }

    /// Reset cursors that belong to a screen that was just entered.
    pub fn on_screen_changed(&mut self, screen: Screen) {
        match screen {
            Screen::Login => self.login_form = LoginForm::default(),
            Screen::PersonalData => self.field_cursor = 0,
            Screen::Chat => self.chat_input.clear(),
            _ => {}
        }
    }

    /// Route a flow error to the user: blocking alert or a warning line.
    pub fn report(&mut self, err: FlowError) {
        if err.is_alert() {
            self.overlay = Overlay::Alert(err.to_string());
        } else {
            warn!(%err, "action ignored");
            self.set_warning(err.to_string());
        }
    }

    /// Fields shown on the current personal-data step.
    pub fn visible_fields(&self) -> Vec<&'static FormField> {
        fields_for(self.flow.personal_step()).collect()
    }

    pub fn focused_field(&self) -> Option<&'static FormField> {
        self.visible_fields().get(self.field_cursor).copied()
    }

    /// Apply `edit` to the value of the focused personal-data field.
    pub fn edit_field(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self
            .flow
            .session()
            .personal_data
            .get(field.name)
            .unwrap_or_default()
            .to_string();
        edit(&mut value);
        if let Err(err) = self.flow.set_field(field.name, value) {
            self.report(err);
        }
    }

    /// Record the file at `path` for an upload step.
    pub fn pick_file(&mut self, step: CertStep, path: &str) {
        let path = Path::new(path.trim());
        let size = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                self.set_warning(format!("Not a file: {}", path.display()));
                return;
            }
            Err(err) => {
                self.set_error(format!("Cannot read {}: {err}", path.display()));
                return;
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match self.flow.select_file(step, name.clone(), size) {
            Ok(()) => self.set_status(format!("Uploaded {name}")),
            Err(err) => self.report(err),
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

/// Whether a screen captures printable keys as text.
pub fn takes_text(screen: Screen, step: PersonalStep) -> bool {
    match screen {
        Screen::Login | Screen::Chat => true,
        Screen::PersonalData => step != PersonalStep::Review,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        AppState::new(&AppConfig::default())
    }

    #[test]
    fn pin_is_capped_at_six() {
        let mut form = LoginForm::default();
        form.toggle_focus();
        for c in "12345678".chars() {
            form.push(c);
        }
        assert_eq!(form.pin, "123456");
        form.pop();
        assert_eq!(form.pin, "12345");
        assert!(form.username.is_empty());
    }

    #[test]
    fn alert_errors_open_overlay() {
        let mut app = app();
        app.report(FlowError::NoServicesSelected);
        assert_eq!(
            app.overlay,
            Overlay::Alert("Please select at least one service".into())
        );
    }

    #[test]
    fn other_errors_only_warn() {
        let mut app = app();
        app.report(FlowError::StepNotActive(2));
        assert_eq!(app.overlay, Overlay::None);
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Warning))
        ));
    }

    #[test]
    fn editing_fields_writes_through_to_session() {
        let mut app = app();
        app.flow.show(Screen::PersonalData);
        app.edit_field(|v| v.push_str("Amina"));
        app.edit_field(|v| {
            v.pop();
        });
        assert_eq!(
            app.flow.session().personal_data.get("full_name"),
            Some("Amin")
        );
    }

    #[test]
    fn missing_file_is_an_error_line() {
        let mut app = app();
        app.flow.show(Screen::Certification);
        app.pick_file(CertStep::IdentityDocument, "/definitely/not/here.pdf");
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Error))
        ));
        assert_eq!(app.flow.session().certification.document_count(), 0);
    }

    #[test]
    fn screen_change_from_timer_resets_login_form() {
        let mut app = app();
        app.login_form.username = "stale".into();
        app.tick(3000);
        assert_eq!(app.flow.current_screen(), Screen::Login);
        assert!(app.login_form.username.is_empty());
    }
}
