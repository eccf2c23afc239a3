//! Errors surfaced by flow operations.

use thiserror::Error;

use crate::screen::Screen;

/// Errors from user actions on the flow controller.
///
/// The first three are shown to the user as a blocking alert. The rest are
/// silent no-ops in the UI and only reach the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please enter valid credentials (6-digit PIN required)")]
    InvalidCredentials,
    #[error("Please select at least one service")]
    NoServicesSelected,
    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
    #[error("no step with key {0}")]
    UnknownStep(u8),
    #[error("step {0} is not the active step")]
    StepNotActive(u8),
    #[error("action belongs to the {expected} screen but {actual} is shown")]
    NotOnScreen { expected: Screen, actual: Screen },
}

impl FlowError {
    /// Whether the front end should interrupt the user with this error.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidCredentials
                | FlowError::NoServicesSelected
                | FlowError::TermsNotAccepted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_messages_match_ui_copy() {
        assert_eq!(
            FlowError::InvalidCredentials.to_string(),
            "Please enter valid credentials (6-digit PIN required)"
        );
        assert!(FlowError::TermsNotAccepted.is_alert());
        assert!(!FlowError::UnknownStep(4).is_alert());
        let err = FlowError::NotOnScreen {
            expected: Screen::Chat,
            actual: Screen::Login,
        };
        assert_eq!(
            err.to_string(),
            "action belongs to the chat screen but login is shown"
        );
    }
}
