//! MI_CARE Core: headless onboarding and dashboard flow.
//!
//! This crate holds everything the front end drives:
//! - Exclusive screen router and nested step wizards
//! - Session data (user, role, personal data, documents, services)
//! - Simulated backend delays as cancellable tasks on a logical clock
//! - Validation sequence, chat transcripts, notifications, dashboard state

pub mod certification;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flow;
pub mod notifications;
pub mod personal;
pub mod scheduler;
pub mod screen;
pub mod session;
pub mod signature;
pub mod validation;
pub mod wizard;

pub use config::{AppConfig, ConfigError, Timings};
pub use error::FlowError;
pub use flow::{Flow, FlowTask, LoginBiometric, SubmissionSummary};
pub use screen::{Screen, ScreenRouter};
pub use session::{Role, Session, User};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the flow can be moved to another thread.
    #[allow(dead_code)]
    fn assert_send() {
        fn require_send<T: Send>() {}

        require_send::<Flow>();
        require_send::<Session>();
        require_send::<FlowError>();
        require_send::<ConfigError>();
    }
}
