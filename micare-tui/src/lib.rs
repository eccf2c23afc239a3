//! MI_CARE TUI - terminal front end for the onboarding flow
//!
//! Renders every screen of the flow controller and maps keys and mouse
//! events onto its operations:
//! - Login, signup and the personal-data and certification wizards
//! - Services, submission with a mouse-drawn signature, validation
//! - Dashboard views, notifications, search and chat

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::{handle_key, handle_mouse};
pub use theme::Theme;
