//! Top-level screens and the exclusive screen router.

use std::fmt;
use std::str::FromStr;

/// One of the mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Splash,
    Login,
    Signup,
    PersonalData,
    Certification,
    Services,
    Submission,
    Validation,
    Dashboard,
    Chat,
}

impl Screen {
    pub const ALL: [Screen; 10] = [
        Screen::Splash,
        Screen::Login,
        Screen::Signup,
        Screen::PersonalData,
        Screen::Certification,
        Screen::Services,
        Screen::Submission,
        Screen::Validation,
        Screen::Dashboard,
        Screen::Chat,
    ];

    /// Identifier used by navigation targets (`showScreen('personalData')`).
    pub fn id(self) -> &'static str {
        match self {
            Screen::Splash => "splash",
            Screen::Login => "login",
            Screen::Signup => "signup",
            Screen::PersonalData => "personalData",
            Screen::Certification => "certification",
            Screen::Services => "services",
            Screen::Submission => "submission",
            Screen::Validation => "validation",
            Screen::Dashboard => "dashboard",
            Screen::Chat => "chat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Screen::Splash => "MI_CARE",
            Screen::Login => "Login",
            Screen::Signup => "Choose Your Role",
            Screen::PersonalData => "Personal Data",
            Screen::Certification => "Certification",
            Screen::Services => "Services",
            Screen::Submission => "Submission",
            Screen::Validation => "Validation",
            Screen::Dashboard => "Dashboard",
            Screen::Chat => "Chat",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a screen identifier is not in the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// Screen visibility. The current screen is the single source of truth;
/// "active" for every other screen is derived from it.
#[derive(Debug, Clone)]
pub struct ScreenRouter {
    current: Screen,
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self::new(Screen::Splash)
    }
}

impl ScreenRouter {
    pub fn new(initial: Screen) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_active(&self, screen: Screen) -> bool {
        self.current == screen
    }

    /// Every screen currently marked active. Always exactly one element.
    pub fn active_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|s| self.is_active(*s))
            .collect()
    }

    /// Activate `screen`, returning the screen that was left.
    pub fn show(&mut self, screen: Screen) -> Screen {
        let previous = self.current;
        self.current = screen;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for screen in Screen::ALL {
            assert_eq!(screen.id().parse::<Screen>(), Ok(screen));
        }
        assert!("map".parse::<Screen>().is_err());
    }

    #[test]
    fn show_keeps_exactly_one_active() {
        let mut router = ScreenRouter::default();
        assert_eq!(router.active_screens(), vec![Screen::Splash]);

        let left = router.show(Screen::Services);
        assert_eq!(left, Screen::Splash);
        assert_eq!(router.active_screens(), vec![Screen::Services]);
        assert!(!router.is_active(Screen::Splash));
    }
}
