//! MI_CARE theme tokens for the terminal front end
//!
//! Provides a consistent color palette:
//! - **Primary**: Care blue (focus, highlights, facilities)
//! - **Positive**: Health green (success, captured, verified)
//! - **Negative**: Alert red (errors, hotspots)
//! - **Warning**: Amber (emergencies, in-progress states)
//! - **Muted**: Slate (secondary text, hints)

use ratatui::style::{Color, Modifier, Style};

use micare_core::certification::CaptureState;
use micare_core::dashboard::MarkerKind;

/// MI_CARE palette.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Care blue (focus, highlights)
    pub accent: Color,
    /// Health green (success states)
    pub positive: Color,
    /// Alert red (errors, blocking alerts)
    pub negative: Color,
    /// Amber (warnings, processing)
    pub warning: Color,
    /// Deep navy (neutral info)
    pub neutral: Color,
    /// Slate (muted text, disabled)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mi_care()
    }
}

impl Theme {
    pub const fn mi_care() -> Self {
        Self {
            accent: Color::Rgb(0x34, 0x98, 0xdb),
            positive: Color::Rgb(0x2e, 0xcc, 0x71),
            negative: Color::Rgb(0xe7, 0x4c, 0x3c),
            warning: Color::Rgb(0xf3, 0x9c, 0x12),
            neutral: Color::Rgb(0x95, 0xa5, 0xc6),
            muted: Color::Rgb(0x7f, 0x8c, 0x8d),
            text_primary: Color::White,
        }
    }

    /// Color for a biometric capture button.
    pub fn capture_color(&self, state: CaptureState) -> Color {
        match state {
            CaptureState::Idle => self.accent,
            CaptureState::Processing => self.warning,
            CaptureState::Captured => self.positive,
        }
    }

    /// Color for a map marker.
    pub fn marker_color(&self, kind: MarkerKind) -> Color {
        rgb(kind.rgb())
    }
}

const THEME: Theme = Theme::mi_care();

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn theme() -> Theme {
    THEME
}

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

/// Highlight for the row under the cursor.
pub fn selected() -> Style {
    Style::default()
        .fg(THEME.text_primary)
        .bg(THEME.accent)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_colors_follow_state() {
        let theme = Theme::default();
        assert_eq!(theme.capture_color(CaptureState::Idle), theme.accent);
        assert_eq!(theme.capture_color(CaptureState::Processing), theme.warning);
        assert_eq!(theme.capture_color(CaptureState::Captured), theme.positive);
    }

    #[test]
    fn marker_colors_come_from_core() {
        let theme = Theme::default();
        assert_eq!(
            theme.marker_color(MarkerKind::Hotspot),
            Color::Rgb(0xe7, 0x4c, 0x3c)
        );
    }
}
