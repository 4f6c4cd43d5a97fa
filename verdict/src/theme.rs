//! Color theme system for verdict.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! verdict renders. Two built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors, works on any terminal including SSH sessions
//!   without truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

use verdict_core::Decision;

/// All color values used across verdict's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the focused panel (record list, or search field while typing).
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Decisions
    pub accepted: Color,
    pub rejected: Color,
    pub undecided: Color,

    // Record list
    /// Foreground of the row under the cursor.
    pub selection: Color,
    /// Secondary text: labels, placeholders, token counts.
    pub muted: Color,

    // Header
    /// Progress gauge fill.
    pub gauge: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color while the search field has focus.
    pub status_mode_search: Color,
    /// Notification text for successful operations.
    pub notice_info: Color,
    /// Notification text for failed imports/exports.
    pub notice_error: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            accepted: Color::Green,
            rejected: Color::Red,
            undecided: Color::DarkGray,

            selection: Color::Cyan,
            muted: Color::DarkGray,

            gauge: Color::Green,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_search: Color::Yellow,
            notice_info: Color::Green,
            notice_error: Color::LightRed,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let teal = Color::Rgb(148, 226, 213); // #94e2d5

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            accepted: green,
            rejected: red,
            undecided: overlay1,

            selection: lavender,
            muted: overlay1,

            gauge: teal,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_search: yellow,
            notice_info: green,
            notice_error: red,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Color used for a decision mark or badge.
    pub fn decision(&self, decision: Decision) -> Color {
        match decision {
            Decision::Accepted => self.accepted,
            Decision::Rejected => self.rejected,
            Decision::Undecided => self.undecided,
        }
    }
}
