use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
        {
            // ANSI colors 0-6 and 8 are typically dark backgrounds.
            if n > 6 && n != 8 {
                return Background::Light;
            }
        }
        Background::Dark
    }
}

/// A fully resolved theme: every color slot has a concrete `Color` value
/// (either from user config or from defaults for the detected background).
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_faint: Color,
    pub text_success: Color,
    pub text_warning: Color,
    pub text_error: Color,
    // Border
    pub border_primary: Color,
    pub border_faint: Color,
    // Action button accent
    pub accent: Color,
}

impl ResolvedTheme {
    /// Build a resolved theme from user config and detected background.
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Defaults::for_background(bg);
        let c = &theme.colors;
        Self {
            text_primary: c.text_primary.unwrap_or(d.text_primary),
            text_secondary: c.text_secondary.unwrap_or(d.text_secondary),
            text_faint: c.text_faint.unwrap_or(d.text_faint),
            text_success: c.text_success.unwrap_or(d.text_success),
            text_warning: c.text_warning.unwrap_or(d.text_warning),
            text_error: c.text_error.unwrap_or(d.text_error),
            border_primary: c.border_primary.unwrap_or(d.border_primary),
            border_faint: c.border_faint.unwrap_or(d.border_faint),
            accent: c.accent.unwrap_or(d.accent),
        }
    }
}

struct Defaults {
    text_primary: Color,
    text_secondary: Color,
    text_faint: Color,
    text_success: Color,
    text_warning: Color,
    text_error: Color,
    border_primary: Color,
    border_faint: Color,
    accent: Color,
}

impl Defaults {
    fn for_background(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                text_primary: Color::Ansi256(15),
                text_secondary: Color::Ansi256(7),
                text_faint: Color::Ansi256(8),
                text_success: Color::Ansi256(10),
                text_warning: Color::Ansi256(11),
                text_error: Color::Ansi256(9),
                border_primary: Color::Ansi256(7),
                border_faint: Color::Ansi256(8),
                accent: Color::Ansi256(14),
            },
            Background::Light => Self {
                text_primary: Color::Ansi256(0),
                text_secondary: Color::Ansi256(8),
                text_faint: Color::Ansi256(7),
                text_success: Color::Ansi256(2),
                text_warning: Color::Ansi256(3),
                text_error: Color::Ansi256(1),
                border_primary: Color::Ansi256(8),
                border_faint: Color::Ansi256(7),
                accent: Color::Ansi256(6),
            },
        }
    }
}
