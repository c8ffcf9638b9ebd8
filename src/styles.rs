//! Theme and style system for cinedk
//!
//! One global palette, chosen at startup from the config (or `NO_COLOR`),
//! read by every component through [`theme`].

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::RwLock;

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

/// Global theme instance (supports runtime updates)
static THEME: RwLock<Theme> = RwLock::new(Theme::DARK);

/// Install the palette for `theme_type`.
pub fn init_theme(theme_type: ThemeType) {
    // A poisoned lock still holds a valid palette; overwrite it anyway.
    let mut guard = THEME.write().unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME
        .read()
        .map_or_else(|poisoned| poisoned.into_inner().clone(), |t| t.clone())
}

/// Theme type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (equivalent to `NO_COLOR=1`)
    #[serde(alias = "no-color", alias = "no_color")]
    NoColor,
}

impl FromStr for ThemeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeType::Dark),
            "light" => Ok(ThemeType::Light),
            "nocolor" | "no-color" | "no_color" => Ok(ThemeType::NoColor),
            other => Err(format!("unknown theme '{}' (dark, light, nocolor)", other)),
        }
    }
}

/// Color palette for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub theme_type: ThemeType,

    // === Accents ===
    /// Titles, focused borders, the drawer's active entry
    pub primary: Color,
    /// Card titles
    pub secondary: Color,

    // === Semantic Colors ===
    pub success: Color,
    pub error: Color,

    // === Text Colors ===
    pub text: Color,
    pub text_muted: Color,
    /// Key hints, field values under focus
    pub text_emphasis: Color,

    // === UI Colors ===
    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    pub background: Color,
}

impl Theme {
    const DARK: Theme = Theme {
        theme_type: ThemeType::Dark,
        primary: Color::Rgb(255, 140, 0),
        secondary: Color::Rgb(120, 170, 255),
        success: Color::Green,
        error: Color::Red,
        text: Color::White,
        text_muted: Color::DarkGray,
        text_emphasis: Color::Rgb(255, 200, 90),
        border: Color::DarkGray,
        border_focused: Color::Rgb(255, 140, 0),
        highlight_bg: Color::Rgb(20, 30, 60),
        background: Color::Reset,
    };

    const LIGHT: Theme = Theme {
        theme_type: ThemeType::Light,
        primary: Color::Rgb(200, 90, 0),
        secondary: Color::Rgb(20, 40, 110),
        success: Color::Green,
        error: Color::Red,
        text: Color::Black,
        text_muted: Color::DarkGray,
        text_emphasis: Color::Rgb(20, 40, 110),
        border: Color::DarkGray,
        border_focused: Color::Rgb(200, 90, 0),
        highlight_bg: Color::Gray,
        background: Color::Reset,
    };

    const NO_COLOR: Theme = Theme {
        theme_type: ThemeType::NoColor,
        primary: Color::Reset,
        secondary: Color::Reset,
        success: Color::Reset,
        error: Color::Reset,
        text: Color::Reset,
        text_muted: Color::Reset,
        text_emphasis: Color::Reset,
        border: Color::Reset,
        border_focused: Color::Reset,
        highlight_bg: Color::Reset,
        background: Color::Reset,
    };

    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::DARK,
            ThemeType::Light => Self::LIGHT,
            ThemeType::NoColor => Self::NO_COLOR,
        }
    }

    fn plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    // === Style Helpers ===

    pub fn title_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn card_title_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        if self.plain() {
            return Style::default();
        }
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::DIM);
        }
        Style::default().fg(self.text_muted)
    }

    /// Key names in hints, focused values
    pub fn emphasis_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.text_emphasis)
    }

    pub fn error_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.error)
    }

    pub fn border_focused_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        Style::default().fg(self.border_focused)
    }

    pub fn border_style(&self) -> Style {
        if self.plain() {
            return Style::default();
        }
        Style::default().fg(self.border)
    }

    /// Selected row in lists and the focused form field
    pub fn highlight_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn background_style(&self) -> Style {
        if self.plain() {
            return Style::default();
        }
        Style::default().bg(self.background)
    }
}
