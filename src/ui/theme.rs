//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the colour palettes used by the renderer, supporting
//! the two built-in themes and custom themes loaded from TOML files. It also
//! provides the hex to ANSI conversions the components use.
//!
//! # Built-in Themes
//!
//! - `light`: white background, black text (default when nothing is saved)
//! - `dark`: near-black background, white text
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! background = "#FFFFFF"
//! text = "#000000"
//! text_secondary = "#6B7280"
//! text_tertiary = "#9CA3AF"
//! card_background = "#E5E7EB"
//! border = "#E5E7EB"
//! primary = "#0080FF"
//! error = "#EF4444"
//! success = "#22C55E"
//! warning = "#F59E0B"
//! icon = "#6B7280"
//! highlight = "#E5E7EB"
//! placeholder = "#9CA3AF"
//! teal_accent = "#14B8A6"
//! selection_fg = "#FFFFFF"
//! selection_bg = "#0080FF"
//! match_highlight_fg = "#000000"
//! match_highlight_bg = "#F59E0B"
//! ```
//!
//! # Example
//!
//! ```rust
//! use dinedeck::ui::theme::{Theme, ThemeMode};
//!
//! let theme = Theme::for_mode(ThemeMode::Dark);
//! println!("{}", Theme::fg(&theme.colors.text));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{DineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Light or dark colour scheme, persisted under the `theme` preference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses `"light"` or `"dark"` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colour scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Colour palette for all UI elements.
    pub colors: ThemeColors,
}

/// Colour tokens. All colours are hex strings such as `"#0080FF"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub background: String,
    pub text: String,
    pub text_secondary: String,
    pub text_tertiary: String,
    pub card_background: String,
    pub border: String,
    pub primary: String,
    pub error: String,
    pub success: String,
    pub warning: String,
    pub icon: String,
    pub highlight: String,
    pub placeholder: String,
    pub teal_accent: String,

    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`light` or `dark`).
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Built-in theme for a mode.
    ///
    /// # Panics
    ///
    /// Panics if a built-in theme fails to parse (covered by tests).
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::from_name(mode.as_str()).expect("Built-in themes should always parse")
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DineError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DineError::Config(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| DineError::Config(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex colour to RGB. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        let light = Theme::for_mode(ThemeMode::Light);
        let dark = Theme::for_mode(ThemeMode::Dark);
        assert_eq!(light.colors.background, "#FFFFFF");
        assert_eq!(dark.colors.background, "#121212");
        assert_eq!(dark.colors.teal_accent, "#0D9488");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn mode_parse_and_toggle() {
        assert_eq!(ThemeMode::parse(" Dark "), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle().as_str(), "light");
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#0080FF"), "\u{001b}[38;2;0;128;255m");
        assert_eq!(Theme::bg("zzz"), "\u{001b}[48;2;255;255;255m");
    }

    #[test]
    fn custom_theme_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        let mut theme = Theme::for_mode(ThemeMode::Dark);
        theme.name = "mine".into();
        std::fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(DineError::Config(_))
        ));
    }
}
