//! Color themes and ANSI escape sequence generation.
//!
//! Four Catppuccin flavours are compiled in; a custom theme can be loaded
//! from a TOML file with the same shape.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha` (default)
//! - `catppuccin-latte`
//! - `catppuccin-frappe`
//! - `catppuccin-macchiato`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! bookmark_fg = "#fab387"
//! ```

use crate::domain::error::{LibrisError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header and column-header text.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, labels and disabled controls.
    pub text_dim: String,

    pub border: String,

    /// Input box border while the field has focus.
    pub search_bar_border: String,
    /// Bookmark filter match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Search errors and failed bookmark writes.
    pub error_fg: String,

    /// The ★ marker on bookmarked rows.
    pub bookmark_fg: String,
}

impl Theme {
    /// Looks up a built-in theme. `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| LibrisError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| LibrisError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Picks the theme for the given configuration.
    ///
    /// A readable `file` wins over `name`; an unknown name or a broken file
    /// falls back to the default theme with a warning.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "custom theme unusable, falling back"),
            }
        }

        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = %name, "unknown theme name, falling back");
        }

        Self::default()
    }

    /// Parses `#rrggbb`. Malformed colors render as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
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

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Mocha palette built in code, used only if the embedded TOML fails to
    /// parse.
    fn fallback() -> Self {
        let c = |s: &str| s.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: c("#cdd6f4"),
                header_bg: None,
                selection_fg: c("#1e1e2e"),
                selection_bg: c("#f5c2e7"),
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                search_bar_border: c("#f5c2e7"),
                match_highlight_fg: c("#1e1e2e"),
                match_highlight_bg: c("#f9e2af"),
                empty_state_fg: c("#89b4fa"),
                error_fg: c("#f38ba8"),
                bookmark_fg: c("#fab387"),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn embedded_default_matches_fallback() {
        assert_eq!(Theme::default(), Theme::fallback());
    }

    #[test]
    fn unknown_name_resolves_to_default() {
        assert_eq!(Theme::resolve(Some("solarized"), None).name, DEFAULT_THEME);
    }

    #[test]
    fn custom_file_wins_and_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        let mut custom = Theme::fallback();
        custom.name = "custom".to_string();
        fs::write(&good, toml::to_string(&custom).unwrap()).unwrap();

        let theme = Theme::resolve(Some("catppuccin-latte"), Some(&good));
        assert_eq!(theme.name, "custom");

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "name = ").unwrap();
        assert!(matches!(Theme::from_file(&broken), Err(LibrisError::Theme(_))));
        assert_eq!(Theme::resolve(Some("catppuccin-latte"), Some(&broken)).name, "catppuccin-latte");
    }

    #[test]
    fn escapes_from_hex() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }
}
