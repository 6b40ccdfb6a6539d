//! Presentation preferences
//!
//! Kept in memory for the lifetime of the page.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Page color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Body class applied while this theme is active
    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark-mode"),
        }
    }

    /// Label for the toggle button, naming the theme it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "🌙 Toggle Dark Mode",
            Theme::Dark => "🌞 Toggle Light Mode",
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    /// Difficulty used by the next start
    pub difficulty: Difficulty,
}

impl Settings {
    /// Switch theme and return the new toggle label
    pub fn toggle_theme(&mut self) -> &'static str {
        self.theme = self.theme.toggled();
        log::debug!("Theme: {}", self.theme.as_str());
        self.theme.toggle_label()
    }

    /// Select difficulty by name, keeping the current one for unknown names
    pub fn select_difficulty(&mut self, name: &str) -> Difficulty {
        match Difficulty::from_str(name) {
            Some(d) => self.difficulty = d,
            None => log::warn!("Unknown difficulty '{}', keeping {}", name, self.difficulty.as_str()),
        }
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_theme() {
        let mut settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.toggle_theme(), "🌞 Toggle Light Mode");
        assert_eq!(settings.theme.body_class(), Some("dark-mode"));
        assert_eq!(settings.toggle_theme(), "🌙 Toggle Dark Mode");
        assert_eq!(settings.theme.body_class(), None);
    }

    #[test]
    fn test_select_difficulty() {
        let mut settings = Settings::default();
        // Unknown names keep the current choice, which starts out as easy
        assert_eq!(settings.select_difficulty("nightmare"), Difficulty::Easy);
        assert_eq!(settings.select_difficulty("hard"), Difficulty::Hard);
        assert_eq!(settings.select_difficulty("bogus"), Difficulty::Hard);
    }
}
