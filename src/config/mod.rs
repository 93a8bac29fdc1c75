use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// User-facing display preferences. Each field is persisted in its own slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub currency: Currency,
    #[serde(default = "Preferences::default_dark_mode")]
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            dark_mode: Self::default_dark_mode(),
        }
    }
}

impl Preferences {
    pub fn default_dark_mode() -> bool {
        true
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "on" => Some(Theme::Dark),
            "light" | "off" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}
