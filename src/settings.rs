//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A boolean preference the player can flip while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Hitboxes,
    Fps,
    HighContrast,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visuals ===
    /// Override for how much larger sprites draw than their hitbox
    pub sprite_padding: Option<f32>,
    /// Outline every hitbox on top of the sprites
    pub show_hitboxes: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sprite_padding: None,
            show_hitboxes: false,
            show_fps: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Sprite scale in force, never below 1.0
    pub fn padding_factor(&self, tuning: &Tuning) -> f32 {
        self.sprite_padding.unwrap_or(tuning.sprite_padding).max(1.0)
    }

    /// Flip one preference. Returns its new value.
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let flag = match which {
            Toggle::Hitboxes => &mut self.show_hitboxes,
            Toggle::Fps => &mut self.show_fps,
            Toggle::HighContrast => &mut self.high_contrast,
        };
        *flag = !*flag;
        log::info!("{:?} {}", which, if *flag { "on" } else { "off" });
        *flag
    }

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dino_dash_settings";

    /// Load settings from LocalStorage
    pub fn load() -> Self {
        match crate::platform::storage::get_item(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if crate::platform::storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
