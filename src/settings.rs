//! Game settings and preferences
//!
//! Stored as JSON next to the executable (or wherever the host chooses).
//! Gameplay tuning lives in `consts`; this is only what a player may change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Action;

/// Key codes bound to each action (DOM `KeyboardEvent.code` names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
    pub sleep: Vec<String>,
    pub float: Vec<String>,
    pub restart: Vec<String>,
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: codes(&["ArrowLeft", "KeyA"]),
            right: codes(&["ArrowRight", "KeyD"]),
            jump: codes(&["Space", "KeyZ", "ArrowUp", "KeyW"]),
            sleep: codes(&["ShiftLeft", "ShiftRight", "KeyX"]),
            float: codes(&["KeyC", "KeyF"]),
            restart: codes(&["KeyR"]),
        }
    }
}

impl KeyBindings {
    /// Codes bound to an action
    pub fn codes(&self, action: Action) -> &[String] {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
            Action::Sleep => &self.sleep,
            Action::Float => &self.float,
            Action::Restart => &self.restart,
        }
    }

    /// Action a key code triggers, if any (first binding wins)
    pub fn action_for(&self, code: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.codes(action).iter().any(|c| c == code))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Skip camera shake and the wake-up flicker
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
