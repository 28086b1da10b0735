//! Game settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web; native builds start from the
//! defaults and take overrides from the environment.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYER_NAME, DEFAULT_TARGET_SCORE};
use crate::sim::TargetScore;

pub const ENV_TARGET_SCORE: &str = "SMASH_PONG_TARGET_SCORE";
pub const ENV_PLAYER_NAME: &str = "SMASH_PONG_PLAYER_NAME";
pub const ENV_API_URL: &str = "SMASH_PONG_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Player preferences and match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Total points that end a match (minimum enforced by [`Settings::target`])
    pub target_score: u32,
    pub player_name: String,
    /// Leaderboard service root
    pub api_base_url: String,

    // === Audio ===
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sound_enabled: true,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Target score with the minimum applied
    pub fn target(&self) -> TargetScore {
        TargetScore::new(self.target_score)
    }

    /// Store a committed target score, raising it to the minimum
    pub fn set_target_score(&mut self, value: u32) {
        self.target_score = TargetScore::new(value).get();
    }

    /// Volume to play at, zero when sound is off
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply overrides from a key lookup (the process environment natively)
    ///
    /// Unparseable or empty values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_TARGET_SCORE) {
            match value.trim().parse::<u32>() {
                Ok(target) => self.set_target_score(target),
                Err(_) => log::warn!("{ENV_TARGET_SCORE}={value:?} is not a number, ignoring"),
            }
        }
        if let Some(value) = lookup(ENV_PLAYER_NAME) {
            if value.trim().is_empty() {
                log::warn!("{ENV_PLAYER_NAME} is blank, ignoring");
            } else {
                self.player_name = value.trim().to_string();
            }
        }
        if let Some(value) = lookup(ENV_API_URL) {
            if value.starts_with("http://") || value.starts_with("https://") {
                self.api_base_url = value;
            } else {
                log::warn!("{ENV_API_URL}={value:?} is not an http(s) URL, ignoring");
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "smash_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.set_target_score(settings.target_score);
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Discarding stored settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to write settings to LocalStorage");
            } else {
                log::info!("Settings saved");
            }
        }
    }

    /// Defaults plus environment overrides
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // Nothing to persist natively
    }
}
