//! Wheel settings and presets
//!
//! Persisted in LocalStorage on the web; read from a JSON file on native.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WheelError;
use crate::wheel::SpinConfig;

/// Which of the application's wheels these settings tune
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WheelPreset {
    /// Plain random pick over places
    #[default]
    Places,
    /// Likes-weighted pick over a group's activities
    Activities,
}

impl WheelPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelPreset::Places => "places",
            WheelPreset::Activities => "activities",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "places" | "place" => Some(WheelPreset::Places),
            "activities" | "activity" => Some(WheelPreset::Activities),
            _ => None,
        }
    }

    /// Spin tuning for this preset
    pub fn spin_config(&self) -> SpinConfig {
        match self {
            WheelPreset::Places => SpinConfig::default(),
            WheelPreset::Activities => SpinConfig {
                min_velocity: 0.3,
                max_velocity: 0.5,
                decay_factor: 0.992,
                stop_threshold: 0.0003,
            },
        }
    }
}

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    pub preset: WheelPreset,
    /// Spin tuning (starts from the preset, may be overridden)
    pub spin: SpinConfig,
    /// Draw candidate labels on the wedges
    #[serde(default = "default_true")]
    pub show_labels: bool,
    /// Number of past decisions to keep
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    crate::history::MAX_DECISIONS
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self::from_preset(WheelPreset::default())
    }
}

impl WheelSettings {
    /// Create settings from a preset (applies preset spin tuning)
    pub fn from_preset(preset: WheelPreset) -> Self {
        Self {
            preset,
            spin: preset.spin_config(),
            show_labels: true,
            history_size: default_history_size(),
        }
    }

    /// Switch preset, replacing spin tuning with the preset's
    pub fn apply_preset(&mut self, preset: WheelPreset) {
        self.preset = preset;
        self.spin = preset.spin_config();
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.spin.validate()?;
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rendezvous_wheel_settings";

    /// Environment variable naming a settings file (native only)
    pub const SETTINGS_ENV: &'static str = "RENDEZVOUS_WHEEL_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
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

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `RENDEZVOUS_WHEEL_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::SETTINGS_ENV) {
            Some(path) => Self::load_from_path(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Read a settings file, falling back to defaults if it is missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
