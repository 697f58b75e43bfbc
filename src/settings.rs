//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; the native runner reads them from
//! an optional JSON file.

use serde::{Deserialize, Serialize};

use crate::consts::NARRATION_DELAY_MS;
use crate::narration::Language;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Narration ===
    /// Spoken score announcements silenced
    pub narration_muted: bool,
    /// Announcement language (also used for HUD labels)
    pub narration_language: Language,
    /// Delay between a point and its announcement (ms)
    pub narration_delay_ms: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            narration_muted: false,
            narration_language: Language::PtBr,
            narration_delay_ms: NARRATION_DELAY_MS,

            master_volume: 0.8,
            sfx_volume: 1.0,

            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Ignoring malformed settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Clamp out-of-range values
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        if !self.narration_delay_ms.is_finite() || self.narration_delay_ms < 0.0 {
            self.narration_delay_ms = NARRATION_DELAY_MS;
        }
        self
    }

    /// Apply command-line overrides. An unknown language tag keeps the
    /// current language.
    pub fn with_overrides(mut self, muted: bool, language: Option<&str>) -> Self {
        if muted {
            self.narration_muted = true;
        }
        if let Some(tag) = language {
            match Language::from_tag(tag) {
                Some(language) => self.narration_language = language,
                None => log::warn!(
                    "Unknown language {tag:?}, keeping {}",
                    self.narration_language.tag()
                ),
            }
        }
        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
            match storage.set_item(Self::STORAGE_KEY, &self.to_json()) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {e:?}"),
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(Self::from_json(&json))
    }
}
