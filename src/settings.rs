//! Runtime settings
//!
//! Persisted in LocalStorage on the web and as a JSON file for native tools.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::server::ServerConfig;

/// Settings shared by the browser build and the native tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root seed for world generation
    pub world_seed: u64,

    // === Visual Effects ===
    /// Particle effects (sparks, rain, ...)
    pub particles: bool,
    /// Weather rain emitter
    pub rain: bool,

    // === Accessibility ===
    /// Reduced motion (no ambient weather particles)
    pub reduced_motion: bool,

    /// Dev server options
    #[cfg(not(target_arch = "wasm32"))]
    pub server: ServerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_seed: 0,

            particles: true,
            rain: true,

            reduced_motion: false,

            #[cfg(not(target_arch = "wasm32"))]
            server: ServerConfig::default(),
        }
    }
}

impl Settings {
    /// Effective rain toggle (respects particles and reduced_motion)
    pub fn effective_rain(&self) -> bool {
        self.particles && self.rain && !self.reduced_motion
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "seedfx_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_rain() {
        let mut settings = Settings::default();
        assert!(settings.effective_rain());
        settings.reduced_motion = true;
        assert!(!settings.effective_rain());
        settings.reduced_motion = false;
        settings.particles = false;
        assert!(!settings.effective_rain());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"world_seed": 42, "server": {"port": 9000}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.world_seed, 42);
        assert!(settings.rain);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.index, "index.html");
    }

    #[test]
    fn test_file_round_trip_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load_from(&path), Settings::default());

        let settings = Settings {
            world_seed: 7,
            rain: false,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
