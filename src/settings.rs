//! Window, asset, and timing configuration
//!
//! Loaded from an optional JSON file next to the binary. A missing or
//! malformed file falls back to defaults so the game always starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window title
    pub title: String,
    /// Playfield width in pixels
    pub width: u32,
    /// Playfield height in pixels
    pub height: u32,

    // === Assets ===
    // Decoded once at startup; a failed load degrades to a flat color.
    pub background_image: String,
    pub player_image: String,
    pub projectile_image: String,

    // === Timing ===
    /// Milliseconds between timed projectile releases
    pub release_interval_ms: u64,
    /// Milliseconds of breather after a cleared wave
    pub wave_pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Bubble Blaster".to_string(),
            width: 450,
            height: 800,
            background_image: "graphics/scene.jpg".to_string(),
            player_image: "graphics/player.png".to_string(),
            projectile_image: "graphics/projectile.png".to_string(),
            release_interval_ms: 150,
            wave_pause_ms: 2500,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
