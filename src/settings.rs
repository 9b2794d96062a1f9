use crate::CONFY_APP_NAME;
use crate::gloss::DEFAULT_GLOSSES;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::time::Duration;

fn load_section<T: Default + Serialize + DeserializeOwned>(section: &str) -> T {
    confy::load(CONFY_APP_NAME, section).unwrap_or_else(|e| {
        log::warn!("Failed to load '{}' settings, using defaults: {}", section, e);
        T::default()
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Local directory or http(s) URL every asset path is resolved against.
    pub base: String,
    pub avatar_file: String,
    pub animations_dir: String,
    pub glosses: Vec<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            base: "assets".to_string(),
            avatar_file: "avatar.glb".to_string(),
            animations_dir: "animations".to_string(),
            glosses: DEFAULT_GLOSSES.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl AssetSettings {
    pub fn load() -> Self {
        load_section("assets")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Extra time a clamped final pose is held before the next gloss starts.
    pub hold_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            hold_ms: 300,
            frame_interval_ms: 16,
        }
    }
}

impl PlaybackSettings {
    pub fn load() -> Self {
        load_section("playback")
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Procedural wave played when no clip is registered for a gloss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackSettings {
    pub amplitude: f32,
    pub phase_step: f32,
    pub phase_limit: f32,
    pub tick_ms: u64,
    pub advance_ms: u64,
    /// Joints tried in order; the placeholder arm is always the last resort.
    pub joint_candidates: Vec<String>,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            amplitude: 0.6,
            phase_step: 0.2,
            phase_limit: 2.5,
            tick_ms: 30,
            advance_ms: 900,
            joint_candidates: vec![
                "RightArm".to_string(),
                "mixamorig:RightArm".to_string(),
                "right_arm".to_string(),
            ],
        }
    }
}

impl FallbackSettings {
    pub fn load() -> Self {
        load_section("fallback")
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn advance(&self) -> Duration {
        Duration::from_millis(self.advance_ms)
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub assets: AssetSettings,
    pub playback: PlaybackSettings,
    pub fallback: FallbackSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            assets: AssetSettings::load(),
            playback: PlaybackSettings::load(),
            fallback: FallbackSettings::load(),
        }
    }
}
