//! Look-at settings loading from RON.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tunable look-at settings, loaded from `assets/data/lookat.ron`.
///
/// Characters spawned by game code use these as their authored defaults;
/// per-rig values live on [`crate::rig::LookAtRig`].
#[derive(Resource, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LookAtSettings {
    /// Distance to the base target below which a rig engages, world units.
    pub trigger_distance: f32,
    /// Master switch for proximity-driven looking.
    pub enabled: bool,
    /// Default hold duration for explicit look requests, seconds.
    pub look_duration: f32,
    /// Default engage transition speed for look requests, seconds.
    pub engage_speed: f32,
    /// Default release transition speed for look requests, seconds.
    pub release_speed: f32,
}

impl Default for LookAtSettings {
    fn default() -> Self {
        Self {
            trigger_distance: 5.0,
            enabled: true,
            look_duration: super::events::DEFAULT_LOOK_DURATION,
            engage_speed: super::events::DEFAULT_ENGAGE_SPEED,
            release_speed: super::events::DEFAULT_RELEASE_SPEED,
        }
    }
}

/// Load look-at settings from the assets directory, falling back to defaults.
pub fn load_lookat_settings(mut settings: ResMut<LookAtSettings>) {
    let path = Path::new("assets/data/lookat.ron");

    if !path.exists() {
        warn!("Look-at settings file not found: {path:?}, using defaults");
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<LookAtSettings>(&contents) {
            Ok(loaded) => {
                info!("Loaded look-at settings: {loaded:?}");
                *settings = loaded;
            }
            Err(err) => {
                warn!("Failed to parse {path:?}: {err}, using defaults");
            }
        },
        Err(err) => {
            warn!("Failed to read {path:?}: {err}, using defaults");
        }
    }
}
