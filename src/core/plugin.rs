//! Core plugin that sets up events and settings.

use bevy::prelude::*;

use super::data::{load_lookat_settings, LookAtSettings};
use super::events::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Global events (LookAtRequest, LookAtDenied, RigStructureChanged)
/// - The RON-loaded look-at settings resource
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Register global events
            .add_event::<LookAtRequest>()
            .add_event::<LookAtDenied>()
            .add_event::<RigStructureChanged>()
            // Settings with their on-disk overrides
            .init_resource::<LookAtSettings>()
            .add_systems(Startup, load_lookat_settings);
    }
}
