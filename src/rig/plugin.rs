//! Rig plugin - registers rig discovery.

use bevy::prelude::*;

use super::discovery::setup_rigs;

/// System set for rig discovery, so downstream systems can order after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RigSetupSet;

/// Rig plugin - discovers aim controllers for newly spawned rigs.
pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, setup_rigs.in_set(RigSetupSet));
    }
}
