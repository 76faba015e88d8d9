//! gaze-rig - procedural look-at weight orchestration for character rigs.
//!
//! Blends a set of aim-constraint weights at runtime so a character's head
//! and body smoothly turn to face a target, then smoothly release back to
//! the authored animation. The crate owns the weight bookkeeping only; an
//! external constraint evaluator reads each joint's weights and targets
//! every frame to produce the final pose.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Cross-system events, RON-loaded settings
//! - **Rig**: Aim controller data model, rig discovery, error types
//! - **Look**: Proximity trigger, weight fade, target blend
//!
//! Two transitions cooperate on the same joints without coordination
//! because they write disjoint fields: the weight fade owns each joint's
//! overall constraint weight, while the target blend owns the per-slot
//! weights and the transient slot's lifetime. Starting a transition while
//! one of the same kind is running replaces it, and the replacement starts
//! from the weights the old run last wrote - transitions cancel, weights
//! never jump.

pub mod core;
pub mod look;
pub mod rig;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct GazeRigPlugin;

impl Plugin for GazeRigPlugin {
    fn build(&self, app: &mut App) {
        app
            // Events and settings (must be first)
            .add_plugins(core::CorePlugin)
            // Rig discovery
            .add_plugins(rig::RigPlugin)
            // Proximity trigger and transitions
            .add_plugins(look::LookPlugin);
    }
}
