//! Events used for cross-system communication.
//!
//! The look request is the crate's public entry point: an external trigger
//! (a UI action, a cutscene script) sends it, and the target blend systems
//! serve it. Rejections and structural slot changes are reported back as
//! events so callers and the pose evaluator stay decoupled.

use bevy::prelude::*;

use crate::rig::RigError;

/// Default hold duration for a look request, in seconds.
pub const DEFAULT_LOOK_DURATION: f32 = 3.0;
/// Default engage transition speed: seconds to fully face the target.
pub const DEFAULT_ENGAGE_SPEED: f32 = 1.0;
/// Default release transition speed: seconds to return after the hold.
pub const DEFAULT_RELEASE_SPEED: f32 = 5.0;

/// Request a rig to face a specific target for a while.
///
/// While the request is in flight the rig is forced to look regardless of
/// proximity. Sending a new request while one is running supersedes it
/// mid-transition; the newer request continues from the weights the old one
/// last wrote, so the motion never pops.
#[derive(Event)]
pub struct LookAtRequest {
    /// Rig root entity to drive.
    pub rig: Entity,
    /// Entity to face.
    pub target: Entity,
    /// How long to hold the target once fully facing it, seconds.
    pub duration: f32,
    /// Seconds over which to blend toward the target.
    pub engage_speed: f32,
    /// Seconds over which to blend back once the hold ends.
    pub release_speed: f32,
}

impl LookAtRequest {
    /// A request with the default hold duration and transition speeds.
    pub fn new(rig: Entity, target: Entity) -> Self {
        Self {
            rig,
            target,
            duration: DEFAULT_LOOK_DURATION,
            engage_speed: DEFAULT_ENGAGE_SPEED,
            release_speed: DEFAULT_RELEASE_SPEED,
        }
    }
}

/// Sent when a look request was rejected; ongoing state is unchanged.
#[derive(Event)]
pub struct LookAtDenied {
    /// Rig the rejected request addressed.
    pub rig: Entity,
    /// Why the request was rejected.
    pub reason: RigError,
}

/// Sent when a rig's source slot layout changed (slot inserted or removed).
///
/// This is the "rebuild pose inputs" signal for the external constraint
/// evaluator. Per-tick weight writes never emit it; only structural changes
/// do.
#[derive(Event)]
pub struct RigStructureChanged {
    /// Rig whose controllers changed slot layout.
    pub rig: Entity,
}
