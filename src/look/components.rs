//! Transition components for the look controllers.
//!
//! Both transitions live on the rig root entity. Starting a new transition
//! of the same kind inserts over the old component, which is the
//! cancellation rule: the superseded run stops mid-progress and the new run
//! starts from whatever weights are currently written, so the motion never
//! pops.

use bevy::prelude::*;

/// An in-flight fade of every controller's overall constraint weight.
///
/// Runs over one time-unit, driving each joint linearly from the weight it
/// had when the fade started toward its origin weight (rising) or zero
/// (falling).
#[derive(Component)]
pub struct WeightFade {
    /// Fading up toward origin weights, or down toward zero.
    pub rising: bool,
    /// Elapsed fraction of the unit ramp.
    pub progress: f32,
    /// Weight of each joint at fade start, in rig joint order.
    pub start: Vec<f32>,
}

impl WeightFade {
    pub fn new(rising: bool, start: Vec<f32>) -> Self {
        Self {
            rising,
            progress: 0.0,
            start,
        }
    }
}

/// Phase of an explicit look request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPhase {
    /// Cross-fading from the base target to the requested target.
    Engage,
    /// Fully facing the requested target, weights frozen.
    Hold,
    /// Cross-fading back to the base state.
    Release,
}

/// An in-flight explicit look request.
///
/// While present, the rig counts as force-looking: the proximity trigger
/// keeps the rig engaged regardless of distance until this component is
/// removed. Per-joint vectors run parallel to `RigControllers::joints`.
#[derive(Component)]
pub struct TargetBlend {
    /// Entity the transient slot is bound to.
    pub target: Entity,
    /// Hold duration once fully facing the target, seconds.
    pub duration: f32,
    /// Engage cross-fade length, seconds.
    pub engage_speed: f32,
    /// Release cross-fade length, seconds.
    pub release_speed: f32,
    /// Current phase of the request.
    pub phase: BlendPhase,
    /// Elapsed fraction of the current phase (seconds during Hold).
    pub progress: f32,
    /// Slot-0 weight of each joint when this request took over.
    pub baselines: Vec<f32>,
    /// Transient-slot start weight of each joint (nonzero when this request
    /// superseded another mid-flight).
    pub transient_start: Vec<f32>,
    /// Slot-0 weight each joint releases toward; frozen at release start.
    pub release_to: Vec<f32>,
}
