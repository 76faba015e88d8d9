//! Rig-related components.

use bevy::prelude::*;

/// One weighted look target of an aim controller.
///
/// A controller's final look direction is the weighted combination across
/// its slots; the external constraint evaluator consumes these every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceSlot {
    /// Entity whose transform the joint aims at.
    pub target: Entity,
    /// Blend weight of this slot, in [0, 1].
    pub weight: f32,
}

/// One rig joint participating in look-at.
///
/// Slot 0 of `sources` is the permanent base target. Slot 1 exists only
/// while an explicit look request is in flight and is removed when the
/// request completes or is superseded.
#[derive(Component)]
pub struct AimController {
    /// Design-time blend weight, captured once at rig setup.
    pub origin_weight: f32,
    /// Runtime constraint weight. Written only by the weight fade.
    pub current_weight: f32,
    /// Ordered weighted look targets. Written only by the target blend.
    pub sources: Vec<SourceSlot>,
}

impl AimController {
    /// Create a controller with its authored weight and permanent base target.
    pub fn new(weight: f32, base_target: Entity) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        Self {
            origin_weight: weight,
            current_weight: weight,
            sources: vec![SourceSlot {
                target: base_target,
                weight: 1.0,
            }],
        }
    }
}

/// Look-at configuration for a character rig, placed on the rig root.
#[derive(Component)]
pub struct LookAtRig {
    /// Master on/off switch for proximity-driven looking.
    pub enabled: bool,
    /// Distance to the base target below which the rig engages, world units.
    pub trigger_distance: f32,
}

/// Marker for rigs awaiting controller discovery.
#[derive(Component)]
pub struct NeedsRigSetup;

/// Discovered aim controller joints of a rig, inserted by rig setup.
///
/// Presence of this component marks the rig as ready to animate.
#[derive(Component)]
pub struct RigControllers {
    /// Controller joints in hierarchy order.
    pub joints: Vec<Entity>,
    /// The base look target, read once from controller 0 slot 0.
    pub base_target: Entity,
}

/// State machine for the proximity-driven engage/disengage cycle.
///
/// Transitions are edge-triggered by the proximity system; re-entering the
/// same state across frames is a no-op.
#[derive(Component, Default, PartialEq, Clone, Copy, Debug)]
pub enum LookState {
    /// Weights at rest, not facing the target.
    #[default]
    Idle,
    /// Ramping weights up toward their origin values.
    Engaging,
    /// Fully facing the base target.
    Engaged,
    /// Ramping weights back down to zero.
    Disengaging,
}

impl LookState {
    /// Whether the rig currently counts as facing its target.
    pub fn is_looking(self) -> bool {
        matches!(self, LookState::Engaging | LookState::Engaged)
    }
}
