//! Proximity trigger - decides when the engage transition should run.

use bevy::prelude::*;

use super::components::{TargetBlend, WeightFade};
use crate::rig::{AimController, LookAtRig, LookState, RigControllers};

/// Evaluates each rig's distance to its base target and drives [`LookState`].
///
/// Transitions are edge-triggered: entering a state starts (or replaces) the
/// weight fade exactly once, and staying in a state across frames does
/// nothing. A rig with an in-flight [`TargetBlend`] counts as wanting to
/// look regardless of distance.
pub fn proximity_trigger(
    mut commands: Commands,
    mut rig_query: Query<(
        Entity,
        &LookAtRig,
        &RigControllers,
        &Transform,
        &mut LookState,
        Option<&TargetBlend>,
        Option<&WeightFade>,
    )>,
    target_query: Query<&Transform, Without<LookAtRig>>,
    controller_query: Query<&AimController>,
) {
    for (rig_entity, rig, controllers, rig_transform, mut state, blend, fade) in
        rig_query.iter_mut()
    {
        let Ok(target_transform) = target_query.get(controllers.base_target) else {
            continue;
        };

        let distance = rig_transform
            .translation
            .distance(target_transform.translation);
        let wants_look = (rig.enabled && distance < rig.trigger_distance) || blend.is_some();

        match *state {
            LookState::Idle | LookState::Disengaging if wants_look => {
                *state = LookState::Engaging;
                start_fade(&mut commands, rig_entity, controllers, &controller_query, true);
            }
            LookState::Engaging | LookState::Engaged if !wants_look => {
                *state = LookState::Disengaging;
                start_fade(&mut commands, rig_entity, controllers, &controller_query, false);
            }
            // The fade finished; settle into the steady state.
            LookState::Engaging if fade.is_none() => *state = LookState::Engaged,
            LookState::Disengaging if fade.is_none() => *state = LookState::Idle,
            _ => {}
        }
    }
}

/// Start a weight fade from whatever weights are currently written.
///
/// Inserting over an in-flight fade cancels it; capturing the live weights
/// here is what keeps the hand-over continuous.
fn start_fade(
    commands: &mut Commands,
    rig_entity: Entity,
    controllers: &RigControllers,
    controller_query: &Query<&AimController>,
    rising: bool,
) {
    let start = controllers
        .joints
        .iter()
        .map(|&joint| {
            controller_query
                .get(joint)
                .map(|c| c.current_weight)
                .unwrap_or(0.0)
        })
        .collect();

    commands
        .entity(rig_entity)
        .insert(WeightFade::new(rising, start));
}
