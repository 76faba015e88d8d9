//! Weight fade - ramps overall constraint weights up or down.

use bevy::math::FloatExt;
use bevy::prelude::*;

use super::components::WeightFade;
use crate::rig::{AimController, RigControllers};

/// Advances active weight fades and writes each joint's overall weight.
///
/// The ramp runs over one time-unit regardless of distance or target. Each
/// joint interpolates linearly from the weight captured at fade start toward
/// its origin weight (rising) or zero (falling). The endpoint is written
/// verbatim on the final tick, then the fade is removed; the fade is the
/// sole writer of `current_weight`.
pub fn tick_weight_fades(
    mut commands: Commands,
    time: Res<Time>,
    mut rig_query: Query<(Entity, &RigControllers, &mut WeightFade)>,
    mut controller_query: Query<&mut AimController>,
) {
    for (rig_entity, controllers, mut fade) in rig_query.iter_mut() {
        fade.progress += time.delta_secs();
        let done = fade.progress >= 1.0;

        for (i, &joint) in controllers.joints.iter().enumerate() {
            let Ok(mut controller) = controller_query.get_mut(joint) else {
                continue;
            };
            let Some(&start) = fade.start.get(i) else {
                continue;
            };

            let target = if fade.rising {
                controller.origin_weight
            } else {
                0.0
            };
            controller.current_weight = if done {
                target
            } else {
                start.lerp(target, fade.progress)
            };
        }

        if done {
            commands.entity(rig_entity).remove::<WeightFade>();
        }
    }
}
