//! Look plugin - registers the proximity trigger and both transitions.

use bevy::prelude::*;

use super::blend;
use super::fade;
use super::proximity;
use crate::rig::RigSetupSet;

/// Look plugin - proximity trigger, weight fade, and target blend.
///
/// The systems are chained so that, within one frame, the proximity decision
/// and any fade it starts are observed before the transitions advance, and
/// rig discovery runs before everything.
pub struct LookPlugin;

impl Plugin for LookPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                proximity::proximity_trigger,
                blend::handle_look_requests,
                fade::tick_weight_fades,
                blend::tick_target_blends,
            )
                .chain()
                .after(RigSetupSet),
        );
    }
}
