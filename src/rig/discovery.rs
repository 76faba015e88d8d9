//! One-shot rig discovery.
//!
//! Walks a rig's hierarchy once to find its aim controller joints, captures
//! their authored weights, and marks the rig ready. Mirrors what the engine
//! side authors at design time: joints carry [`AimController`] components,
//! the rig root carries [`LookAtRig`] plus a [`NeedsRigSetup`] marker.

use bevy::prelude::*;

use super::components::{AimController, LookAtRig, LookState, NeedsRigSetup, RigControllers};
use super::error::RigError;

/// Discovers aim controller joints for rigs awaiting setup.
///
/// Controllers are collected depth-first so the joint order is stable. The
/// base look target is read once from controller 0, slot 0. Authored weights
/// are registered as origin weights and the runtime weights reset to zero so
/// the first engage fades in from rest.
///
/// A rig with no controller joints cannot animate: it logs an error and is
/// left without [`RigControllers`], permanently inert.
pub fn setup_rigs(
    mut commands: Commands,
    rig_query: Query<(Entity, Option<&Children>), (With<LookAtRig>, With<NeedsRigSetup>)>,
    children_query: Query<&Children>,
    mut controller_query: Query<&mut AimController>,
) {
    for (rig_entity, children) in rig_query.iter() {
        commands.entity(rig_entity).remove::<NeedsRigSetup>();

        let mut joints = Vec::new();
        if let Some(children) = children {
            collect_aim_joints(children, &children_query, &controller_query, &mut joints);
        }

        if joints.is_empty() {
            error!("Rig setup failed for {rig_entity:?}: {}", RigError::NoControllers);
            continue;
        }

        // The base target every joint ultimately returns to.
        let Ok(first) = controller_query.get(joints[0]) else {
            continue;
        };
        let Some(base_slot) = first.sources.first() else {
            error!(
                "Rig setup failed for {rig_entity:?}: {}",
                RigError::MalformedSourceState {
                    controller: joints[0],
                    count: 0,
                }
            );
            continue;
        };
        let base_target = base_slot.target;

        // Register authored weights and start from rest.
        for &joint in &joints {
            if let Ok(mut controller) = controller_query.get_mut(joint) {
                controller.origin_weight = controller.origin_weight.clamp(0.0, 1.0);
                controller.current_weight = 0.0;
            }
        }

        info!(
            "Rig setup complete for {rig_entity:?}: {} aim controllers",
            joints.len()
        );

        commands.entity(rig_entity).insert((
            RigControllers {
                joints,
                base_target,
            },
            LookState::default(),
        ));
    }
}

/// Recursively collect entities carrying [`AimController`] in hierarchy order.
fn collect_aim_joints(
    children: &Children,
    children_query: &Query<&Children>,
    controller_query: &Query<&mut AimController>,
    out: &mut Vec<Entity>,
) {
    for &child in children.iter() {
        if controller_query.contains(child) {
            out.push(child);
        }

        if let Ok(grandchildren) = children_query.get(child) {
            collect_aim_joints(grandchildren, children_query, controller_query, out);
        }
    }
}
