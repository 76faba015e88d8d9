//! Target blend - serves explicit look requests via a transient source slot.

use bevy::math::FloatExt;
use bevy::prelude::*;

use super::components::{BlendPhase, TargetBlend};
use crate::core::{LookAtDenied, LookAtRequest, RigStructureChanged};
use crate::rig::{AimController, LookAtRig, RigControllers, RigError, SourceSlot};

// Timings must stay positive; a zero from a caller would divide below.
const MIN_TIMING: f32 = 1e-4;

/// Validates look requests and installs the transient source slot.
///
/// A request against a rig that is already mid-request takes over from
/// wherever the old run was: slot-0 and transient weights are snapshotted
/// before the old transient slot is dropped, and the new blend interpolates
/// from those snapshots. Rejected requests leave all state untouched and are
/// reported through [`LookAtDenied`].
pub fn handle_look_requests(
    mut commands: Commands,
    mut requests: EventReader<LookAtRequest>,
    mut denied: EventWriter<LookAtDenied>,
    mut structure_changed: EventWriter<RigStructureChanged>,
    rig_query: Query<&RigControllers>,
    target_query: Query<(), With<Transform>>,
    mut controller_query: Query<&mut AimController>,
) {
    for request in requests.read() {
        let Ok(controllers) = rig_query.get(request.rig) else {
            warn!(
                "Look request for {:?} rejected: {}",
                request.rig,
                RigError::NoControllers
            );
            denied.send(LookAtDenied {
                rig: request.rig,
                reason: RigError::NoControllers,
            });
            continue;
        };

        if !target_query.contains(request.target) {
            let reason = RigError::InvalidTarget(request.target);
            warn!("Look request for {:?} rejected: {reason}", request.rig);
            denied.send(LookAtDenied {
                rig: request.rig,
                reason,
            });
            continue;
        }

        let mut baselines = Vec::with_capacity(controllers.joints.len());
        let mut transient_start = Vec::with_capacity(controllers.joints.len());

        for &joint in &controllers.joints {
            let Ok(mut controller) = controller_query.get_mut(joint) else {
                baselines.push(1.0);
                transient_start.push(0.0);
                continue;
            };

            let count = controller.sources.len();
            if count == 0 || count > 2 {
                warn!(
                    "Repairing controller before look request: {}",
                    RigError::MalformedSourceState {
                        controller: joint,
                        count,
                    }
                );
                controller.sources.truncate(1);
                if controller.sources.is_empty() {
                    controller.sources.push(SourceSlot {
                        target: controllers.base_target,
                        weight: 1.0,
                    });
                }
            }

            // Continuity snapshots: slot 0 as it stands, and the superseded
            // transient's weight if one is still in flight.
            baselines.push(controller.sources[0].weight);
            let resume = if controller.sources.len() >= 2 {
                controller.sources[1].weight
            } else {
                0.0
            };
            transient_start.push(resume);

            controller.sources.truncate(1);
            controller.sources.push(SourceSlot {
                target: request.target,
                weight: resume,
            });
        }

        structure_changed.send(RigStructureChanged { rig: request.rig });

        // Inserting over an in-flight blend cancels it; the snapshots above
        // carry its weights into this run.
        commands.entity(request.rig).insert(TargetBlend {
            target: request.target,
            duration: request.duration.max(MIN_TIMING),
            engage_speed: request.engage_speed.max(MIN_TIMING),
            release_speed: request.release_speed.max(MIN_TIMING),
            phase: BlendPhase::Engage,
            progress: 0.0,
            baselines,
            transient_start,
            release_to: Vec::new(),
        });
    }
}

/// Advances active target blends through engage, hold, and release.
///
/// Engage cross-fades slot 0 out and the transient slot in; hold freezes the
/// weights for the requested duration; release cross-fades back and removes
/// the transient slot. The base state restored by the release is decided
/// once, when the release begins: full base-target influence if proximity
/// alone dictates looking at that moment, otherwise the slot-0 weights
/// snapshotted when the request took over.
pub fn tick_target_blends(
    mut commands: Commands,
    time: Res<Time>,
    mut structure_changed: EventWriter<RigStructureChanged>,
    mut rig_query: Query<(
        Entity,
        &LookAtRig,
        &RigControllers,
        &Transform,
        &mut TargetBlend,
    )>,
    target_query: Query<&Transform, Without<LookAtRig>>,
    mut controller_query: Query<&mut AimController>,
) {
    let delta = time.delta_secs();

    for (rig_entity, rig, controllers, rig_transform, mut blend) in rig_query.iter_mut() {
        let result = match blend.phase {
            BlendPhase::Engage => {
                let advance = delta / blend.engage_speed;
                blend.progress += advance;
                let done = blend.progress >= 1.0;
                let t = blend.progress;

                let written = write_slot_weights(
                    &controllers.joints,
                    &mut controller_query,
                    |i| if done { 0.0 } else { blend.baselines[i].lerp(0.0, t) },
                    |i| {
                        if done {
                            1.0
                        } else {
                            blend.transient_start[i].lerp(1.0, t)
                        }
                    },
                );

                if done {
                    blend.phase = BlendPhase::Hold;
                    blend.progress = 0.0;
                }
                written
            }

            BlendPhase::Hold => {
                blend.progress += delta;
                if blend.progress >= blend.duration {
                    // The base-state decision is made once, here, and holds
                    // for the whole release. Force-look is excluded: this
                    // blend itself holds it until removal.
                    let proximity_engaged = target_query
                        .get(controllers.base_target)
                        .map(|target| {
                            rig.enabled
                                && rig_transform.translation.distance(target.translation)
                                    < rig.trigger_distance
                        })
                        .unwrap_or(false);

                    let release_to = if proximity_engaged {
                        vec![1.0; blend.baselines.len()]
                    } else {
                        blend.baselines.clone()
                    };
                    blend.release_to = release_to;
                    blend.phase = BlendPhase::Release;
                    blend.progress = 0.0;
                }
                Ok(())
            }

            BlendPhase::Release => {
                let advance = delta / blend.release_speed;
                blend.progress += advance;
                let done = blend.progress >= 1.0;
                let t = blend.progress;

                let written = write_slot_weights(
                    &controllers.joints,
                    &mut controller_query,
                    |i| {
                        if done {
                            blend.release_to[i]
                        } else {
                            0.0_f32.lerp(blend.release_to[i], t)
                        }
                    },
                    |_| if done { 0.0 } else { 1.0_f32.lerp(0.0, t) },
                );

                if done && written.is_ok() {
                    remove_transient_slots(&controllers.joints, &mut controller_query);
                    structure_changed.send(RigStructureChanged { rig: rig_entity });
                    commands.entity(rig_entity).remove::<TargetBlend>();
                }
                written
            }
        };

        // A controller lost its transient slot mid-flight. Restore the safe
        // single-slot state and drop the request.
        if let Err((joint, count)) = result {
            warn!(
                "Aborting look blend on {rig_entity:?}: {}",
                RigError::MalformedSourceState {
                    controller: joint,
                    count,
                }
            );
            remove_transient_slots(&controllers.joints, &mut controller_query);
            structure_changed.send(RigStructureChanged { rig: rig_entity });
            commands.entity(rig_entity).remove::<TargetBlend>();
        }
    }
}

/// Write one cross-fade sample to every controller's two slots.
///
/// Fails with the offending joint and slot count if a controller is not in
/// the expected two-slot layout.
fn write_slot_weights(
    joints: &[Entity],
    controller_query: &mut Query<&mut AimController>,
    slot0: impl Fn(usize) -> f32,
    slot1: impl Fn(usize) -> f32,
) -> Result<(), (Entity, usize)> {
    for (i, &joint) in joints.iter().enumerate() {
        let Ok(mut controller) = controller_query.get_mut(joint) else {
            continue;
        };

        if controller.sources.len() != 2 {
            return Err((joint, controller.sources.len()));
        }

        controller.sources[0].weight = slot0(i);
        controller.sources[1].weight = slot1(i);
    }
    Ok(())
}

/// Drop every slot beyond the permanent base slot.
fn remove_transient_slots(joints: &[Entity], controller_query: &mut Query<&mut AimController>) {
    for &joint in joints {
        if let Ok(mut controller) = controller_query.get_mut(joint) {
            controller.sources.truncate(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DEFAULT_ENGAGE_SPEED, DEFAULT_LOOK_DURATION, DEFAULT_RELEASE_SPEED};

    #[test]
    fn new_request_uses_default_timings() {
        let request = LookAtRequest::new(Entity::from_raw(1), Entity::from_raw(2));
        assert_eq!(request.duration, DEFAULT_LOOK_DURATION);
        assert_eq!(request.engage_speed, DEFAULT_ENGAGE_SPEED);
        assert_eq!(request.release_speed, DEFAULT_RELEASE_SPEED);
    }

    #[test]
    fn engage_cross_fade_is_symmetric() {
        // Starting from rest, the two slots always sum to one.
        let baseline = 1.0_f32;
        let transient_start = 0.0_f32;

        let mut t = 0.0_f32;
        while t <= 1.0 {
            let slot0 = baseline.lerp(0.0, t);
            let slot1 = transient_start.lerp(1.0, t);
            assert!((slot0 + slot1 - 1.0).abs() < 1e-6);
            t += 0.125;
        }
    }

    #[test]
    fn superseded_transient_resumes_from_partial_weight() {
        // The snapshot-and-reuse rule: a new request picks up the old
        // transient's weight instead of restarting at zero.
        let superseded_weight = 0.4_f32;
        let first_sample = superseded_weight.lerp(1.0, 0.125);

        assert!(first_sample > superseded_weight);
        assert!(first_sample - superseded_weight <= 0.125);
    }
}
