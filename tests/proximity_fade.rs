//! Proximity trigger and weight fade integration tests.
//!
//! Each test builds a headless app with a manually advanced clock and steps
//! the schedule tick by tick. The tick is an exact binary fraction so fade
//! boundaries land on exact floats.

use std::time::Duration;

use bevy::prelude::*;

use gaze_rig::look::WeightFade;
use gaze_rig::rig::{AimController, LookAtRig, LookState, NeedsRigSetup, RigControllers};
use gaze_rig::GazeRigPlugin;

const TICK: f32 = 0.125;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(GazeRigPlugin);
    app.init_resource::<Time>();
    app
}

fn step(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(TICK));
    app.update();
}

fn spawn_target(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn(Transform::from_translation(position))
        .id()
}

fn spawn_rig(
    app: &mut App,
    position: Vec3,
    trigger_distance: f32,
    weights: &[f32],
    base_target: Entity,
) -> (Entity, Vec<Entity>) {
    let mut joints = Vec::new();
    let rig = app
        .world_mut()
        .spawn((
            LookAtRig {
                enabled: true,
                trigger_distance,
            },
            NeedsRigSetup,
            Transform::from_translation(position),
        ))
        .with_children(|parent| {
            for &weight in weights {
                joints.push(parent.spawn(AimController::new(weight, base_target)).id());
            }
        })
        .id();
    (rig, joints)
}

fn current_weight(app: &App, joint: Entity) -> f32 {
    app.world()
        .get::<AimController>(joint)
        .unwrap()
        .current_weight
}

fn look_state(app: &App, rig: Entity) -> LookState {
    *app.world().get::<LookState>(rig).unwrap()
}

fn move_rig(app: &mut App, rig: Entity, x: f32) {
    app.world_mut()
        .get_mut::<Transform>(rig)
        .unwrap()
        .translation
        .x = x;
}

/// Threshold 5, character at distance 3: one engage fade runs and ends with
/// every controller's weight equal to its origin weight.
#[test]
fn engage_fade_reaches_origin_weights() {
    let mut app = test_app();
    let target = spawn_target(&mut app, Vec3::ZERO);
    let origins = [1.0, 0.6, 0.25];
    let (rig, joints) = spawn_rig(&mut app, Vec3::new(3.0, 0.0, 0.0), 5.0, &origins, target);

    step(&mut app);
    assert_eq!(look_state(&app, rig), LookState::Engaging);

    // Unit-duration ramp: done after 8 ticks of 0.125.
    for _ in 0..7 {
        step(&mut app);
    }
    for (&joint, &origin) in joints.iter().zip(&origins) {
        assert_eq!(current_weight(&app, joint), origin);
    }

    // One more frame for the trigger to observe the finished fade.
    step(&mut app);
    assert_eq!(look_state(&app, rig), LookState::Engaged);
    assert!(app.world().get::<WeightFade>(rig).is_none());
}

/// Standing inside the threshold for many frames starts exactly one fade:
/// once engaged, no new fade appears and the weights never move again.
#[test]
fn engage_is_edge_triggered() {
    let mut app = test_app();
    let target = spawn_target(&mut app, Vec3::ZERO);
    let (rig, joints) = spawn_rig(&mut app, Vec3::new(3.0, 0.0, 0.0), 5.0, &[1.0, 0.6], target);

    for _ in 0..9 {
        step(&mut app);
    }
    assert_eq!(look_state(&app, rig), LookState::Engaged);
    let settled: Vec<f32> = joints.iter().map(|&j| current_weight(&app, j)).collect();

    for _ in 0..10 {
        step(&mut app);
        assert!(app.world().get::<WeightFade>(rig).is_none());
        assert_eq!(look_state(&app, rig), LookState::Engaged);
        for (&joint, &weight) in joints.iter().zip(&settled) {
            assert_eq!(current_weight(&app, joint), weight);
        }
    }
}

/// Walking out of range disengages once and fades every weight back to zero.
#[test]
fn disengage_fades_back_to_zero() {
    let mut app = test_app();
    let target = spawn_target(&mut app, Vec3::ZERO);
    let (rig, joints) = spawn_rig(&mut app, Vec3::new(3.0, 0.0, 0.0), 5.0, &[1.0, 0.6], target);

    for _ in 0..9 {
        step(&mut app);
    }
    assert_eq!(look_state(&app, rig), LookState::Engaged);

    move_rig(&mut app, rig, 10.0);
    step(&mut app);
    assert_eq!(look_state(&app, rig), LookState::Disengaging);

    for _ in 0..7 {
        step(&mut app);
    }
    for &joint in &joints {
        assert_eq!(current_weight(&app, joint), 0.0);
    }

    step(&mut app);
    assert_eq!(look_state(&app, rig), LookState::Idle);

    // Staying out of range is a no-op, not a repeated disengage.
    for _ in 0..5 {
        step(&mut app);
        assert_eq!(look_state(&app, rig), LookState::Idle);
        assert!(app.world().get::<WeightFade>(rig).is_none());
    }
}

/// Clearing the master switch while engaged releases the rig.
#[test]
fn master_switch_disengages() {
    let mut app = test_app();
    let target = spawn_target(&mut app, Vec3::ZERO);
    let (rig, joints) = spawn_rig(&mut app, Vec3::new(3.0, 0.0, 0.0), 5.0, &[0.8], target);

    for _ in 0..9 {
        step(&mut app);
    }
    assert_eq!(look_state(&app, rig), LookState::Engaged);

    app.world_mut().get_mut::<LookAtRig>(rig).unwrap().enabled = false;

    for _ in 0..9 {
        step(&mut app);
    }
    assert_eq!(look_state(&app, rig), LookState::Idle);
    assert_eq!(current_weight(&app, joints[0]), 0.0);
}

/// Reversing a fade mid-flight inherits the partial weights: every sample
/// stays in [0, 1] and no frame-to-frame jump exceeds one tick's maximum
/// possible delta.
#[test]
fn fade_reversal_is_continuous_and_bounded() {
    let mut app = test_app();
    let target = spawn_target(&mut app, Vec3::ZERO);
    let (rig, joints) = spawn_rig(&mut app, Vec3::new(3.0, 0.0, 0.0), 5.0, &[1.0, 0.6], target);

    // Let discovery zero the authored weights before sampling.
    step(&mut app);
    let mut previous: Vec<f32> = joints.iter().map(|&j| current_weight(&app, j)).collect();

    // Cross the threshold every three frames for a while.
    for frame in 0..40 {
        if frame % 3 == 0 {
            let inside = (frame / 3) % 2 == 0;
            move_rig(&mut app, rig, if inside { 3.0 } else { 10.0 });
        }
        step(&mut app);

        for (i, &joint) in joints.iter().enumerate() {
            let weight = current_weight(&app, joint);
            assert!((0.0..=1.0).contains(&weight));
            assert!(
                (weight - previous[i]).abs() <= TICK + 1e-6,
                "frame {frame}: joint {i} jumped from {} to {weight}",
                previous[i]
            );
            previous[i] = weight;
        }
    }
}

/// A rig with no aim controller joints never becomes ready.
#[test]
fn rig_without_controllers_stays_inert() {
    let mut app = test_app();
    let rig = app
        .world_mut()
        .spawn((
            LookAtRig {
                enabled: true,
                trigger_distance: 5.0,
            },
            NeedsRigSetup,
            Transform::default(),
        ))
        .id();

    for _ in 0..5 {
        step(&mut app);
    }

    assert!(app.world().get::<RigControllers>(rig).is_none());
    assert!(app.world().get::<LookState>(rig).is_none());
    assert!(app.world().get::<NeedsRigSetup>(rig).is_none());
}
