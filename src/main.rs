//! gaze-rig - headless demo.
//!
//! Drives one character rig through a scripted walk-by: the body crosses
//! the proximity trigger distance, an explicit look request fires at a side
//! target mid-visit, and the body walks back out. The weight table printed
//! each half second is exactly what an external constraint evaluator would
//! read to pose the skeleton.

use std::time::Duration;

use bevy::prelude::*;

use gaze_rig::core::{load_lookat_settings, LookAtRequest, LookAtSettings, RigStructureChanged};
use gaze_rig::rig::{AimController, LookAtRig, LookState, NeedsRigSetup, RigControllers};
use gaze_rig::GazeRigPlugin;

const TICK: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 20.0;

/// Marker for the walking character that owns the rig.
#[derive(Component)]
struct DemoBody;

/// Marker for the side target addressed by the explicit look request.
#[derive(Component)]
struct SideTarget;

fn main() {
    let mut app = App::new();
    app.add_plugins(GazeRigPlugin)
        .init_resource::<Time>()
        .add_systems(Startup, setup_scene.after(load_lookat_settings))
        .add_systems(Update, (drive_body, fire_look_request, report));

    println!("gaze-rig headless demo: walk-by with one explicit look request");

    // Deterministic clock: advance a fixed tick, then run the schedule.
    let ticks = (RUN_SECONDS / TICK) as u32;
    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(TICK));
        app.update();
    }
}

/// Spawn the base target, the side target, and one three-joint rig.
fn setup_scene(mut commands: Commands, settings: Res<LookAtSettings>) {
    let base_target = commands
        .spawn((Name::new("campfire"), Transform::from_xyz(0.0, 1.6, 0.0)))
        .id();

    commands.spawn((
        Name::new("signpost"),
        SideTarget,
        Transform::from_xyz(6.0, 1.5, 6.0),
    ));

    commands
        .spawn((
            DemoBody,
            LookAtRig {
                enabled: settings.enabled,
                trigger_distance: settings.trigger_distance,
            },
            NeedsRigSetup,
            Transform::from_xyz(14.0, 0.0, 0.0),
        ))
        .with_children(|parent| {
            parent.spawn((Name::new("head"), AimController::new(1.0, base_target)));
            parent.spawn((Name::new("chest"), AimController::new(0.55, base_target)));
            parent.spawn((Name::new("hips"), AimController::new(0.25, base_target)));
        });
}

/// Scripted walk: in for 8 seconds, stand for 6, back out.
fn drive_body(time: Res<Time>, mut query: Query<&mut Transform, With<DemoBody>>) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    const WALK_SPEED: f32 = 1.5;
    let t = time.elapsed_secs();

    if t < 8.0 {
        transform.translation.x = (14.0 - WALK_SPEED * t).max(2.0);
    } else if t >= 14.0 {
        transform.translation.x = (2.0 + WALK_SPEED * (t - 14.0)).min(14.0);
    }
}

/// Fire one explicit look request while the body stands near the campfire.
fn fire_look_request(
    time: Res<Time>,
    settings: Res<LookAtSettings>,
    mut fired: Local<bool>,
    mut requests: EventWriter<LookAtRequest>,
    body: Query<Entity, With<DemoBody>>,
    side: Query<Entity, With<SideTarget>>,
) {
    if *fired || time.elapsed_secs() < 9.0 {
        return;
    }
    let (Ok(rig), Ok(target)) = (body.get_single(), side.get_single()) else {
        return;
    };

    *fired = true;
    println!(
        "[{:6.2}s] look request: face the signpost",
        time.elapsed_secs()
    );
    requests.send(LookAtRequest {
        rig,
        target,
        duration: settings.look_duration,
        engage_speed: settings.engage_speed,
        release_speed: settings.release_speed,
    });
}

/// Print what the pose evaluator would read: weights, slots, rebuilds.
fn report(
    time: Res<Time>,
    mut last_report: Local<f32>,
    mut rebuilds: EventReader<RigStructureChanged>,
    rig_query: Query<(&Transform, &LookState, &RigControllers), With<DemoBody>>,
    controller_query: Query<&AimController>,
) {
    for _ in rebuilds.read() {
        println!(
            "[{:6.2}s] slot layout changed, pose inputs rebuilt",
            time.elapsed_secs()
        );
    }

    if time.elapsed_secs() - *last_report < 0.5 {
        return;
    }
    *last_report = time.elapsed_secs();

    let Ok((transform, state, controllers)) = rig_query.get_single() else {
        return;
    };

    let mut line = format!(
        "[{:6.2}s] x={:5.2} {:?}",
        time.elapsed_secs(),
        transform.translation.x,
        state
    );
    for &joint in &controllers.joints {
        if let Ok(controller) = controller_query.get(joint) {
            let slots: Vec<String> = controller
                .sources
                .iter()
                .map(|slot| format!("{:.2}", slot.weight))
                .collect();
            line.push_str(&format!(
                " | w={:.2} [{}]",
                controller.current_weight,
                slots.join(" ")
            ));
        }
    }
    println!("{line}");
}
