#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

use ar_vehicle::{events, logging};
use tracing::warn;

fn main() {
    logging::init();
    if !events::init_event_bus() {
        warn!("Event bus already initialized");
    }

    #[cfg(target_os = "ios")]
    std::process::exit(ar_vehicle::platform::ios::run());

    #[cfg(not(target_os = "ios"))]
    replay::run();
}

/// Scripted session against the headless scene: a plane is found, a car is
/// placed in front of the camera, then the phone is tilted while touches
/// accelerate, reverse and brake.
#[cfg(not(target_os = "ios"))]
mod replay {
    use ar_vehicle::events::{self, AppEvent};
    use ar_vehicle::model::AccelerometerSample;
    use ar_vehicle::scene::{AnchorId, HeadlessScene, PlaneAnchor, TrackedAnchor};
    use ar_vehicle::{DriveConfig, VehicleController};
    use glam::{Mat4, Vec3};
    use tracing::info;

    const TICK: f64 = 1.0 / 60.0;

    pub fn run() {
        let mut scene = HeadlessScene::new();
        scene.set_camera_transform(Mat4::from_translation(Vec3::new(0.0, 0.2, 0.0)));

        let mut controller = VehicleController::new(scene, DriveConfig::default());
        let mut motion = controller.motion_handler();
        let touches = controller.touch_handler();
        let mut time = 0.0;

        let floor = TrackedAnchor::Plane(PlaneAnchor {
            id: AnchorId(1),
            center: Vec3::ZERO,
            extent: Vec3::new(1.5, 0.0, 2.0),
        });
        controller.anchor_added(&floor);

        events::publish(AppEvent::SpawnVehicle);
        let mut tick = |controller: &mut VehicleController<HeadlessScene>| {
            time += TICK;
            controller.physics_tick(time, events::drain_events());
        };
        tick(&mut controller);

        // (touches, tilt y) per phase; each phase lasts a second
        let script = [(1, 0.3), (0, 0.3), (2, -0.2), (0, 0.0), (3, 0.0)];
        for (count, tilt) in script {
            if count == 0 {
                touches.touches_ended(1);
            } else {
                touches.touches_began(count);
            }
            for _ in 0..60 {
                motion.on_sample(AccelerometerSample::new(0.8, tilt, -0.5));
                tick(&mut controller);
            }
            if let Some(wheels) = controller.host().current_wheels() {
                let (filtered_x, filtered_y) = motion.filtered();
                info!(
                    touches = count,
                    filtered_x,
                    filtered_y,
                    steering = wheels[2].steering,
                    engine = wheels[0].engine,
                    braking = wheels[0].braking,
                    "Replay phase done"
                );
            }
        }

        let extent = Vec3::new(3.0, 0.0, 3.0);
        controller.anchor_updated(&TrackedAnchor::Plane(PlaneAnchor {
            id: AnchorId(1),
            center: Vec3::ZERO,
            extent,
        }));
        info!(
            overlays = controller.host().overlays(AnchorId(1)).len(),
            vehicles = controller.host().live_vehicles(),
            "Replay finished"
        );
    }
}
