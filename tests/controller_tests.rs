//! Session-level behaviour driven through the headless scene.

use ar_vehicle::error::AssetStructureError;
use ar_vehicle::events::{AppEvent, EventBus};
use ar_vehicle::model::constants::*;
use ar_vehicle::model::AccelerometerSample;
use ar_vehicle::scene::headless::{AssetNode, WheelState};
use ar_vehicle::scene::{
    AnchorId, BodyKind, HeadlessScene, PlaneAnchor, TrackedAnchor, WheelSlot,
};
use ar_vehicle::{DriveConfig, VehicleController};
use glam::{Mat4, Vec3};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn plane(id: u64, extent: Vec3) -> TrackedAnchor {
    TrackedAnchor::Plane(PlaneAnchor {
        id: AnchorId(id),
        center: Vec3::new(0.1, 0.0, -0.2),
        extent,
    })
}

fn controller_with_camera(transform: Mat4) -> VehicleController<HeadlessScene> {
    let mut scene = HeadlessScene::new();
    scene.set_camera_transform(transform);
    VehicleController::new(scene, DriveConfig::default())
}

fn rear_and_front(wheels: [WheelState; 4]) -> (WheelState, WheelState) {
    (wheels[WheelSlot::RearLeft.index()], wheels[WheelSlot::FrontLeft.index()])
}

// === Plane overlays ===

#[test]
fn anchor_added_attaches_one_ground_overlay() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.anchor_added(&plane(1, Vec3::new(2.0, 0.0, 3.0)));

    let overlays = controller.host().overlays(AnchorId(1));
    assert_eq!(overlays.len(), 1);
    let overlay = &overlays[0];
    assert_eq!(overlay.width, 2.0);
    assert_eq!(overlay.height, 3.0);
    assert_eq!(overlay.position, Vec3::new(0.1, 0.0, -0.2));
    assert!((overlay.euler_angles.x - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(overlay.material, GROUND_MATERIAL);
    assert!(overlay.double_sided);
    assert_eq!(overlay.body, BodyKind::Static);
}

#[test]
fn anchor_update_replaces_overlay() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.anchor_added(&plane(1, Vec3::new(1.0, 0.0, 1.0)));
    controller.anchor_updated(&plane(1, Vec3::new(4.0, 0.0, 5.0)));
    controller.anchor_updated(&plane(1, Vec3::new(6.0, 0.0, 7.0)));

    let overlays = controller.host().overlays(AnchorId(1));
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].width, 6.0);
    assert_eq!(overlays[0].height, 7.0);
}

#[test]
fn anchor_update_without_prior_overlay_attaches_one() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.anchor_updated(&plane(9, Vec3::ONE));
    assert_eq!(controller.host().overlays(AnchorId(9)).len(), 1);
}

#[test]
fn anchor_removed_detaches_overlays() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.anchor_added(&plane(1, Vec3::ONE));
    controller.anchor_added(&plane(2, Vec3::ONE));
    controller.anchor_removed(&plane(1, Vec3::ONE));

    assert!(controller.host().overlays(AnchorId(1)).is_empty());
    assert_eq!(controller.host().anchors_with_overlays(), vec![AnchorId(2)]);
}

#[test]
fn non_plane_anchors_are_ignored() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    let other = TrackedAnchor::Other(AnchorId(5));
    controller.anchor_added(&other);
    controller.anchor_updated(&other);
    assert!(controller.host().anchors_with_overlays().is_empty());

    controller.anchor_added(&plane(5, Vec3::ONE));
    controller.anchor_removed(&other);
    assert_eq!(controller.host().overlays(AnchorId(5)).len(), 1);
}

// === Vehicle spawn ===

#[test]
fn spawn_places_chassis_in_front_of_camera() {
    let mut controller =
        controller_with_camera(Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)));
    assert!(controller.spawn_vehicle().unwrap());
    assert!(controller.has_vehicle());

    let host = controller.host();
    let chassis = host.current_chassis().unwrap();
    assert_eq!(host.node_name(chassis), Some(CHASSIS_NODE));
    assert_eq!(host.node_position(chassis), Some(Vec3::new(0.0, 0.5, -1.0)));
    assert_eq!(host.node_body(chassis), Some(BodyKind::Dynamic { mass: 5.0 }));
    assert_eq!(host.root_nodes_named(CHASSIS_NODE), vec![chassis]);
}

#[test]
fn spawn_attaches_wheels_rear_then_front() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();
    let names = controller.host().current_wheel_names().unwrap();
    assert_eq!(
        names,
        [
            REAR_LEFT_WHEEL_NODE.to_string(),
            REAR_RIGHT_WHEEL_NODE.to_string(),
            FRONT_LEFT_WHEEL_NODE.to_string(),
            FRONT_RIGHT_WHEEL_NODE.to_string(),
        ]
    );
}

#[test]
fn spawning_twice_leaves_one_vehicle_at_second_point() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();

    controller
        .host_mut()
        .set_camera_transform(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    controller.spawn_vehicle().unwrap();

    let host = controller.host();
    assert_eq!(host.live_vehicles(), 1);
    let chassis = host.root_nodes_named(CHASSIS_NODE);
    assert_eq!(chassis.len(), 1);
    assert_eq!(host.node_position(chassis[0]), Some(Vec3::new(2.0, 0.0, -1.0)));
}

#[test]
fn spawn_without_camera_does_nothing() {
    let mut controller = VehicleController::new(HeadlessScene::new(), DriveConfig::default());
    assert_eq!(controller.spawn_vehicle(), Ok(false));
    assert!(!controller.has_vehicle());
    assert!(controller.host().root_nodes_named(CHASSIS_NODE).is_empty());
}

#[test]
fn spawn_with_missing_asset_fails() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.host_mut().remove_asset(VEHICLE_ASSET);
    assert_eq!(
        controller.spawn_vehicle(),
        Err(AssetStructureError::MissingAsset {
            asset: VEHICLE_ASSET.to_string()
        })
    );
}

#[test]
fn spawn_with_missing_wheel_fails_and_keeps_previous() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();

    let broken = AssetNode::new("root").with_child(
        AssetNode::new(CHASSIS_NODE)
            .with_child(AssetNode::new(REAR_LEFT_WHEEL_NODE))
            .with_child(AssetNode::new(REAR_RIGHT_WHEEL_NODE))
            .with_child(AssetNode::new(FRONT_LEFT_WHEEL_NODE)),
    );
    controller.host_mut().register_asset(VEHICLE_ASSET, broken);

    assert_eq!(
        controller.spawn_vehicle(),
        Err(AssetStructureError::MissingNode {
            asset: VEHICLE_ASSET.to_string(),
            parent: CHASSIS_NODE.to_string(),
            node: FRONT_RIGHT_WHEEL_NODE.to_string(),
        })
    );
    assert!(controller.has_vehicle());
    assert_eq!(controller.host().live_vehicles(), 1);
    assert_eq!(controller.host().root_nodes_named(CHASSIS_NODE).len(), 1);
}

#[test]
fn spawn_with_missing_chassis_fails() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller
        .host_mut()
        .register_asset(VEHICLE_ASSET, AssetNode::new("root"));
    assert!(matches!(
        controller.spawn_vehicle(),
        Err(AssetStructureError::MissingNode { node, .. }) if node == CHASSIS_NODE
    ));
}

// === Per-tick actuation ===

#[test]
fn tick_without_vehicle_only_counts() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.physics_tick(0.0, Vec::new());
    assert_eq!(controller.ticks(), 1);
    assert!(controller.host().current_wheels().is_none());
}

#[test]
fn tick_applies_steering_and_accelerate() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();
    let mut motion = controller.motion_handler();
    let touches = controller.touch_handler();

    motion.on_sample(AccelerometerSample::new(1.0, 0.6, 0.0));
    touches.touches_began(1);
    controller.physics_tick(0.1, Vec::new());

    let wheels = controller.host().current_wheels().unwrap();
    let (rear, front) = rear_and_front(wheels);
    assert!(approx_eq(front.steering, 0.3));
    assert!(approx_eq(wheels[WheelSlot::FrontRight.index()].steering, 0.3));
    assert!(approx_eq(rear.steering, 0.0));
    assert!(approx_eq(rear.engine, ENGINE_FORCE));
    assert!(approx_eq(wheels[WheelSlot::RearRight.index()].engine, ENGINE_FORCE));
    assert!(approx_eq(rear.braking, 0.0));
    assert!(approx_eq(front.engine, 0.0));
}

#[test]
fn tick_follows_touch_accumulate_and_reset() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();
    let touches = controller.touch_handler();

    touches.touches_began(1);
    touches.touches_began(1);
    controller.physics_tick(0.0, Vec::new());
    let (rear, _) = rear_and_front(controller.host().current_wheels().unwrap());
    assert!(approx_eq(rear.engine, -ENGINE_FORCE));

    touches.touches_began(1);
    controller.physics_tick(0.0, Vec::new());
    let (rear, _) = rear_and_front(controller.host().current_wheels().unwrap());
    assert!(approx_eq(rear.engine, 0.0));
    assert!(approx_eq(rear.braking, BRAKING_FORCE));

    touches.touches_ended(1);
    controller.physics_tick(0.0, Vec::new());
    let (rear, _) = rear_and_front(controller.host().current_wheels().unwrap());
    assert!(approx_eq(rear.engine, 0.0));
    assert!(approx_eq(rear.braking, 0.0));
}

#[test]
fn unavailable_sensor_keeps_steering_at_zero() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.spawn_vehicle().unwrap();
    let mut motion = controller.motion_handler();
    motion.on_unavailable();
    assert!(motion.is_unavailable());

    controller.physics_tick(0.0, vec![AppEvent::SensorUnavailable]);
    let (_, front) = rear_and_front(controller.host().current_wheels().unwrap());
    assert!(approx_eq(front.steering, 0.0));
}

// === Events ===

#[test]
fn spawn_event_from_bus_is_handled_on_tick() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    let bus = EventBus::new();
    let publisher = bus.publisher();

    publisher.publish(AppEvent::SpawnVehicle);
    assert!(!controller.has_vehicle());

    controller.physics_tick(0.0, bus.drain());
    assert!(controller.has_vehicle());
}

#[test]
fn vehicle_is_actuated_on_the_tick_it_spawns() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.touch_handler().touches_began(3);
    controller.physics_tick(0.0, vec![AppEvent::SpawnVehicle]);

    let (rear, _) = rear_and_front(controller.host().current_wheels().unwrap());
    assert!(approx_eq(rear.braking, BRAKING_FORCE));
}

#[test]
fn failed_spawn_event_does_not_stop_the_tick() {
    let mut controller = controller_with_camera(Mat4::IDENTITY);
    controller.host_mut().remove_asset(VEHICLE_ASSET);
    controller.physics_tick(0.0, vec![AppEvent::SpawnVehicle]);
    assert!(!controller.has_vehicle());
    assert_eq!(controller.ticks(), 1);
}
