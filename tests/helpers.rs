use std::f64::consts::PI;

use ar_vehicle::degrees_to_radians;
use ar_vehicle::scene::CameraPose;
use glam::{Mat4, Vec3};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn degrees_to_radians_right_angle() {
    assert!(approx_eq(degrees_to_radians(90), PI / 2.0));
}

#[test]
fn degrees_to_radians_negative_and_full_turn() {
    assert!(approx_eq(degrees_to_radians(-90), -PI / 2.0));
    assert!(approx_eq(degrees_to_radians(360), 2.0 * PI));
}

#[test]
fn camera_pose_identity_looks_down_negative_z() {
    let pose = CameraPose::from_transform(&Mat4::IDENTITY);
    assert!(vec_approx_eq(pose.position, Vec3::ZERO));
    assert!(vec_approx_eq(pose.forward, Vec3::new(0.0, 0.0, -1.0)));
    assert!(vec_approx_eq(pose.spawn_point(), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn camera_pose_reads_translation_column() {
    let pose = CameraPose::from_transform(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    assert!(vec_approx_eq(pose.position, Vec3::new(1.0, 2.0, 3.0)));
    assert!(vec_approx_eq(pose.spawn_point(), Vec3::new(1.0, 2.0, 2.0)));
}

#[test]
fn camera_pose_turned_left_spawns_to_the_left() {
    // Rotating +90° about Y turns -Z into -X
    let transform = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let pose = CameraPose::from_transform(&transform);
    assert!(vec_approx_eq(pose.spawn_point(), Vec3::new(-1.0, 0.0, 0.0)));
}
