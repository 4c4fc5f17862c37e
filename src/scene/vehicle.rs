//! Vehicle spawning and per-tick actuation.
//!
//! Spawning looks up the chassis and its four wheel nodes by name, failing
//! with [`AssetStructureError`] when the asset is not shaped as expected.
//! Only one vehicle is ever live: spawning retires the previous behaviour and
//! removes every root node tagged with the chassis name first.

use tracing::{debug, info};

use super::host::{VehicleActuator, VehicleHost};
use super::types::{BodyKind, WheelSlot};
use crate::error::AssetStructureError;
use crate::model::constants::{CHASSIS_NODE, VEHICLE_ASSET};
use crate::model::{DriveConfig, WheelForces};

/// Chassis, wheels in [`WheelSlot::ALL`] order, and the chassis body.
#[derive(Debug, Clone)]
pub struct VehicleRig<N> {
    pub chassis: N,
    pub wheels: [N; 4],
    pub body: BodyKind,
}

/// Load the vehicle asset and resolve every node the rig needs.
pub fn assemble_rig<H: VehicleHost>(
    host: &mut H,
    config: &DriveConfig,
) -> Result<VehicleRig<H::Node>, AssetStructureError> {
    let root = host
        .load_asset(VEHICLE_ASSET)
        .ok_or_else(|| AssetStructureError::MissingAsset {
            asset: VEHICLE_ASSET.to_string(),
        })?;

    let chassis = find_child(host, &root, "scene root", CHASSIS_NODE)?;

    let [rl, rr, fl, fr] = WheelSlot::ALL;
    let wheels = [
        find_child(host, &chassis, CHASSIS_NODE, rl.node_name())?,
        find_child(host, &chassis, CHASSIS_NODE, rr.node_name())?,
        find_child(host, &chassis, CHASSIS_NODE, fl.node_name())?,
        find_child(host, &chassis, CHASSIS_NODE, fr.node_name())?,
    ];

    Ok(VehicleRig {
        chassis,
        wheels,
        body: BodyKind::Dynamic {
            mass: config.chassis_mass,
        },
    })
}

fn find_child<H: VehicleHost>(
    host: &H,
    parent: &H::Node,
    parent_name: &str,
    name: &str,
) -> Result<H::Node, AssetStructureError> {
    host.child_named(parent, name)
        .ok_or_else(|| AssetStructureError::MissingNode {
            asset: VEHICLE_ASSET.to_string(),
            parent: parent_name.to_string(),
            node: name.to_string(),
        })
}

/// Spawn a vehicle one unit in front of the camera.
///
/// Returns `Ok(false)` without touching the scene (or `previous`) when there
/// is no camera pose yet. On success `previous` holds the new vehicle and the
/// old one has been retired.
pub fn spawn<H: VehicleHost>(
    host: &mut H,
    previous: &mut Option<H::Vehicle>,
    config: &DriveConfig,
) -> Result<bool, AssetStructureError> {
    let Some(pose) = host.camera_pose() else {
        debug!("No camera pose yet; vehicle not spawned");
        return Ok(false);
    };
    let position = pose.spawn_point();

    let rig = assemble_rig(host, config)?;
    let vehicle = host.build_vehicle(&rig, position);

    if let Some(old) = previous.take() {
        host.retire_vehicle(old);
    }
    let removed = host.remove_root_nodes_named(CHASSIS_NODE);
    host.add_root_node(&rig.chassis);
    *previous = Some(vehicle);

    info!(
        x = position.x,
        y = position.y,
        z = position.z,
        replaced = removed,
        "Vehicle spawned"
    );
    Ok(true)
}

/// Apply this tick's set-points: steering to the front pair, engine and
/// braking force to the rear pair.
pub fn actuate<V: VehicleActuator>(vehicle: &mut V, steering: f64, forces: WheelForces) {
    for wheel in WheelSlot::STEERED {
        vehicle.set_steering_angle(steering, wheel.index());
    }
    for wheel in WheelSlot::DRIVEN {
        vehicle.apply_engine_force(forces.engine, wheel.index());
    }
    for wheel in WheelSlot::DRIVEN {
        vehicle.apply_braking_force(forces.braking, wheel.index());
    }
}
