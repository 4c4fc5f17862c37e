//! Traits the host AR/rendering/physics engine implements.
//!
//! Plane tracking, scene-graph rendering and vehicle dynamics all live in the
//! host; the core only decides *what* to place and *which* set-points to
//! apply. `platform::ios::scene` implements these over SceneKit and
//! [`super::headless`] implements them in memory.

use glam::Vec3;

use super::types::{AnchorId, CameraPose, GroundOverlay};
use super::vehicle::VehicleRig;

/// Per-anchor overlay management.
pub trait AnchorHost {
    /// Attach one overlay under the anchor's node.
    fn attach_overlay(&mut self, anchor: AnchorId, overlay: &GroundOverlay);

    /// Detach every overlay under the anchor's node; returns how many were removed.
    fn detach_overlays(&mut self, anchor: AnchorId) -> usize;
}

/// Per-tick set-points on a live vehicle, addressed by wheel index.
pub trait VehicleActuator {
    fn set_steering_angle(&mut self, angle: f64, wheel: usize);
    fn apply_engine_force(&mut self, force: f64, wheel: usize);
    fn apply_braking_force(&mut self, force: f64, wheel: usize);
}

/// Asset loading and vehicle construction.
pub trait VehicleHost {
    /// Handle to a scene node. Cloning must not copy the node itself.
    type Node: Clone;
    /// Handle to a vehicle behaviour registered with the physics world.
    type Vehicle: VehicleActuator;

    /// Current camera pose, if the session has one yet.
    fn camera_pose(&self) -> Option<CameraPose>;

    /// Load a scene file and return its root node.
    fn load_asset(&mut self, asset: &str) -> Option<Self::Node>;

    /// Direct (non-recursive) child lookup by name.
    fn child_named(&self, parent: &Self::Node, name: &str) -> Option<Self::Node>;

    /// Place the chassis at `position`, give it a dynamic body and register a
    /// vehicle behaviour with the rig's wheels in order.
    fn build_vehicle(&mut self, rig: &VehicleRig<Self::Node>, position: Vec3) -> Self::Vehicle;

    /// Unregister a vehicle behaviour from the physics world.
    fn retire_vehicle(&mut self, vehicle: Self::Vehicle);

    /// Remove every scene-root child with this name; returns how many were removed.
    fn remove_root_nodes_named(&mut self, name: &str) -> usize;

    fn add_root_node(&mut self, node: &Self::Node);
}
