//! In-memory scene host.
//!
//! Stands in for SceneKit when there is no device: keeps a node arena with
//! names and children, per-anchor overlay lists, the scene root's children
//! and the vehicles registered with the "physics world". It does not
//! simulate anything; it records what the core asked for so tests and the
//! desktop replay can inspect it.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use glam::{Mat4, Vec3};

use super::host::{AnchorHost, VehicleActuator, VehicleHost};
use super::types::{AnchorId, BodyKind, CameraPose, GroundOverlay, WheelSlot};
use super::vehicle::VehicleRig;
use crate::model::constants::{CHASSIS_NODE, VEHICLE_ASSET};

/// Index into the headless node arena.
pub type NodeId = usize;

/// Node tree template an asset is instantiated from.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetNode {
    pub name: String,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: AssetNode) -> Self {
        self.children.push(child);
        self
    }

    /// The shape of `car.scn`: a chassis holding four wheel parents.
    pub fn car() -> Self {
        let chassis = WheelSlot::ALL
            .iter()
            .fold(AssetNode::new(CHASSIS_NODE), |chassis, slot| {
                chassis.with_child(AssetNode::new(slot.node_name()))
            });
        AssetNode::new("root").with_child(chassis)
    }
}

/// Last set-points a wheel received.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelState {
    pub steering: f64,
    pub engine: f64,
    pub braking: f64,
}

type SharedWheels = Rc<RefCell<[WheelState; 4]>>;

/// Handle to a registered headless vehicle.
#[derive(Debug)]
pub struct HeadlessVehicle {
    id: usize,
    wheels: SharedWheels,
}

impl VehicleActuator for HeadlessVehicle {
    fn set_steering_angle(&mut self, angle: f64, wheel: usize) {
        if let Some(state) = self.wheels.borrow_mut().get_mut(wheel) {
            state.steering = angle;
        }
    }

    fn apply_engine_force(&mut self, force: f64, wheel: usize) {
        if let Some(state) = self.wheels.borrow_mut().get_mut(wheel) {
            state.engine = force;
        }
    }

    fn apply_braking_force(&mut self, force: f64, wheel: usize) {
        if let Some(state) = self.wheels.borrow_mut().get_mut(wheel) {
            state.braking = force;
        }
    }
}

#[derive(Debug, Clone)]
struct NodeRecord {
    name: String,
    children: Vec<NodeId>,
    position: Vec3,
    body: Option<BodyKind>,
}

#[derive(Debug)]
struct VehicleRecord {
    id: usize,
    chassis: NodeId,
    wheel_nodes: [NodeId; 4],
    wheels: SharedWheels,
}

/// Scene host that lives entirely in memory.
///
/// The node arena only grows: detached and retired nodes keep their slots,
/// so a long session accumulates one rig per spawn.
#[derive(Debug)]
pub struct HeadlessScene {
    nodes: Vec<NodeRecord>,
    root_children: Vec<NodeId>,
    assets: HashMap<String, AssetNode>,
    overlays: BTreeMap<AnchorId, Vec<GroundOverlay>>,
    vehicles: Vec<VehicleRecord>,
    camera: Option<Mat4>,
    next_vehicle_id: usize,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessScene {
    /// Empty scene with `car.scn` registered and no camera pose.
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            root_children: Vec::new(),
            assets: HashMap::new(),
            overlays: BTreeMap::new(),
            vehicles: Vec::new(),
            camera: None,
            next_vehicle_id: 0,
        };
        scene.register_asset(VEHICLE_ASSET, AssetNode::car());
        scene
    }

    pub fn register_asset(&mut self, name: &str, template: AssetNode) {
        self.assets.insert(name.to_string(), template);
    }

    pub fn remove_asset(&mut self, name: &str) {
        self.assets.remove(name);
    }

    pub fn set_camera_transform(&mut self, transform: Mat4) {
        self.camera = Some(transform);
    }

    pub fn clear_camera(&mut self) {
        self.camera = None;
    }

    // === Inspection ===

    pub fn overlays(&self, anchor: AnchorId) -> &[GroundOverlay] {
        self.overlays.get(&anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Anchors with at least one overlay attached.
    pub fn anchors_with_overlays(&self) -> Vec<AnchorId> {
        self.overlays
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn root_nodes_named(&self, name: &str) -> Vec<NodeId> {
        self.root_children
            .iter()
            .copied()
            .filter(|&id| self.nodes[id].name == name)
            .collect()
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    pub fn node_position(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(node).map(|n| n.position)
    }

    pub fn node_body(&self, node: NodeId) -> Option<BodyKind> {
        self.nodes.get(node).and_then(|n| n.body)
    }

    /// Vehicles currently registered with the physics world.
    pub fn live_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Chassis node of the most recently built live vehicle.
    pub fn current_chassis(&self) -> Option<NodeId> {
        self.vehicles.last().map(|v| v.chassis)
    }

    /// Wheel node names of the most recent vehicle, in attachment order.
    pub fn current_wheel_names(&self) -> Option<[String; 4]> {
        let vehicle = self.vehicles.last()?;
        Some(vehicle.wheel_nodes.map(|id| self.nodes[id].name.clone()))
    }

    /// Set-points of the most recent vehicle's wheels.
    pub fn current_wheels(&self) -> Option<[WheelState; 4]> {
        self.vehicles.last().map(|v| *v.wheels.borrow())
    }

    fn instantiate(&mut self, template: &AssetNode) -> NodeId {
        let children = template
            .children
            .iter()
            .map(|child| self.instantiate(child))
            .collect();
        self.nodes.push(NodeRecord {
            name: template.name.clone(),
            children,
            position: Vec3::ZERO,
            body: None,
        });
        self.nodes.len() - 1
    }
}

impl AnchorHost for HeadlessScene {
    fn attach_overlay(&mut self, anchor: AnchorId, overlay: &GroundOverlay) {
        self.overlays.entry(anchor).or_default().push(overlay.clone());
    }

    fn detach_overlays(&mut self, anchor: AnchorId) -> usize {
        self.overlays.remove(&anchor).map_or(0, |list| list.len())
    }
}

impl VehicleHost for HeadlessScene {
    type Node = NodeId;
    type Vehicle = HeadlessVehicle;

    fn camera_pose(&self) -> Option<CameraPose> {
        self.camera.as_ref().map(CameraPose::from_transform)
    }

    fn load_asset(&mut self, asset: &str) -> Option<NodeId> {
        let template = self.assets.get(asset)?.clone();
        Some(self.instantiate(&template))
    }

    fn child_named(&self, parent: &NodeId, name: &str) -> Option<NodeId> {
        self.nodes
            .get(*parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name == name)
    }

    fn build_vehicle(&mut self, rig: &VehicleRig<NodeId>, position: Vec3) -> HeadlessVehicle {
        let chassis = &mut self.nodes[rig.chassis];
        chassis.position = position;
        chassis.body = Some(rig.body);

        let wheels: SharedWheels = Rc::new(RefCell::new([WheelState::default(); 4]));
        let id = self.next_vehicle_id;
        self.next_vehicle_id += 1;
        self.vehicles.push(VehicleRecord {
            id,
            chassis: rig.chassis,
            wheel_nodes: rig.wheels,
            wheels: Rc::clone(&wheels),
        });
        HeadlessVehicle { id, wheels }
    }

    fn retire_vehicle(&mut self, vehicle: HeadlessVehicle) {
        self.vehicles.retain(|v| v.id != vehicle.id);
    }

    fn remove_root_nodes_named(&mut self, name: &str) -> usize {
        let before = self.root_children.len();
        let nodes = &self.nodes;
        self.root_children.retain(|&id| nodes[id].name != name);
        before - self.root_children.len()
    }

    fn add_root_node(&mut self, node: &NodeId) {
        self.root_children.push(*node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_asset_shape() {
        let mut scene = HeadlessScene::new();
        let root = scene.load_asset(VEHICLE_ASSET).unwrap();
        let chassis = scene.child_named(&root, CHASSIS_NODE).unwrap();
        for slot in WheelSlot::ALL {
            assert!(scene.child_named(&chassis, slot.node_name()).is_some());
        }
    }

    #[test]
    fn test_child_lookup_is_not_recursive() {
        let mut scene = HeadlessScene::new();
        let root = scene.load_asset(VEHICLE_ASSET).unwrap();
        assert!(scene.child_named(&root, "frontLeftParent").is_none());
    }

    #[test]
    fn test_each_load_creates_fresh_nodes() {
        let mut scene = HeadlessScene::new();
        let a = scene.load_asset(VEHICLE_ASSET).unwrap();
        let b = scene.load_asset(VEHICLE_ASSET).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_actuator_ignores_unknown_wheel() {
        let mut vehicle = HeadlessVehicle {
            id: 0,
            wheels: Rc::new(RefCell::new([WheelState::default(); 4])),
        };
        vehicle.apply_engine_force(5.0, 7);
        vehicle.apply_engine_force(5.0, 1);
        assert_eq!(vehicle.wheels.borrow()[1].engine, 5.0);
    }
}
