//! SceneKit implementation of the scene host traits.
//!
//! Anchors are identified by the SCNNode ARSCNView created for them; that
//! node stays the same object for the anchor's lifetime, while the
//! ARAnchor instance itself is replaced on every update.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use tracing::{debug, warn};

use super::ffi::bridge::*;
use super::ffi::types::{ScnMatrix4, ScnVector3, SimdFloat3};
use crate::scene::host::{AnchorHost, VehicleActuator, VehicleHost};
use crate::scene::types::{AnchorId, BodyKind, CameraPose, GroundOverlay, PlaneAnchor};
use crate::scene::VehicleRig;

const SCN_PHYSICS_BODY_TYPE_DYNAMIC: NSInteger = 1;

/// Retained `SCNPhysicsVehicle` behaviour.
pub struct SceneKitVehicle {
    behavior: Option<Retained<AnyObject>>,
}

impl SceneKitVehicle {
    fn raw(&self) -> Option<&AnyObject> {
        self.behavior.as_deref()
    }
}

impl VehicleActuator for SceneKitVehicle {
    fn set_steering_angle(&mut self, angle: f64, wheel: usize) {
        if let Some(v) = self.raw() {
            unsafe {
                let _: () = msg_send![
                    v,
                    setSteeringAngle: angle as CGFloat,
                    forWheelAtIndex: wheel as NSInteger
                ];
            }
        }
    }

    fn apply_engine_force(&mut self, force: f64, wheel: usize) {
        if let Some(v) = self.raw() {
            unsafe {
                let _: () = msg_send![
                    v,
                    applyEngineForce: force as CGFloat,
                    forWheelAtIndex: wheel as NSInteger
                ];
            }
        }
    }

    fn apply_braking_force(&mut self, force: f64, wheel: usize) {
        if let Some(v) = self.raw() {
            unsafe {
                let _: () = msg_send![
                    v,
                    applyBrakingForce: force as CGFloat,
                    forWheelAtIndex: wheel as NSInteger
                ];
            }
        }
    }
}

/// Scene host over an `ARSCNView`.
pub struct SceneKitHost {
    scene_view: id,
    anchor_nodes: HashMap<AnchorId, id>,
}

impl SceneKitHost {
    /// # Safety
    /// `scene_view` must be a live ARSCNView that outlives the host.
    pub unsafe fn new(scene_view: id) -> Self {
        Self {
            scene_view,
            anchor_nodes: HashMap::new(),
        }
    }

    /// Register the node ARSCNView created for an anchor and read the
    /// anchor as a plane if it is one.
    ///
    /// # Safety
    /// `node` and `anchor` must be the live objects passed to a renderer
    /// delegate callback.
    pub unsafe fn track_anchor(&mut self, node: id, anchor: id) -> Option<PlaneAnchor> {
        let anchor_id = AnchorId(node as usize as u64);
        self.anchor_nodes.insert(anchor_id, node);

        let plane_class = class(c"ARPlaneAnchor")?;
        let is_plane: Bool = msg_send![anchor, isKindOfClass: plane_class];
        if !is_plane.as_bool() {
            return None;
        }
        let center: SimdFloat3 = msg_send![anchor, center];
        let extent: SimdFloat3 = msg_send![anchor, extent];
        Some(PlaneAnchor {
            id: anchor_id,
            center: Vec3::from(center),
            extent: Vec3::from(extent),
        })
    }

    /// Drop the node registered for an anchor after it has been removed.
    pub fn forget_anchor(&mut self, anchor: AnchorId) {
        self.anchor_nodes.remove(&anchor);
    }

    unsafe fn scene(&self) -> id {
        msg_send![self.scene_view, scene]
    }

    unsafe fn root_node(&self) -> id {
        let scene = self.scene();
        if scene.is_null() {
            return nil;
        }
        msg_send![scene, rootNode]
    }

    unsafe fn physics_world(&self) -> id {
        let scene = self.scene();
        if scene.is_null() {
            return nil;
        }
        msg_send![scene, physicsWorld]
    }

    unsafe fn children(node: id) -> Vec<id> {
        if node.is_null() {
            return Vec::new();
        }
        let array: id = msg_send![node, childNodes];
        let count: NSUInteger = msg_send![array, count];
        (0..count)
            .map(|i| msg_send![array, objectAtIndex: i])
            .collect()
    }

    unsafe fn physics_body(kind: BodyKind, shape_node: id) -> id {
        let Some(body_class) = class(c"SCNPhysicsBody") else {
            return nil;
        };
        match kind {
            BodyKind::Static => msg_send![body_class, staticBody],
            BodyKind::Dynamic { mass } => {
                let (Some(shape_class), Some(dict_class), Some(number_class)) = (
                    class(c"SCNPhysicsShape"),
                    class(c"NSDictionary"),
                    class(c"NSNumber"),
                ) else {
                    return nil;
                };
                let keep: id = msg_send![number_class, numberWithBool: YES];
                let options: id = msg_send![
                    dict_class,
                    dictionaryWithObject: keep,
                    forKey: SCNPhysicsShapeKeepAsCompoundKey
                ];
                let shape: id = msg_send![shape_class, shapeWithNode: shape_node, options: options];
                let body: id = msg_send![
                    body_class,
                    bodyWithType: SCN_PHYSICS_BODY_TYPE_DYNAMIC,
                    shape: shape
                ];
                let _: () = msg_send![body, setMass: mass as CGFloat];
                body
            }
        }
    }
}

impl AnchorHost for SceneKitHost {
    fn attach_overlay(&mut self, anchor: AnchorId, overlay: &GroundOverlay) {
        let Some(&anchor_node) = self.anchor_nodes.get(&anchor) else {
            warn!(anchor = anchor.0, "No node registered for anchor");
            return;
        };
        unsafe {
            let (Some(plane_class), Some(node_class), Some(image_class)) =
                (class(c"SCNPlane"), class(c"SCNNode"), class(c"UIImage"))
            else {
                return;
            };
            let plane: id = msg_send![
                plane_class,
                planeWithWidth: overlay.width as CGFloat,
                height: overlay.height as CGFloat
            ];
            let material: id = msg_send![plane, firstMaterial];
            let diffuse: id = msg_send![material, diffuse];
            let name = nsstring(overlay.material);
            let image: id = msg_send![image_class, imageNamed: &*name];
            let _: () = msg_send![diffuse, setContents: image];
            let _: () = msg_send![material, setDoubleSided: Bool::new(overlay.double_sided)];

            let node: id = msg_send![node_class, nodeWithGeometry: plane];
            let _: () = msg_send![node, setPosition: ScnVector3::from(overlay.position)];
            let _: () = msg_send![node, setEulerAngles: ScnVector3::from(overlay.euler_angles)];
            let body = Self::physics_body(overlay.body, node);
            let _: () = msg_send![node, setPhysicsBody: body];
            let _: () = msg_send![anchor_node, addChildNode: node];
        }
    }

    fn detach_overlays(&mut self, anchor: AnchorId) -> usize {
        let Some(&anchor_node) = self.anchor_nodes.get(&anchor) else {
            return 0;
        };
        unsafe {
            let children = Self::children(anchor_node);
            for child in &children {
                let _: () = msg_send![*child, removeFromParentNode];
            }
            children.len()
        }
    }
}

impl VehicleHost for SceneKitHost {
    type Node = id;
    type Vehicle = SceneKitVehicle;

    fn camera_pose(&self) -> Option<CameraPose> {
        unsafe {
            let point_of_view: id = msg_send![self.scene_view, pointOfView];
            if point_of_view.is_null() {
                return None;
            }
            let transform: ScnMatrix4 = msg_send![point_of_view, transform];
            Some(CameraPose::from_transform(&Mat4::from(transform)))
        }
    }

    fn load_asset(&mut self, asset: &str) -> Option<id> {
        unsafe {
            let scene_class = class(c"SCNScene")?;
            let name = nsstring(asset);
            let scene: id = msg_send![scene_class, sceneNamed: &*name];
            if scene.is_null() {
                return None;
            }
            let root: id = msg_send![scene, rootNode];
            (!root.is_null()).then_some(root)
        }
    }

    fn child_named(&self, parent: &id, name: &str) -> Option<id> {
        unsafe {
            let name = nsstring(name);
            let child: id = msg_send![*parent, childNodeWithName: &*name, recursively: NO];
            (!child.is_null()).then_some(child)
        }
    }

    fn build_vehicle(&mut self, rig: &VehicleRig<id>, position: Vec3) -> SceneKitVehicle {
        unsafe {
            let _: () = msg_send![rig.chassis, setPosition: ScnVector3::from(position)];
            let body = Self::physics_body(rig.body, rig.chassis);
            let _: () = msg_send![rig.chassis, setPhysicsBody: body];

            let (Some(wheel_class), Some(array_class), Some(vehicle_class)) = (
                class(c"SCNPhysicsVehicleWheel"),
                class(c"NSArray"),
                class(c"SCNPhysicsVehicle"),
            ) else {
                return SceneKitVehicle { behavior: None };
            };
            let wheels: Vec<id> = rig
                .wheels
                .iter()
                .map(|node| msg_send![wheel_class, wheelWithNode: *node])
                .collect();
            let wheel_array: id = msg_send![
                array_class,
                arrayWithObjects: wheels.as_ptr(),
                count: wheels.len()
            ];
            let behavior: id = msg_send![
                vehicle_class,
                vehicleWithChassisBody: body,
                wheels: wheel_array
            ];

            let world = self.physics_world();
            if !world.is_null() && !behavior.is_null() {
                let _: () = msg_send![world, addBehavior: behavior];
            }
            SceneKitVehicle {
                behavior: Retained::retain(behavior),
            }
        }
    }

    fn retire_vehicle(&mut self, vehicle: SceneKitVehicle) {
        let Some(behavior) = vehicle.raw() else {
            return;
        };
        unsafe {
            let world = self.physics_world();
            if !world.is_null() {
                let _: () = msg_send![world, removeBehavior: behavior];
            }
        }
    }

    fn remove_root_nodes_named(&mut self, name: &str) -> usize {
        unsafe {
            let matching: Vec<id> = Self::children(self.root_node())
                .into_iter()
                .filter(|&node| node_name(node).as_deref() == Some(name))
                .collect();
            for node in &matching {
                let _: () = msg_send![*node, removeFromParentNode];
            }
            matching.len()
        }
    }

    fn add_root_node(&mut self, node: &id) {
        unsafe {
            let root = self.root_node();
            if root.is_null() {
                debug!("Scene has no root node");
                return;
            }
            let _: () = msg_send![root, addChildNode: *node];
        }
    }
}
