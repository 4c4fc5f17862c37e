//! Value types crossing the scene/physics boundary.

use glam::{Mat4, Vec3};

use crate::degrees_to_radians;
use crate::model::constants::*;

/// Host-assigned identity of a tracked anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// A horizontal real-world surface estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// Center of the plane, relative to the anchor node.
    pub center: Vec3,
    /// Width (x) and length (z) of the plane; y is unused.
    pub extent: Vec3,
}

/// Anything the AR session reports. Only planes get an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedAnchor {
    Plane(PlaneAnchor),
    Other(AnchorId),
}

impl TrackedAnchor {
    pub fn id(&self) -> AnchorId {
        match self {
            TrackedAnchor::Plane(plane) => plane.id,
            TrackedAnchor::Other(id) => *id,
        }
    }

    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            TrackedAnchor::Plane(plane) => Some(plane),
            TrackedAnchor::Other(_) => None,
        }
    }
}

/// Physics body attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Immovable collider.
    Static,
    /// Simulated body with the given mass, compound collision shape.
    Dynamic { mass: f64 },
}

/// Flat textured "ground" laid over a detected plane.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundOverlay {
    pub width: f32,
    pub height: f32,
    pub position: Vec3,
    /// Euler rotation in radians (x, y, z).
    pub euler_angles: Vec3,
    pub material: &'static str,
    pub double_sided: bool,
    pub body: BodyKind,
}

impl GroundOverlay {
    /// Size the overlay to the anchor's extent, centre it, and lay it flat.
    pub fn for_anchor(anchor: &PlaneAnchor) -> Self {
        Self {
            width: anchor.extent.x,
            height: anchor.extent.z,
            position: anchor.center,
            euler_angles: Vec3::new(degrees_to_radians(GROUND_TILT_DEGREES) as f32, 0.0, 0.0),
            material: GROUND_MATERIAL,
            double_sided: true,
            body: BodyKind::Static,
        }
    }
}

/// Where the camera is and which way it looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Unit vector along the viewing direction.
    pub forward: Vec3,
}

impl CameraPose {
    /// Read a camera node's transform: translation column, and the third basis
    /// column negated (cameras look down their local -Z).
    pub fn from_transform(transform: &Mat4) -> Self {
        Self {
            position: transform.w_axis.truncate(),
            forward: -transform.z_axis.truncate(),
        }
    }

    /// One unit in front of the camera.
    pub fn spawn_point(&self) -> Vec3 {
        self.position + self.forward
    }
}

/// Positional wheel identifiers, in the order wheels are attached to the chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelSlot {
    RearLeft = 0,
    RearRight = 1,
    FrontLeft = 2,
    FrontRight = 3,
}

impl WheelSlot {
    /// Attachment order: the host indexes wheels by this position.
    pub const ALL: [WheelSlot; 4] = [
        WheelSlot::RearLeft,
        WheelSlot::RearRight,
        WheelSlot::FrontLeft,
        WheelSlot::FrontRight,
    ];

    /// Wheels receiving the steering angle.
    pub const STEERED: [WheelSlot; 2] = [WheelSlot::FrontLeft, WheelSlot::FrontRight];

    /// Wheels receiving engine and braking force.
    pub const DRIVEN: [WheelSlot; 2] = [WheelSlot::RearLeft, WheelSlot::RearRight];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the wheel's parent node under the chassis.
    pub fn node_name(self) -> &'static str {
        match self {
            WheelSlot::RearLeft => REAR_LEFT_WHEEL_NODE,
            WheelSlot::RearRight => REAR_RIGHT_WHEEL_NODE,
            WheelSlot::FrontLeft => FRONT_LEFT_WHEEL_NODE,
            WheelSlot::FrontRight => FRONT_RIGHT_WHEEL_NODE,
        }
    }
}
