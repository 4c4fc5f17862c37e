//! C structs passed by value through `msg_send!`, with their encodings and
//! conversions to the glam types the core uses.

use glam::{Mat4, Vec3};
use objc2::encode::{Encode, Encoding};

use crate::model::AccelerometerSample;

/// `SCNVector3` (three `float`s on iOS).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScnVector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

unsafe impl Encode for ScnVector3 {
    const ENCODING: Encoding =
        Encoding::Struct("SCNVector3", &[Encoding::Float, Encoding::Float, Encoding::Float]);
}

impl From<Vec3> for ScnVector3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// `SCNMatrix4`, fields `m11..m44` in declaration order.
///
/// Rows of the SceneKit matrix are the basis vectors, so the flat field
/// order is glam's column order: `m41..m43` is the translation.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScnMatrix4 {
    pub m: [f32; 16],
}

unsafe impl Encode for ScnMatrix4 {
    const ENCODING: Encoding = Encoding::Struct("SCNMatrix4", &[Encoding::Float; 16]);
}

impl From<ScnMatrix4> for Mat4 {
    fn from(m: ScnMatrix4) -> Self {
        Mat4::from_cols_array(&m.m)
    }
}

/// `CMAcceleration`, in g.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CmAcceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

unsafe impl Encode for CmAcceleration {
    const ENCODING: Encoding =
        Encoding::Struct("?", &[Encoding::Double, Encoding::Double, Encoding::Double]);
}

impl From<CmAcceleration> for AccelerometerSample {
    fn from(a: CmAcceleration) -> Self {
        AccelerometerSample::new(a.x, a.y, a.z)
    }
}

#[cfg(target_arch = "aarch64")]
type RawFloat4 = std::arch::aarch64::float32x4_t;
#[cfg(target_arch = "x86_64")]
type RawFloat4 = std::arch::x86_64::__m128;

/// `simd_float3`, as returned by `ARPlaneAnchor.center` / `.extent`.
///
/// Wraps the platform vector register type so it travels in a SIMD
/// register the way clang passes it. The runtime has no type encoding for
/// vector types.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct SimdFloat3(RawFloat4);

unsafe impl Encode for SimdFloat3 {
    const ENCODING: Encoding = Encoding::None;
}

impl From<SimdFloat3> for Vec3 {
    fn from(v: SimdFloat3) -> Self {
        // SAFETY: both are 16 bytes of plain floats
        let lanes: [f32; 4] = unsafe { std::mem::transmute(v.0) };
        Vec3::new(lanes[0], lanes[1], lanes[2])
    }
}
