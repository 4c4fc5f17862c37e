//! Thin layer over objc2 for raw `msg_send!` code.
//!
//! UIKit, ARKit, SceneKit and CoreMotion are reached through untyped
//! `*mut AnyObject` pointers; this module gathers the aliases, string and
//! ivar helpers and framework constants that code shares.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::CStr;

pub use objc2::encode::Encode;
pub use objc2::rc::Retained;
pub use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
pub use objc2::{msg_send, sel};
pub use objc2_core_foundation::{CGFloat, CGPoint, CGRect, CGSize};
pub use objc2_foundation::NSString;

pub use block2::RcBlock;

/// Untyped Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// `NSInteger` on 64-bit iOS.
pub type NSInteger = isize;
/// `NSUInteger` on 64-bit iOS.
pub type NSUInteger = usize;

// Framework constants (linked in build.rs)
extern "C" {
    pub static ARSCNDebugOptionShowWorldOrigin: NSUInteger;
    pub static ARSCNDebugOptionShowFeaturePoints: NSUInteger;
    pub static SCNPhysicsShapeKeepAsCompoundKey: &'static NSString;
}

/// Look up a runtime class.
#[inline]
pub fn class(name: &CStr) -> Option<&'static AnyClass> {
    AnyClass::get(name)
}

/// Retained NSString from a Rust string.
#[inline]
pub fn nsstring(s: &str) -> Retained<NSString> {
    NSString::from_str(s)
}

/// Copy an NSString into a Rust `String`. `nil` gives `None`.
///
/// # Safety
/// `ns` must be nil or point to a live NSString.
pub unsafe fn to_rust_string(ns: *const NSString) -> Option<String> {
    ns.as_ref().map(|s| s.to_string())
}

/// `[obj name]` for an SCNNode, as a Rust string.
///
/// # Safety
/// `node` must be nil or a live SCNNode.
pub unsafe fn node_name(node: id) -> Option<String> {
    if node.is_null() {
        return None;
    }
    let name: *const NSString = msg_send![node, name];
    to_rust_string(name)
}

/// `[error localizedDescription]` as a Rust string.
///
/// # Safety
/// `error` must be nil or a live NSError.
pub unsafe fn error_description(error: id) -> Option<String> {
    if error.is_null() {
        return None;
    }
    let desc: *const NSString = msg_send![error, localizedDescription];
    to_rust_string(desc)
}

/// Instance variable access on classes built with `ClassBuilder`.
pub trait ObjectExt {
    /// # Safety
    /// If the ivar exists it must be of type `T`.
    unsafe fn load_ivar<T: Encode>(&self, name: &CStr) -> Option<&T>;

    /// Returns `false` if the class has no such ivar.
    ///
    /// # Safety
    /// If the ivar exists it must be of type `T`.
    unsafe fn store_ivar<T: Encode>(&mut self, name: &CStr, value: T) -> bool;
}

impl ObjectExt for AnyObject {
    unsafe fn load_ivar<T: Encode>(&self, name: &CStr) -> Option<&T> {
        let ivar = self.class().instance_variable(name)?;
        Some(ivar.load::<T>(self))
    }

    unsafe fn store_ivar<T: Encode>(&mut self, name: &CStr, value: T) -> bool {
        let Some(ivar) = self.class().instance_variable(name) else {
            return false;
        };
        *ivar.load_mut::<T>(self) = value;
        true
    }
}
