//! CoreMotion accelerometer feed.
//!
//! Starts a `CMMotionManager` delivering accelerometer updates to the main
//! operation queue and forwards each one to a [`MotionHandler`].

use std::cell::RefCell;

use tracing::info;

use crate::error::SensorError;
use crate::events::{self, AppEvent};
use crate::input::MotionHandler;
use crate::platform::ios::ffi::bridge::*;
use crate::platform::ios::ffi::types::CmAcceleration;

/// Start accelerometer updates.
///
/// Returns the motion manager, which must be kept alive for updates to
/// continue, or `None` when the accelerometer is unavailable (the handler
/// has been told and `SensorUnavailable` published).
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn start_accelerometer(mut handler: MotionHandler) -> Option<Retained<AnyObject>> {
    let (Some(manager_class), Some(queue_class)) =
        (class(c"CMMotionManager"), class(c"NSOperationQueue"))
    else {
        report_unavailable(&mut handler);
        return None;
    };

    let manager: id = msg_send![manager_class, new];
    let manager = Retained::from_raw(manager)?;

    let available: Bool = msg_send![&*manager, isAccelerometerAvailable];
    if !available.as_bool() {
        report_unavailable(&mut handler);
        return None;
    }

    let _: () = msg_send![&*manager, setAccelerometerUpdateInterval: handler.update_interval()];
    info!(
        interval = handler.update_interval(),
        "Starting accelerometer updates"
    );

    let handler = RefCell::new(handler);
    let block = RcBlock::new(move |data: id, error: id| {
        let mut handler = handler.borrow_mut();
        if !error.is_null() {
            let message = error_description(error).unwrap_or_default();
            handler.on_error(SensorError::Delivery(message));
            return;
        }
        if data.is_null() {
            return;
        }
        let acceleration: CmAcceleration = msg_send![data, acceleration];
        handler.on_sample(acceleration.into());
    });

    let queue: id = msg_send![queue_class, mainQueue];
    let _: () = msg_send![
        &*manager,
        startAccelerometerUpdatesToQueue: queue,
        withHandler: &*block
    ];
    Some(manager)
}

fn report_unavailable(handler: &mut MotionHandler) {
    handler.on_unavailable();
    events::publish(AppEvent::SensorUnavailable);
}
