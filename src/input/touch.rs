//! Touch boundary: began/ended events carrying the size of their touch set.

use std::sync::Arc;

use tracing::debug;

use crate::model::{DriveControls, DriveIntent};

#[derive(Clone)]
pub struct TouchHandler {
    controls: Arc<DriveControls>,
}

impl TouchHandler {
    pub fn new(controls: Arc<DriveControls>) -> Self {
        Self { controls }
    }

    pub fn touches_began(&self, count: usize) -> DriveIntent {
        let before = self.controls.intent();
        let intent = self.controls.touches_began(count);
        if intent != before {
            debug!(count = self.controls.touch_count(), "{}", intent.description());
        }
        intent
    }

    /// `count` is only logged: any ended event resets the counter.
    pub fn touches_ended(&self, count: usize) -> DriveIntent {
        let before = self.controls.intent();
        let intent = self.controls.touches_ended();
        if intent != before {
            debug!(lifted = count, "{}", intent.description());
        }
        intent
    }
}
