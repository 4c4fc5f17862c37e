//! Driving state shared between the sensor, touch and physics-tick sources.
//!
//! Holds the steering angle and the touch counter. Each is a single atomic,
//! so every read and write is indivisible; no compound invariant spans the
//! two, so no lock is taken. Share it with `Arc<DriveControls>`.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::drive::DriveIntent;

#[derive(Debug)]
pub struct DriveControls {
    /// Steering angle as `f64` bits.
    steering_bits: AtomicU64,
    /// Touches accumulated since the last touch-ended event.
    touches: AtomicUsize,
}

impl Default for DriveControls {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveControls {
    /// Fresh controls: straight wheels, no touches.
    pub fn new() -> Self {
        Self {
            steering_bits: AtomicU64::new(0.0f64.to_bits()),
            touches: AtomicUsize::new(0),
        }
    }

    pub fn steering_angle(&self) -> f64 {
        f64::from_bits(self.steering_bits.load(Ordering::Relaxed))
    }

    pub fn set_steering_angle(&self, angle: f64) {
        self.steering_bits.store(angle.to_bits(), Ordering::Relaxed);
    }

    /// Add the contacts of one touch-began event and return the new intent.
    ///
    /// Counts accumulate across began events until any touch ends, so two
    /// single-finger taps without a release read as 2 (reverse). An empty
    /// touch set leaves the counter untouched.
    pub fn touches_began(&self, count: usize) -> DriveIntent {
        if count == 0 {
            return self.intent();
        }
        let total = self.touches.fetch_add(count, Ordering::Relaxed) + count;
        DriveIntent::from_touch_count(total)
    }

    /// Reset the counter; any touch lifting (even a partial lift) ends the gesture.
    pub fn touches_ended(&self) -> DriveIntent {
        self.touches.store(0, Ordering::Relaxed);
        DriveIntent::Idle
    }

    pub fn touch_count(&self) -> usize {
        self.touches.load(Ordering::Relaxed)
    }

    pub fn intent(&self) -> DriveIntent {
        DriveIntent::from_touch_count(self.touch_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_controls_are_idle_and_straight() {
        let controls = DriveControls::new();
        assert_eq!(controls.steering_angle(), 0.0);
        assert_eq!(controls.intent(), DriveIntent::Idle);
    }

    #[test]
    fn test_steering_round_trips_negative_values() {
        let controls = DriveControls::new();
        controls.set_steering_angle(-0.375);
        assert_eq!(controls.steering_angle(), -0.375);
    }

    #[test]
    fn test_began_accumulates() {
        let controls = DriveControls::new();
        assert_eq!(controls.touches_began(1), DriveIntent::Accelerate);
        assert_eq!(controls.touches_began(1), DriveIntent::Reverse);
        assert_eq!(controls.touches_began(1), DriveIntent::Brake);
        assert_eq!(controls.touches_began(1), DriveIntent::Idle);
        assert_eq!(controls.touch_count(), 4);
    }

    #[test]
    fn test_ended_resets() {
        let controls = DriveControls::new();
        controls.touches_began(2);
        assert_eq!(controls.touches_ended(), DriveIntent::Idle);
        assert_eq!(controls.touch_count(), 0);
    }

    #[test]
    fn test_empty_began_is_ignored() {
        let controls = DriveControls::new();
        controls.touches_began(1);
        assert_eq!(controls.touches_began(0), DriveIntent::Accelerate);
    }

    #[test]
    fn test_shared_across_threads() {
        let controls = Arc::new(DriveControls::new());
        let writer = Arc::clone(&controls);
        std::thread::spawn(move || writer.set_steering_angle(0.25))
            .join()
            .unwrap();
        assert_eq!(controls.steering_angle(), 0.25);
    }
}
