//! Tilt steering: a one-pole low-pass filter over two accelerometer axes.
//!
//! Each axis is smoothed independently with
//! `filtered = raw * factor + previous * (1 - factor)`, seeded at zero and
//! never reset. The steering angle is the filtered Y reading, negated unless
//! the filtered X reading is positive (landscape vs. mirrored landscape).
//! Nothing is clamped: the angle is as large as the device reports.

use super::constants::FILTERING_FACTOR;

/// Accelerometer axis tracked by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One raw accelerometer reading, device-local units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccelerometerSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelerometerSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Single-pole exponential smoothing step.
#[inline]
pub fn low_pass(previous: f64, raw: f64, factor: f64) -> f64 {
    raw * factor + previous * (1.0 - factor)
}

/// Derive the signed steering angle from the filtered axes.
///
/// Only the sign of `filtered_x` matters; a zero X takes the negated branch.
#[inline]
pub fn steering_angle(filtered_x: f64, filtered_y: f64) -> f64 {
    if filtered_x > 0.0 {
        filtered_y
    } else {
        -filtered_y
    }
}

/// Filter memory for the X and Y axes.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltFilter {
    factor: f64,
    x: f64,
    y: f64,
}

impl Default for TiltFilter {
    fn default() -> Self {
        Self::new(FILTERING_FACTOR)
    }
}

impl TiltFilter {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Feed one raw reading for `axis` and return its new filtered value.
    pub fn update(&mut self, axis: Axis, raw: f64) -> f64 {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        *slot = low_pass(*slot, raw, self.factor);
        *slot
    }

    /// Last filtered value for `axis`.
    pub fn filtered(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Filter a full sample (Y first, then X) and return the steering angle.
    pub fn apply(&mut self, sample: AccelerometerSample) -> f64 {
        let y = self.update(Axis::Y, sample.y);
        let x = self.update(Axis::X, sample.x);
        steering_angle(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_first_update_halves_raw_value() {
        let mut filter = TiltFilter::default();
        assert!(approx_eq(filter.update(Axis::X, 1.0), 0.5));
    }

    #[test]
    fn test_axes_are_independent() {
        let mut filter = TiltFilter::default();
        filter.update(Axis::X, 4.0);
        assert!(approx_eq(filter.filtered(Axis::X), 2.0));
        assert!(approx_eq(filter.filtered(Axis::Y), 0.0));
    }

    #[test]
    fn test_weights_decay_by_half_per_step() {
        let mut filter = TiltFilter::default();
        filter.update(Axis::Y, 8.0);
        filter.update(Axis::Y, 0.0);
        filter.update(Axis::Y, 0.0);
        // 8 * 0.5^3
        assert!(approx_eq(filter.filtered(Axis::Y), 1.0));
    }

    #[test]
    fn test_steering_sign_rule() {
        assert!(approx_eq(steering_angle(3.0, 2.0), 2.0));
        assert!(approx_eq(steering_angle(-1.0, 2.0), -2.0));
        assert!(approx_eq(steering_angle(0.0, 5.0), -5.0));
    }

    #[test]
    fn test_apply_uses_filtered_values() {
        let mut filter = TiltFilter::default();
        // x filtered to 0.5 (> 0), y filtered to 1.5
        let angle = filter.apply(AccelerometerSample::new(1.0, 3.0, -1.0));
        assert!(approx_eq(angle, 1.5));

        // x filtered to 0.25 - 1.0 = -0.75 -> negated branch
        let angle = filter.apply(AccelerometerSample::new(-2.0, 3.0, -1.0));
        assert!(approx_eq(filter.filtered(Axis::Y), 2.25));
        assert!(approx_eq(angle, -2.25));
    }

    #[test]
    fn test_no_clamping() {
        let mut filter = TiltFilter::default();
        let mut angle = 0.0;
        for _ in 0..64 {
            angle = filter.apply(AccelerometerSample::new(1.0, 1000.0, 0.0));
        }
        assert!(angle > 999.0);
    }
}
