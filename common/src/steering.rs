//! Encoder-to-steering-angle mapping and its session calibration.
//!
//! The steering angle is linear in the encoder travel since the last zero
//! capture, with a slope of `5.0 + sensitivity / 10` tenths of a degree per
//! count. Nothing is clamped: large swings wrap in 16 bits.

use crate::config::SENSITIVITY_MV_PER_STEP;

/// Base slope in tenths of a degree per encoder count.
pub const BASE_SLOPE: f64 = 5.0;

/// Map an encoder reading to a steering angle in tenths of a degree.
///
/// The product is truncated toward zero and then narrowed to 16 bits with
/// wraparound.
pub fn compute_steer_angle(
    encoder_value: i16,
    zero_offset: i16,
    sensitivity: i16,
) -> i16 {
    let travel = i32::from(encoder_value) - i32::from(zero_offset);
    let slope = BASE_SLOPE + f64::from(f32::from(sensitivity) / 10.0);
    let scaled = (f64::from(travel) * slope) as i32;
    scaled as i16
}

/// Steering calibration for the powered session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Encoder value that maps to straight ahead.
    pub zero_offset: i16,
    /// Slope adjustment in tenths (added to [`BASE_SLOPE`] after dividing by 10).
    pub sensitivity: i16,
    /// Potentiometer reading captured at arming; sensitivity is relative to it.
    pub baseline_mv: u16,
}

impl Calibration {
    /// Steering angle for the given encoder reading.
    #[inline]
    pub fn steer_angle(
        &self,
        encoder_value: i16,
    ) -> i16 {
        compute_steer_angle(encoder_value, self.zero_offset, self.sensitivity)
    }

    /// Make `encoder_value` the new straight-ahead position.
    #[inline]
    pub fn capture_zero(
        &mut self,
        encoder_value: i16,
    ) {
        self.zero_offset = encoder_value;
    }

    /// Recompute sensitivity from the potentiometer's travel since arming.
    pub fn retune(
        &mut self,
        millivolts: u16,
    ) {
        let travel = i32::from(millivolts) - i32::from(self.baseline_mv);
        self.sensitivity = (travel / SENSITIVITY_MV_PER_STEP) as i16;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_offset() {
        assert_eq!(compute_steer_angle(123, 123, 0), 0);
        assert_eq!(compute_steer_angle(-40, -40, 55), 0);
    }

    #[test]
    fn test_base_slope() {
        assert_eq!(compute_steer_angle(10, 0, 0), 50);
        assert_eq!(compute_steer_angle(-10, 0, 0), -50);
        assert_eq!(compute_steer_angle(110, 100, 0), 50);
    }

    #[test]
    fn test_sensitivity_scales_slope() {
        // 5.0 + 10 / 10 = 6.0
        assert_eq!(compute_steer_angle(10, 0, 10), 60);
        // 5.0 - 20 / 10 = 3.0
        assert_eq!(compute_steer_angle(10, 0, -20), 30);
        // 5.0 + 5 / 10 = 5.5
        assert_eq!(compute_steer_angle(2, 0, 5), 11);
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 3 * 5.5 = 16.5
        assert_eq!(compute_steer_angle(3, 0, 5), 16);
        assert_eq!(compute_steer_angle(-3, 0, 5), -16);
    }

    #[test]
    fn test_travel_computed_without_16_bit_overflow() {
        // 32767 - (-32768) = 65535 counts, * 5 then wrapped
        let expected = (65535 * 5) as i16;
        assert_eq!(compute_steer_angle(i16::MAX, i16::MIN, 0), expected);
    }

    #[test]
    fn test_large_swing_wraps() {
        // 7000 * 5 = 35000 does not fit in i16
        assert_eq!(compute_steer_angle(7000, 0, 0), 35000_i32 as i16);
        assert!(compute_steer_angle(7000, 0, 0) < 0);
    }

    #[test]
    fn test_calibration_capture_zero() {
        let mut cal = Calibration::default();
        cal.capture_zero(250);
        assert_eq!(cal.steer_angle(250), 0);
        assert_eq!(cal.steer_angle(260), 50);
    }

    #[test]
    fn test_calibration_retune() {
        let mut cal = Calibration {
            baseline_mv: 1650,
            ..Calibration::default()
        };
        cal.retune(1650);
        assert_eq!(cal.sensitivity, 0);
        cal.retune(1950);
        assert_eq!(cal.sensitivity, 10);
        cal.retune(1000);
        // -650 / 30 truncates toward zero
        assert_eq!(cal.sensitivity, -21);
        cal.retune(1679);
        assert_eq!(cal.sensitivity, 0);
    }
}
